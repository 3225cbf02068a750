//! config.rs — Tunable ranking constants (factor weights, mixing interval,
//! location defaults, sponsored boost) with TOML loading.
//!
//! The shipped defaults are the production literals; the TOML file exists so
//! the constants can be A/B-tested without a rebuild. Weights are validated to
//! sum to 1.0 at load time — scores must stay comparable across calls and time.

use serde::Deserialize;
use std::{fs, path::Path};
use tracing::info;

pub const DEFAULT_RANKING_CONFIG_PATH: &str = "config/ranking.toml";
pub const ENV_RANKING_CONFIG_PATH: &str = "RANKING_CONFIG_PATH";

pub const DEFAULT_PLANS_CONFIG_PATH: &str = "config/plans.json";
pub const ENV_PLANS_CONFIG_PATH: &str = "PLANS_CONFIG_PATH";

/// Fixed factor weights; must sum to 1.0.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FactorWeights {
    pub subscription: f32,
    pub sponsored: f32,
    pub relevance: f32,
    pub location: f32,
    pub quality: f32,
    pub recency: f32,
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            subscription: 0.35,
            sponsored: 0.25,
            relevance: 0.20,
            location: 0.10,
            quality: 0.07,
            recency: 0.03,
        }
    }
}

impl FactorWeights {
    pub fn sum(&self) -> f32 {
        self.subscription + self.sponsored + self.relevance + self.location + self.quality
            + self.recency
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MixingConfig {
    /// Every `interval`-th output slot prefers a promoted listing.
    pub interval: usize,
}

impl Default for MixingConfig {
    fn default() -> Self {
        Self { interval: 3 }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LocationConfig {
    /// Radius applied when the context supplies a coordinate but no radius.
    pub default_radius_km: f64,
    /// Factor for listings beyond the radius (suppressed, not excluded).
    pub out_of_radius_factor: f32,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            default_radius_km: 50.0,
            out_of_radius_factor: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SponsorshipConfig {
    /// Factor applied when a listing consumes a sponsored slot.
    pub boost: f32,
}

impl Default for SponsorshipConfig {
    fn default() -> Self {
        Self { boost: 3.0 }
    }
}

/// All tunable ranking constants, with the production literals as defaults.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RankingConfig {
    #[serde(default)]
    pub weights: FactorWeights,
    #[serde(default)]
    pub mixing: MixingConfig,
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub sponsorship: SponsorshipConfig,
}

impl RankingConfig {
    /// Load from a TOML file, rejecting weight tables that do not sum to 1.0.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let data = fs::read_to_string(path.as_ref())?;
        let cfg: RankingConfig = toml::from_str(&data)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Resolve the config path from `RANKING_CONFIG_PATH` (default
    /// `config/ranking.toml`). A missing file yields the built-in defaults; a
    /// present-but-invalid file is an error, not a silent fallback.
    pub fn from_env() -> anyhow::Result<Self> {
        let path = std::env::var(ENV_RANKING_CONFIG_PATH)
            .unwrap_or_else(|_| DEFAULT_RANKING_CONFIG_PATH.to_string());
        if !Path::new(&path).exists() {
            info!(%path, "ranking config not found, using built-in defaults");
            return Ok(Self::default());
        }
        let cfg = Self::load_from_file(&path)?;
        info!(%path, "ranking config loaded");
        Ok(cfg)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let sum = self.weights.sum();
        if (sum - 1.0).abs() > 1e-3 {
            anyhow::bail!("factor weights must sum to 1.0, got {sum}");
        }
        if self.mixing.interval == 0 {
            anyhow::bail!("mixing interval must be >= 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_sum_to_one() {
        let w = FactorWeights::default();
        assert!((w.sum() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn partial_toml_keeps_section_defaults() {
        let cfg: RankingConfig = toml::from_str("[mixing]\ninterval = 4\n").unwrap();
        assert_eq!(cfg.mixing.interval, 4);
        assert!((cfg.weights.subscription - 0.35).abs() < 1e-6);
        assert!((cfg.location.default_radius_km - 50.0).abs() < 1e-9);
    }

    #[test]
    fn unbalanced_weights_rejected() {
        let toml_src = r#"
            [weights]
            subscription = 0.9
            sponsored = 0.25
            relevance = 0.20
            location = 0.10
            quality = 0.07
            recency = 0.03
        "#;
        let cfg: RankingConfig = toml::from_str(toml_src).unwrap();
        assert!(cfg.validate().is_err());
    }
}
