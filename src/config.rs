//! Sketch configuration, loaded from TOML.

use serde::Deserialize;

use crate::error::Result;

/// Top-level settings for a sketch session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    /// Height of the toolbar strip at the top of the canvas that never
    /// receives splits.
    pub reserved_top: f64,
    /// File stem used when exporting a frame.
    pub export_name: String,
    /// Key that resets the sketch (matched against `KeyboardEvent.key`).
    pub reset_key: String,
    /// Key that exports the current frame.
    pub export_key: String,
    /// Fixed random seed; a fresh one is drawn when absent.
    pub seed: Option<u64>,
    /// Split behaviour.
    pub split: SplitConfig,
}

/// How a clicked segment is divided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    pub axis: AxisPolicy,
    pub speed: SpeedPolicy,
    pub opacity: OpacityPolicy,
}

/// Chooses the axis a segment is split along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisPolicy {
    /// Split across whichever centre line the click is closer to.
    #[default]
    Proximity,
    /// Pick the axis at random.
    CoinFlip,
}

/// Assigns scroll speeds to the two children of a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedPolicy {
    /// One signed draw `v`; children get `v` and `-v`.
    #[default]
    Mirror,
    /// One magnitude draw `m`; children get `+m` and `-m`.
    Diverge,
}

/// Assigns opacities to the two children of a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpacityPolicy {
    /// Each child draws its own opacity.
    #[default]
    PerChild,
    /// One draw shared by both children.
    Shared,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            reserved_top: 40.0,
            export_name: "gradient-art".to_string(),
            reset_key: "r".to_string(),
            export_key: "s".to_string(),
            seed: None,
            split: SplitConfig::default(),
        }
    }
}

impl SketchConfig {
    /// Parse a TOML document. Missing keys fall back to defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SketchConfig = toml::from_str(text)?;
        Ok(config.sanitized())
    }

    /// Load from a file on disk.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    fn sanitized(mut self) -> Self {
        if !self.reserved_top.is_finite() || self.reserved_top < 0.0 {
            log::warn!("reserved_top {} out of range, using 0", self.reserved_top);
            self.reserved_top = 0.0;
        }
        if self.export_name.trim().is_empty() {
            self.export_name = SketchConfig::default().export_name;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = SketchConfig::from_toml_str("").unwrap();
        assert_eq!(config, SketchConfig::default());
        assert_eq!(config.split.axis, AxisPolicy::Proximity);
        assert_eq!(config.split.speed, SpeedPolicy::Mirror);
    }

    #[test]
    fn parses_policies_and_seed() {
        let text = r#"
            reserved_top = 0.0
            seed = 42

            [split]
            axis = "coin_flip"
            speed = "diverge"
            opacity = "shared"
        "#;
        let config = SketchConfig::from_toml_str(text).unwrap();
        assert_eq!(config.reserved_top, 0.0);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.split.axis, AxisPolicy::CoinFlip);
        assert_eq!(config.split.speed, SpeedPolicy::Diverge);
        assert_eq!(config.split.opacity, OpacityPolicy::Shared);
        assert_eq!(config.export_name, "gradient-art");
    }

    #[test]
    fn negative_strip_is_clamped() {
        let config = SketchConfig::from_toml_str("reserved_top = -5.0").unwrap();
        assert_eq!(config.reserved_top, 0.0);
    }

    #[test]
    fn loads_from_file() {
        let path = std::env::temp_dir().join(format!("splitscroll-config-{}.toml", std::process::id()));
        std::fs::write(&path, "export_name = \"tiles\"\n").unwrap();
        let config = SketchConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config.export_name, "tiles");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = SketchConfig::load(std::path::Path::new("/nonexistent/splitscroll.toml")).unwrap_err();
        assert!(matches!(err, crate::error::SketchError::Io(_)));
    }

    #[test]
    fn unknown_policy_is_an_error() {
        let err = SketchConfig::from_toml_str("[split]\naxis = \"diagonal\"").unwrap_err();
        assert!(err.to_string().starts_with("Invalid configuration"));
    }
}
