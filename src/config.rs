//! Encoder options

use crate::encoder::modes::Mode;
use crate::models::{ECLevel, MaskPattern, Version};

/// Knobs for a single encode
///
/// The defaults pick level M, search every version, evaluate all masks and
/// segment the input automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Requested error correction level
    pub ec_level: ECLevel,
    /// Smallest version the selector may return
    pub min_version: Version,
    /// Largest version the selector may return
    pub max_version: Version,
    /// Fixed mask; `None` picks the lowest-penalty mask
    pub mask: Option<MaskPattern>,
    /// Force one mode for the whole input; `None` segments automatically
    pub mode: Option<Mode>,
    /// Raise the level while the data still fits the chosen version
    pub boost_ec_level: bool,
}

impl EncodeOptions {
    /// Default options at `ec_level`
    pub fn new(ec_level: ECLevel) -> Self {
        Self {
            ec_level,
            ..Self::default()
        }
    }

    /// Set the error correction level
    pub fn with_ec_level(mut self, ec_level: ECLevel) -> Self {
        self.ec_level = ec_level;
        self
    }

    /// Restrict the version search to `min..=max`
    pub fn with_version_range(mut self, min: Version, max: Version) -> Self {
        self.min_version = min;
        self.max_version = max;
        self
    }

    /// Pin the symbol to exactly `version`
    pub fn with_version(self, version: Version) -> Self {
        self.with_version_range(version, version)
    }

    /// Use `mask` instead of evaluating all eight
    pub fn with_mask(mut self, mask: MaskPattern) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Encode the whole input as one `mode` segment
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Enable or disable level boosting
    pub fn with_boost_ec_level(mut self, boost: bool) -> Self {
        self.boost_ec_level = boost;
        self
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            ec_level: ECLevel::M,
            min_version: Version::MIN,
            max_version: Version::MAX,
            mask: None,
            mode: None,
            boost_ec_level: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = EncodeOptions::default();
        assert_eq!(opts.ec_level, ECLevel::M);
        assert_eq!(opts.min_version, Version::MIN);
        assert_eq!(opts.max_version, Version::MAX);
        assert!(opts.mask.is_none() && opts.mode.is_none());
        assert!(!opts.boost_ec_level);
    }

    #[test]
    fn test_setters_chain() {
        let v5 = Version::new(5).unwrap();
        let opts = EncodeOptions::new(ECLevel::H)
            .with_version(v5)
            .with_mask(MaskPattern::Pattern3)
            .with_mode(Mode::Byte)
            .with_boost_ec_level(true);
        assert_eq!(opts.ec_level, ECLevel::H);
        assert_eq!((opts.min_version, opts.max_version), (v5, v5));
        assert_eq!(opts.mask, Some(MaskPattern::Pattern3));
        assert_eq!(opts.mode, Some(Mode::Byte));
        assert!(opts.boost_ec_level);
    }
}
