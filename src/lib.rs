//! rust_qrgen - QR Code Model 2 symbol encoder
//!
//! Turns text or raw bytes plus an error correction level into a finished
//! module matrix. Rendering (colours, scaling, quiet zone, image formats) is
//! left to the caller.
//!
//! ```
//! use rust_qrgen::{encode, ECLevel};
//!
//! let code = encode("HELLO WORLD", ECLevel::M).unwrap();
//! assert_eq!(code.size(), 21);
//! let dark = code.get(0, 0);
//! assert!(dark);
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Encoder options
pub mod config;
/// QR code encoding modules (segments, error correction, matrix, masks)
pub mod encoder;
/// Error types
pub mod error;
/// Core data structures (QrCode, BitMatrix, Version, etc.)
pub mod models;
/// Readback of finished symbols
pub mod reader;

pub use config::EncodeOptions;
pub use encoder::modes::Mode;
pub use error::{QrError, ReadError, Result};
pub use models::{BitMatrix, ECLevel, MaskPattern, QrCode, Version};
pub use reader::{DecodedSymbol, read_matrix};

use rayon::prelude::*;

/// Encode UTF-8 text at `ec_level` with automatic version, mode and mask
///
/// # Example
/// ```
/// use rust_qrgen::{encode, ECLevel, Mode};
///
/// let code = encode("HELLO", ECLevel::M).unwrap();
/// assert_eq!(code.version().number(), 1);
/// let decoded = code.read_back().unwrap();
/// assert_eq!(decoded.segments[0].mode(), Mode::Alphanumeric);
/// ```
pub fn encode(text: &str, ec_level: ECLevel) -> Result<QrCode> {
    encode_bytes(text.as_bytes(), ec_level)
}

/// Encode raw bytes at `ec_level`
pub fn encode_bytes(data: &[u8], ec_level: ECLevel) -> Result<QrCode> {
    encode_with_options(data, &EncodeOptions::new(ec_level))
}

/// Encode raw bytes with full control over version range, mask and mode
pub fn encode_with_options(data: &[u8], opts: &EncodeOptions) -> Result<QrCode> {
    encoder::encode_with_options(data, opts)
}

/// Encode many texts in parallel; results keep the input order
pub fn encode_batch(texts: &[&str], opts: &EncodeOptions) -> Vec<Result<QrCode>> {
    texts
        .par_iter()
        .map(|text| encode_with_options(text.as_bytes(), opts))
        .collect()
}

/// Encoder holding a fixed set of options
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    options: EncodeOptions,
}

impl Encoder {
    /// Create an encoder with default options (level M, automatic everything)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an encoder with the given options
    pub fn with_options(options: EncodeOptions) -> Self {
        Self { options }
    }

    /// Options used for every encode
    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    /// Encode UTF-8 text
    pub fn encode(&self, text: &str) -> Result<QrCode> {
        self.encode_bytes(text.as_bytes())
    }

    /// Encode raw bytes
    pub fn encode_bytes(&self, data: &[u8]) -> Result<QrCode> {
        encode_with_options(data, &self.options)
    }

    /// Encode many texts in parallel
    pub fn encode_batch(&self, texts: &[&str]) -> Vec<Result<QrCode>> {
        encode_batch(texts, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_empty() {
        let code = encode("", ECLevel::M).unwrap();
        assert_eq!(code.version(), Version::MIN);
        assert_eq!(code.size(), 21);
        assert!(code.read_back().unwrap().data.is_empty());
    }

    #[test]
    fn test_encoder_uses_its_options() {
        let opts = EncodeOptions::new(ECLevel::Q).with_mask(MaskPattern::Pattern4);
        let encoder = Encoder::with_options(opts);
        let code = encoder.encode("options").unwrap();
        assert_eq!(code.ec_level(), ECLevel::Q);
        assert_eq!(code.mask_pattern(), MaskPattern::Pattern4);
        assert_eq!(encoder.options(), &opts);
    }

    #[test]
    fn test_encoder_default_matches_free_function() {
        let a = Encoder::new().encode("same input").unwrap();
        let b = encode("same input", ECLevel::M).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_batch_preserves_order_and_errors() {
        let opts = EncodeOptions::default().with_mode(Mode::Numeric);
        let results = encode_batch(&["123", "12a", "4567"], &opts);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().read_back().unwrap().content, "123");
        assert!(matches!(results[1], Err(QrError::Encoding { index: 2, .. })));
        assert_eq!(results[2].as_ref().unwrap().read_back().unwrap().content, "4567");
    }
}
