//! Decoder configuration.

use crate::limits::DEFAULT_MAX_RESTRICTION_DEPTH;

/// Knobs for the decoders that need them. Encoders take no configuration.
///
/// ```
/// use oxnspi::DecodeOptions;
///
/// let options = DecodeOptions::new()
///     .with_max_restriction_depth(32)
///     .with_lenient_templates(true);
/// assert_eq!(options.max_restriction_depth, 32);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Deepest restriction tree accepted; deeper input is
    /// `DecodeError::RestrictionTooDeep`.
    pub max_restriction_depth: usize,
    /// Return an empty template set (with a warning) instead of an error when
    /// a display template is malformed.
    pub lenient_templates: bool,
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self {
            max_restriction_depth: DEFAULT_MAX_RESTRICTION_DEPTH,
            lenient_templates: false,
        }
    }

    pub fn with_max_restriction_depth(mut self, depth: usize) -> Self {
        self.max_restriction_depth = depth;
        self
    }

    pub fn with_lenient_templates(mut self, lenient: bool) -> Self {
        self.lenient_templates = lenient;
        self
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self::new()
    }
}
