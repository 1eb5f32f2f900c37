//! Capsize Core - Text Trimming Engine
//!
//! This crate turns font metric tables into CSS values:
//! - Font size, line height and cap-height/baseline trims (precompute)
//! - Style objects and CSS strings for the trimmed text box
//! - Fallback font stacks with `size-adjust` and metric overrides
//!
//! Everything here is a pure function of its inputs.

pub mod font_stack;
pub mod format;
pub mod metrics;
pub mod options;
pub mod precompute;
pub mod style;

pub use font_stack::{
    FontFace, FontFaceFormat, FontFaces, FontStack, FontStackOptions, OverrideValues,
    calculate_override_values, compose, create_font_stack,
};
pub use format::{quote_if_needed, to_css_property};
pub use metrics::{FontMetrics, Subset, SubsetMetrics};
pub use options::{LineHeightAxis, SizeAxis, SizingOptions, SizingSpec};
pub use precompute::{ComputedValues, compute, get_cap_height, precompute_values};
pub use style::{BlockMargin, PseudoRule, StyleObject, create_style_object, create_style_string};

/// Configuration error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CapsizeError {
    #[error(
        "Only a single line height style can be provided. Please pass either `lineGap` OR `leading`."
    )]
    ConflictingLineHeight,

    #[error("Please pass either `capHeight` OR `fontSize`, not both.")]
    ConflictingSize,

    #[error("Please pass either `capHeight` OR `fontSize`.")]
    MissingSize,

    #[error("The subset \"{subset}\" is not available in the metrics provided for \"{family}\"")]
    SubsetUnavailable { subset: Subset, family: String },

    #[error("Unknown unicode subset: {0}")]
    UnknownSubset(String),

    #[error("Invalid size-adjust value: {0}")]
    InvalidSizeAdjust(String),

    #[error("The `{0}` property is generated and cannot be passed as a font-face property")]
    ReservedFontFaceProperty(String),

    #[error("A font stack needs at least the preferred font's metrics")]
    MissingPreferredFont,
}

pub type Result<T> = std::result::Result<T, CapsizeError>;
