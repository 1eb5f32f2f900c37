//! Sizing options
//!
//! Callers describe the text box with one size axis (font size or cap height)
//! and at most one line-height axis (leading or line gap). [`SizingOptions`]
//! is the loose, deserializable form; [`SizingSpec`] is the validated form
//! with exactly one variant per axis.

use serde::Deserialize;

use crate::{CapsizeError, Result};

/// Size axis: what the caller pinned the text size to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeAxis {
    /// Font size in pixels
    FontSize(f64),
    /// Height of capital letters in pixels
    CapHeight(f64),
}

/// Line-height axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineHeightAxis {
    /// Absolute line height in pixels
    Leading(f64),
    /// Space between lines of capitals, in pixels
    LineGap(f64),
}

/// Validated sizing input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingSpec {
    pub size: SizeAxis,
    /// `None` keeps the font's natural line height
    pub line_height: Option<LineHeightAxis>,
}

impl SizingSpec {
    pub fn font_size(font_size: f64) -> Self {
        Self {
            size: SizeAxis::FontSize(font_size),
            line_height: None,
        }
    }

    pub fn cap_height(cap_height: f64) -> Self {
        Self {
            size: SizeAxis::CapHeight(cap_height),
            line_height: None,
        }
    }

    pub fn leading(mut self, leading: f64) -> Self {
        self.line_height = Some(LineHeightAxis::Leading(leading));
        self
    }

    pub fn line_gap(mut self, line_gap: f64) -> Self {
        self.line_height = Some(LineHeightAxis::LineGap(line_gap));
        self
    }
}

/// Unvalidated sizing input, as supplied in configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizingOptions {
    pub font_size: Option<f64>,
    pub cap_height: Option<f64>,
    pub leading: Option<f64>,
    pub line_gap: Option<f64>,
}

impl SizingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = Some(font_size);
        self
    }

    pub fn with_cap_height(mut self, cap_height: f64) -> Self {
        self.cap_height = Some(cap_height);
        self
    }

    pub fn with_leading(mut self, leading: f64) -> Self {
        self.leading = Some(leading);
        self
    }

    pub fn with_line_gap(mut self, line_gap: f64) -> Self {
        self.line_gap = Some(line_gap);
        self
    }

    /// Check that exactly one size axis and at most one line-height axis
    /// were supplied.
    pub fn normalise(&self) -> Result<SizingSpec> {
        let line_height = match (self.leading, self.line_gap) {
            (Some(_), Some(_)) => return Err(CapsizeError::ConflictingLineHeight),
            (Some(leading), None) => Some(LineHeightAxis::Leading(leading)),
            (None, Some(line_gap)) => Some(LineHeightAxis::LineGap(line_gap)),
            (None, None) => None,
        };

        let size = match (self.cap_height, self.font_size) {
            (Some(_), Some(_)) => return Err(CapsizeError::ConflictingSize),
            (Some(cap_height), None) => SizeAxis::CapHeight(cap_height),
            (None, Some(font_size)) => SizeAxis::FontSize(font_size),
            (None, None) => return Err(CapsizeError::MissingSize),
        };

        Ok(SizingSpec { size, line_height })
    }
}

impl TryFrom<SizingOptions> for SizingSpec {
    type Error = CapsizeError;

    fn try_from(options: SizingOptions) -> Result<Self> {
        options.normalise()
    }
}

impl From<SizingSpec> for SizingOptions {
    fn from(spec: SizingSpec) -> Self {
        let mut options = SizingOptions::default();
        match spec.size {
            SizeAxis::FontSize(v) => options.font_size = Some(v),
            SizeAxis::CapHeight(v) => options.cap_height = Some(v),
        }
        match spec.line_height {
            Some(LineHeightAxis::Leading(v)) => options.leading = Some(v),
            Some(LineHeightAxis::LineGap(v)) => options.line_gap = Some(v),
            None => {}
        }
        options
    }
}
