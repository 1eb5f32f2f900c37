//! Font metric tables
//!
//! Metrics are supplied by the caller, usually deserialized from the camelCase
//! JSON tables published by font-metrics packages. All scale quantities are in
//! the font's own design units and must be divided by `units_per_em` before
//! they are compared with another font's metrics.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::{CapsizeError, Result};

/// Unicode subset used to weight the average character width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subset {
    #[default]
    Latin,
    Thai,
}

impl Subset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Latin => "latin",
            Self::Thai => "thai",
        }
    }
}

impl fmt::Display for Subset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subset {
    type Err = CapsizeError;

    fn from_str(tag: &str) -> Result<Self> {
        match tag {
            "latin" => Ok(Self::Latin),
            "thai" => Ok(Self::Thai),
            other => Err(CapsizeError::UnknownSubset(other.to_string())),
        }
    }
}

/// Subset-specific width metric
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubsetMetrics {
    /// Average glyph width weighted by character frequency in the subset
    pub x_width_avg: f64,
}

/// Metrics for a single font face
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontMetrics {
    /// Family name as authored by the font creator
    pub family_name: String,
    /// Full name, used first when matching a locally installed face
    #[serde(default)]
    pub full_name: Option<String>,
    /// Unique PostScript name
    #[serde(default)]
    pub postscript_name: Option<String>,
    /// serif, sans-serif, monospace, display or handwriting
    #[serde(default)]
    pub category: Option<String>,
    /// Height of the ascenders above baseline
    pub ascent: f64,
    /// Depth of the descenders below baseline (usually negative)
    pub descent: f64,
    /// Space the designer adds between lines
    #[serde(default)]
    pub line_gap: f64,
    /// Size of the font's internal coordinate grid
    pub units_per_em: f64,
    /// Height of capital letters above baseline
    #[serde(default)]
    pub cap_height: f64,
    /// Height of lower case letters above baseline
    #[serde(default)]
    pub x_height: f64,
    /// Average character width for the latin subset
    #[serde(default)]
    pub x_width_avg: Option<f64>,
    /// Average character width keyed by unicode subset tag
    #[serde(default)]
    pub subsets: Option<BTreeMap<String, SubsetMetrics>>,
}

impl FontMetrics {
    /// Metrics with the given family name and grid, everything else zeroed
    pub fn new(family_name: impl Into<String>, units_per_em: f64) -> Self {
        Self {
            family_name: family_name.into(),
            units_per_em,
            ..Default::default()
        }
    }

    pub fn with_full_name(mut self, name: impl Into<String>) -> Self {
        self.full_name = Some(name.into());
        self
    }

    pub fn with_postscript_name(mut self, name: impl Into<String>) -> Self {
        self.postscript_name = Some(name.into());
        self
    }

    /// Set ascent, descent and line gap in one go
    pub fn with_line_metrics(mut self, ascent: f64, descent: f64, line_gap: f64) -> Self {
        self.ascent = ascent;
        self.descent = descent;
        self.line_gap = line_gap;
        self
    }

    pub fn with_cap_height(mut self, cap_height: f64) -> Self {
        self.cap_height = cap_height;
        self
    }

    pub fn with_x_width_avg(mut self, x_width_avg: f64) -> Self {
        self.x_width_avg = Some(x_width_avg);
        self
    }

    pub fn with_subset(mut self, subset: Subset, x_width_avg: f64) -> Self {
        self.subsets
            .get_or_insert_with(BTreeMap::new)
            .insert(subset.as_str().to_string(), SubsetMetrics { x_width_avg });
        self
    }

    /// Convert a value in design units to a fraction of the em
    #[inline]
    pub fn scale(&self, value: f64) -> f64 {
        value / self.units_per_em
    }

    /// Magnitude of the descent
    #[inline]
    pub fn absolute_descent(&self) -> f64 {
        self.descent.abs()
    }

    /// Natural content area (ascent + line gap + |descent|)
    pub fn content_area(&self) -> f64 {
        self.ascent + self.line_gap + self.absolute_descent()
    }

    /// Width metric for a subset entry, if the table carries one
    pub fn subset(&self, subset: Subset) -> Option<&SubsetMetrics> {
        self.subsets.as_ref()?.get(subset.as_str())
    }

    /// Resolve the average character width for a unicode subset.
    ///
    /// Tables that predate per-subset widths only carry a top-level
    /// `xWidthAvg`, which is treated as the latin width. Any other subset
    /// must be present in `subsets`. A missing latin width resolves to zero.
    pub fn x_width_avg_for(&self, subset: Subset) -> Result<f64> {
        if let Some(entry) = self.subset(subset) {
            return Ok(entry.x_width_avg);
        }

        if subset != Subset::Latin {
            return Err(CapsizeError::SubsetUnavailable {
                subset,
                family: self.family_name.clone(),
            });
        }

        Ok(self.x_width_avg.unwrap_or(0.0))
    }
}
