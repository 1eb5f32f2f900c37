//! Trim computation
//!
//! Derives the font size, line height and the two pseudo-element margins that
//! pull the line box in to the cap height and the baseline.

use serde::{Deserialize, Serialize};

use crate::format::{is_truthy, round, to_em, to_px};
use crate::metrics::FontMetrics;
use crate::options::{LineHeightAxis, SizeAxis, SizingOptions, SizingSpec};
use crate::Result;

/// Line height emitted when none was requested
pub const NORMAL_LINE_HEIGHT: &str = "normal";

/// Formatted CSS values for a trimmed text box
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedValues {
    /// e.g. `16px`
    pub font_size: String,
    /// e.g. `24px`, or `normal`
    pub line_height: String,
    /// Margin above the text, e.g. `-0.2684em`
    pub cap_height_trim: String,
    /// Margin below the text
    pub baseline_trim: String,
}

impl ComputedValues {
    pub fn new(
        font_size: impl Into<String>,
        line_height: impl Into<String>,
        cap_height_trim: impl Into<String>,
        baseline_trim: impl Into<String>,
    ) -> Self {
        Self {
            font_size: font_size.into(),
            line_height: line_height.into(),
            cap_height_trim: cap_height_trim.into(),
            baseline_trim: baseline_trim.into(),
        }
    }
}

/// Validate loose options and compute the trimmed values
pub fn precompute_values(
    options: &SizingOptions,
    metrics: &FontMetrics,
) -> Result<ComputedValues> {
    let spec = options.normalise()?;
    Ok(compute(&spec, metrics))
}

/// Compute the trimmed values for a validated spec
pub fn compute(spec: &SizingSpec, metrics: &FontMetrics) -> ComputedValues {
    if metrics.units_per_em.is_nan() || metrics.units_per_em <= 0.0 {
        tracing::warn!(
            family = %metrics.family_name,
            units_per_em = metrics.units_per_em,
            "unitsPerEm is not positive, trims will be meaningless"
        );
    }

    let cap_height_scale = metrics.scale(metrics.cap_height);

    let (font_size, cap_height) = match spec.size {
        SizeAxis::CapHeight(cap_height) => (cap_height / cap_height_scale, cap_height),
        SizeAxis::FontSize(font_size) => (font_size, font_size * cap_height_scale),
    };

    // A zero line height means the same as none at all
    let line_height = match spec.line_height {
        Some(LineHeightAxis::LineGap(line_gap)) => Some(cap_height + line_gap),
        Some(LineHeightAxis::Leading(leading)) => Some(leading),
        None => None,
    }
    .filter(|line_height| is_truthy(*line_height));

    let descent_scale = metrics.scale(metrics.absolute_descent());
    let ascent_scale = metrics.scale(metrics.ascent);
    let line_gap_scale = metrics.scale(metrics.line_gap);
    let line_height_scale = metrics.scale(metrics.content_area());
    let natural_line_height = line_height_scale * font_size;

    // Spread any difference from the natural line height evenly above and below
    let allow_for_line_height = |trim: f64| match line_height {
        Some(line_height) => {
            let offset = (natural_line_height - line_height) / 2.0;
            trim - offset / font_size
        }
        None => trim,
    };

    let cap_height_trim =
        -allow_for_line_height(ascent_scale - cap_height_scale + line_gap_scale / 2.0);
    let baseline_trim = -allow_for_line_height(descent_scale + line_gap_scale / 2.0);

    tracing::debug!(
        family = %metrics.family_name,
        font_size,
        ?line_height,
        cap_height_trim,
        baseline_trim,
        "computed trims"
    );

    ComputedValues {
        font_size: to_px(font_size),
        line_height: line_height.map_or_else(|| NORMAL_LINE_HEIGHT.to_string(), to_px),
        cap_height_trim: to_em(cap_height_trim),
        baseline_trim: to_em(baseline_trim),
    }
}

/// Rendered cap height in pixels for a font size
pub fn get_cap_height(font_size: f64, metrics: &FontMetrics) -> f64 {
    round(font_size * metrics.cap_height / metrics.units_per_em)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CapsizeError;

    fn test_metrics() -> FontMetrics {
        FontMetrics::new("Test Sans", 1000.0)
            .with_line_metrics(950.0, -250.0, 0.0)
            .with_cap_height(700.0)
    }

    #[test]
    fn test_font_size_natural_line_height() {
        let values = compute(&SizingSpec::font_size(100.0), &test_metrics());
        assert_eq!(values, ComputedValues::new("100px", "normal", "-0.25em", "-0.25em"));
    }

    #[test]
    fn test_leading_adds_space_evenly() {
        let values = compute(&SizingSpec::font_size(100.0).leading(140.0), &test_metrics());
        assert_eq!(values, ComputedValues::new("100px", "140px", "-0.35em", "-0.35em"));
    }

    #[test]
    fn test_line_gap_between_capitals() {
        // cap height 70 + gap 30 gives a 100px line, 20px tighter than natural
        let values = compute(&SizingSpec::font_size(100.0).line_gap(30.0), &test_metrics());
        assert_eq!(values, ComputedValues::new("100px", "100px", "-0.15em", "-0.15em"));
    }

    #[test]
    fn test_cap_height_axis() {
        let values = compute(&SizingSpec::cap_height(35.0), &test_metrics());
        assert_eq!(values.font_size, "50px");
        assert_eq!(values.cap_height_trim, "-0.25em");
    }

    #[test]
    fn test_trim_halfway_rounds_away_from_zero() {
        // 64 units above the cap height on a 2048 grid is exactly 1/32em
        let metrics = FontMetrics::new("Test Grotesk", 2048.0)
            .with_line_metrics(1500.0, -512.0, 0.0)
            .with_cap_height(1436.0);
        let values = compute(&SizingSpec::font_size(100.0), &metrics);
        assert_eq!(values, ComputedValues::new("100px", "normal", "-0.0313em", "-0.25em"));
    }

    #[test]
    fn test_zero_leading_is_natural() {
        let values = compute(&SizingSpec::font_size(100.0).leading(0.0), &test_metrics());
        assert_eq!(values.line_height, "normal");
        assert_eq!(values.baseline_trim, "-0.25em");
    }

    #[test]
    fn test_precompute_rejects_conflicts() {
        let options = SizingOptions::new().with_font_size(10.0).with_cap_height(7.0);
        assert_eq!(
            precompute_values(&options, &test_metrics()),
            Err(CapsizeError::ConflictingSize)
        );
    }

    #[test]
    fn test_get_cap_height() {
        assert_eq!(get_cap_height(100.0, &test_metrics()), 70.0);
        assert_eq!(get_cap_height(13.0, &test_metrics()), 9.1);
    }
}
