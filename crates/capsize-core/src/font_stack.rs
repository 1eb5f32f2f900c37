//! Fallback font stacks
//!
//! For each fallback font a synthesized `@font-face` rule points at the locally
//! installed face and overrides its `size-adjust`, `ascent-override`,
//! `descent-override` and `line-gap-override` so that it occupies the same box
//! as the preferred font. The synthesized families come before the real
//! fallback families in the resulting `font-family` list.

use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;

use crate::format::{
    from_percent_string, is_truthy, quote_if_needed, to_css_property, to_percent_string,
};
use crate::metrics::{FontMetrics, Subset};
use crate::{CapsizeError, Result};

/// Descriptors generated here and therefore not accepted from callers
const RESERVED_PROPERTIES: [&str; 5] = [
    "src",
    "fontFamily",
    "ascentOverride",
    "descentOverride",
    "lineGapOverride",
];

/// Output shape for the generated `@font-face` rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FontFaceFormat {
    /// One CSS string containing every rule
    #[default]
    StyleString,
    /// Structured rules for CSS-in-JS style consumers
    StyleObject,
}

/// Font stack configuration
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FontStackOptions {
    /// Subset whose character frequencies weight the average width
    pub subset: Subset,
    /// Extra camelCase `@font-face` descriptors, in emission order.
    /// A `sizeAdjust` entry replaces the calculated size adjustment.
    #[serde(deserialize_with = "ordered_properties")]
    pub font_face_properties: Vec<(String, String)>,
    pub font_face_format: FontFaceFormat,
}

impl FontStackOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subset(mut self, subset: Subset) -> Self {
        self.subset = subset;
        self
    }

    pub fn with_font_face_property(
        mut self,
        property: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.font_face_properties.push((property.into(), value.into()));
        self
    }

    pub fn with_size_adjust(self, size_adjust: impl Into<String>) -> Self {
        self.with_font_face_property("sizeAdjust", size_adjust)
    }

    pub fn with_format(mut self, format: FontFaceFormat) -> Self {
        self.font_face_format = format;
        self
    }

    /// Split out the size-adjust override and reject generated descriptors
    fn resolve(&self) -> Result<(Option<f64>, Vec<(String, String)>)> {
        let mut size_adjust = None;
        let mut properties = Vec::with_capacity(self.font_face_properties.len());

        for (property, value) in &self.font_face_properties {
            if RESERVED_PROPERTIES.contains(&property.as_str()) {
                return Err(CapsizeError::ReservedFontFaceProperty(property.clone()));
            }
            if property == "sizeAdjust" {
                // An empty override falls back to the calculated value
                size_adjust = if value.is_empty() {
                    None
                } else {
                    let parsed = from_percent_string(value)
                        .ok_or_else(|| CapsizeError::InvalidSizeAdjust(value.clone()))?;
                    Some(parsed)
                };
                continue;
            }
            properties.push((property.clone(), value.clone()));
        }

        Ok((size_adjust, properties))
    }
}

fn ordered_properties<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct PropertiesVisitor;

    impl<'de> Visitor<'de> for PropertiesVisitor {
        type Value = Vec<(String, String)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of font-face descriptors to string values")
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut properties = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, String>()? {
                properties.push(entry);
            }
            Ok(properties)
        }
    }

    deserializer.deserialize_map(PropertiesVisitor)
}

/// Metric overrides for one fallback face, formatted as percentages.
///
/// A descriptor is `None` when emitting it would not change anything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OverrideValues {
    pub ascent_override: Option<String>,
    pub descent_override: Option<String>,
    pub line_gap_override: Option<String>,
    pub size_adjust: Option<String>,
}

impl OverrideValues {
    /// Present descriptors as camelCase pairs, in emission order
    pub fn declarations(&self) -> Vec<(&'static str, &str)> {
        [
            ("ascentOverride", &self.ascent_override),
            ("descentOverride", &self.descent_override),
            ("lineGapOverride", &self.line_gap_override),
            ("sizeAdjust", &self.size_adjust),
        ]
        .into_iter()
        .filter_map(|(property, value)| value.as_deref().map(|value| (property, value)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations().is_empty()
    }
}

/// Compute the overrides that make `fallback` occupy the box of `preferred`.
///
/// `size_adjust` replaces the ratio derived from the subset's average
/// character widths.
pub fn calculate_override_values(
    preferred: &FontMetrics,
    fallback: &FontMetrics,
    subset: Subset,
    size_adjust: Option<f64>,
) -> Result<OverrideValues> {
    let preferred_ratio = preferred.x_width_avg_for(subset)? / preferred.units_per_em;
    let fallback_ratio = fallback.x_width_avg_for(subset)? / fallback.units_per_em;

    let calculated_size_adjust = if is_truthy(preferred_ratio) && is_truthy(fallback_ratio) {
        preferred_ratio / fallback_ratio
    } else {
        1.0
    };
    let size_adjust = size_adjust.unwrap_or(calculated_size_adjust);

    // Both fonts are measured on the preferred grid at the rendered scale
    let adjusted_grid = preferred.units_per_em * size_adjust;

    let ascent = preferred.ascent / adjusted_grid;
    let descent = preferred.absolute_descent() / adjusted_grid;
    let line_gap = preferred.line_gap / adjusted_grid;

    let fallback_ascent = fallback.ascent / adjusted_grid;
    let fallback_descent = fallback.absolute_descent() / adjusted_grid;
    let fallback_line_gap = fallback.line_gap / adjusted_grid;

    let mut overrides = OverrideValues::default();
    if is_truthy(ascent) && ascent != fallback_ascent {
        overrides.ascent_override = Some(to_percent_string(ascent));
    }
    if is_truthy(descent) && descent != fallback_descent {
        overrides.descent_override = Some(to_percent_string(descent));
    }
    // Zero against a non-zero gap is still an override
    if line_gap != fallback_line_gap {
        overrides.line_gap_override = Some(to_percent_string(line_gap));
    }
    if is_truthy(size_adjust) && size_adjust != 1.0 {
        overrides.size_adjust = Some(to_percent_string(size_adjust));
    }

    tracing::debug!(
        preferred = %preferred.family_name,
        fallback = %fallback.family_name,
        %subset,
        size_adjust,
        ?overrides,
        "calculated fallback overrides"
    );

    Ok(overrides)
}

/// `local()` sources for a fallback face: full name, then PostScript name,
/// then the family name when neither is known.
pub fn resolve_local_fallback_source(metrics: &FontMetrics) -> String {
    let mut sources = Vec::with_capacity(2);

    if let Some(full_name) = metrics.full_name.as_deref().filter(|name| !name.is_empty()) {
        sources.push(format!("local('{full_name}')"));
    }

    let postscript_name = metrics
        .postscript_name
        .as_deref()
        .filter(|name| !name.is_empty() && metrics.full_name.as_deref() != Some(*name));
    if let Some(postscript_name) = postscript_name {
        sources.push(format!("local('{postscript_name}')"));
    }

    if sources.is_empty() {
        return format!("local('{}')", metrics.family_name);
    }

    sources.join(", ")
}

/// A synthesized `@font-face` rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFace {
    /// Quoted family name
    pub font_family: String,
    pub src: String,
    /// Caller-supplied descriptors
    pub properties: Vec<(String, String)>,
    pub overrides: OverrideValues,
}

impl FontFace {
    /// All descriptors as camelCase pairs, in emission order
    pub fn declarations(&self) -> Vec<(&str, &str)> {
        let mut declarations = vec![
            ("fontFamily", self.font_family.as_str()),
            ("src", self.src.as_str()),
        ];
        declarations.extend(self.properties.iter().map(|(p, v)| (p.as_str(), v.as_str())));
        declarations.extend(self.overrides.declarations());
        declarations
    }

    pub fn to_css(&self) -> String {
        let mut lines = vec![
            "@font-face {".to_string(),
            format!("  font-family: {};", quote_if_needed(&self.font_family)),
            format!("  src: {};", self.src),
        ];
        for (property, value) in self.declarations().into_iter().skip(2) {
            lines.push(format!("  {}: {};", to_css_property(property), value));
        }
        lines.push("}".to_string());
        lines.join("\n")
    }
}

impl fmt::Display for FontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// Generated rules in the requested format
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontFaces {
    StyleString(String),
    StyleObject(Vec<FontFace>),
}

/// A `font-family` value and the rules backing its synthesized families
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontStack {
    pub font_family: String,
    pub font_faces: FontFaces,
}

/// Build a stack from `[preferred, fallback...]` metrics
pub fn create_font_stack(metrics: &[FontMetrics], options: &FontStackOptions) -> Result<FontStack> {
    let (preferred, fallbacks) = metrics.split_first().ok_or(CapsizeError::MissingPreferredFont)?;
    compose(preferred, fallbacks, options)
}

/// Build a stack for a preferred font and its fallbacks
pub fn compose(
    preferred: &FontMetrics,
    fallbacks: &[FontMetrics],
    options: &FontStackOptions,
) -> Result<FontStack> {
    let (size_adjust, properties) = options.resolve()?;
    let family_name = &preferred.family_name;

    let mut font_families = Vec::with_capacity(1 + fallbacks.len() * 2);
    font_families.push(quote_if_needed(family_name));

    let mut font_faces = Vec::with_capacity(fallbacks.len());
    for fallback in fallbacks {
        let font_family = if fallbacks.len() > 1 {
            quote_if_needed(&format!("{family_name} Fallback: {}", fallback.family_name))
        } else {
            quote_if_needed(&format!("{family_name} Fallback"))
        };

        font_families.push(font_family.clone());
        font_faces.push(FontFace {
            font_family,
            src: resolve_local_fallback_source(fallback),
            properties: properties.clone(),
            overrides: calculate_override_values(preferred, fallback, options.subset, size_adjust)?,
        });
    }

    // The real fallbacks stay as a last resort, without overrides
    font_families.extend(fallbacks.iter().map(|fallback| quote_if_needed(&fallback.family_name)));

    let font_faces = match options.font_face_format {
        FontFaceFormat::StyleString => FontFaces::StyleString(
            font_faces.iter().map(FontFace::to_css).collect::<Vec<_>>().join("\n"),
        ),
        FontFaceFormat::StyleObject => FontFaces::StyleObject(font_faces),
    };

    Ok(FontStack {
        font_family: font_families.join(", "),
        font_faces,
    })
}
