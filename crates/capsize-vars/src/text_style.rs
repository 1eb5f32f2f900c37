//! Text styles
//!
//! A text style assigns the custom properties for one class, with optional
//! media query variants. Every variant is computed on its own.

use capsize_core::{ComputedValues, FontMetrics, SizingOptions, SizingSpec, precompute_values};

use crate::vars::CapsizeVars;
use crate::{Result, VarsError, is_identifier};

/// Values for a style or one of its variants
#[derive(Debug, Clone, PartialEq)]
pub enum StyleInput {
    /// Already computed (or hand written) values
    Computed(ComputedValues),
    /// Options to run through the trim computation
    Sizing {
        options: SizingOptions,
        metrics: FontMetrics,
    },
}

impl StyleInput {
    pub fn sizing(options: impl Into<SizingOptions>, metrics: &FontMetrics) -> Self {
        Self::Sizing {
            options: options.into(),
            metrics: metrics.clone(),
        }
    }

    fn resolve(&self) -> Result<ComputedValues> {
        match self {
            Self::Computed(values) => Ok(values.clone()),
            Self::Sizing { options, metrics } => Ok(precompute_values(options, metrics)?),
        }
    }
}

impl From<ComputedValues> for StyleInput {
    fn from(values: ComputedValues) -> Self {
        Self::Computed(values)
    }
}

impl From<(SizingSpec, &FontMetrics)> for StyleInput {
    fn from((spec, metrics): (SizingSpec, &FontMetrics)) -> Self {
        Self::sizing(spec, metrics)
    }
}

/// Custom property assignments for one class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextStyle {
    class_name: String,
    values: ComputedValues,
    media: Vec<(String, ComputedValues)>,
}

impl TextStyle {
    pub fn new(class_name: &str, input: impl Into<StyleInput>) -> Result<Self> {
        if !is_identifier(class_name) {
            return Err(VarsError::InvalidClassName(class_name.to_string()));
        }
        let values = input.into().resolve()?;
        tracing::debug!(class_name, ?values, "bound text style");
        Ok(Self {
            class_name: class_name.to_string(),
            values,
            media: Vec::new(),
        })
    }

    /// Add a variant applied under `query`, e.g. `(min-width: 768px)`
    pub fn media(mut self, query: &str, input: impl Into<StyleInput>) -> Result<Self> {
        let query = query.trim();
        let query = query.strip_prefix("@media").map_or(query, str::trim_start);
        if query.is_empty() {
            return Err(VarsError::EmptyMediaQuery(self.class_name));
        }
        if !is_media_prelude(query) {
            return Err(VarsError::InvalidMediaQuery(query.to_string()));
        }
        let values = input.into().resolve()?;
        tracing::debug!(
            class_name = %self.class_name,
            query,
            ?values,
            "bound media variant"
        );
        self.media.push((query.to_string(), values));
        Ok(self)
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn values(&self) -> &ComputedValues {
        &self.values
    }

    pub fn media_queries(&self) -> &[(String, ComputedValues)] {
        &self.media
    }

    pub fn to_css(&self, vars: &CapsizeVars) -> String {
        let mut blocks = vec![assignment_rule(&self.class_name, vars, &self.values, "")];
        for (query, values) in &self.media {
            blocks.push(format!(
                "@media {query} {{\n{}\n}}",
                assignment_rule(&self.class_name, vars, values, "  ")
            ));
        }
        blocks.join("\n")
    }
}

/// Queries are emitted unescaped, so nothing that could end the `@media`
/// prelude early is accepted
fn is_media_prelude(query: &str) -> bool {
    !query.contains(['{', '}', ';']) && !query.contains("/*")
}

fn assignment_rule(
    class_name: &str,
    vars: &CapsizeVars,
    values: &ComputedValues,
    indent: &str,
) -> String {
    let mut lines = vec![format!("{indent}.{class_name} {{")];
    for (name, value) in vars.assign(values) {
        lines.push(format!("{indent}  {name}: {value};"));
    }
    lines.push(format!("{indent}}}"));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values() -> ComputedValues {
        ComputedValues::new("16px", "24px", "-0.3em", "-0.35em")
    }

    #[test]
    fn test_assignment_css() {
        let style = TextStyle::new("body-text", values()).unwrap();
        assert_eq!(
            style.to_css(&CapsizeVars::default()),
            ".body-text {\n  \
             --capsize-font-size: 16px;\n  \
             --capsize-line-height: 24px;\n  \
             --capsize-cap-height-trim: -0.3em;\n  \
             --capsize-baseline-trim: -0.35em;\n\
             }"
        );
    }

    #[test]
    fn test_media_variant_indented() {
        let style = TextStyle::new("body-text", values())
            .unwrap()
            .media(
                "@media (min-width: 768px)",
                ComputedValues::new("18px", "28px", "-0.31em", "-0.36em"),
            )
            .unwrap();
        assert_eq!(style.media_queries()[0].0, "(min-width: 768px)");
        let css = style.to_css(&CapsizeVars::default());
        assert!(css.contains(
            "@media (min-width: 768px) {\n  .body-text {\n    --capsize-font-size: 18px;"
        ));
        assert!(css.ends_with("    --capsize-baseline-trim: -0.36em;\n  }\n}"));
    }

    #[test]
    fn test_empty_media_query() {
        let result = TextStyle::new("body-text", values()).unwrap().media("  ", values());
        assert_eq!(result, Err(VarsError::EmptyMediaQuery("body-text".to_string())));
    }

    #[test]
    fn test_media_query_cannot_close_block() {
        let style = TextStyle::new("body-text", values()).unwrap();
        for query in [
            "(min-width: 1px) { } .other {",
            "print }",
            "screen; .other { color: red }",
            "screen /* (min-width: 1px)",
        ] {
            assert_eq!(
                style.clone().media(query, values()),
                Err(VarsError::InvalidMediaQuery(query.to_string()))
            );
        }
        assert!(style.media("screen and (min-width: 1px), print", values()).is_ok());
    }
}
