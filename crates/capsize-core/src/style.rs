//! Style emitters
//!
//! Lays computed values out as a style object (root declarations plus
//! `::before` / `::after` rules) and serializes that object to a CSS string.

use crate::format::to_css_property;
use crate::metrics::FontMetrics;
use crate::options::SizingOptions;
use crate::precompute::{ComputedValues, precompute_values};
use crate::Result;

/// Which edge of the pseudo-element box carries the trim
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockMargin {
    /// `margin-block-start`
    Start(String),
    /// `margin-block-end`
    End(String),
}

/// Zero-content pseudo-element rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PseudoRule {
    pub content: String,
    pub margin: BlockMargin,
    /// Table boxes keep the negative margin from collapsing through
    pub display: String,
}

impl PseudoRule {
    fn new(margin: BlockMargin) -> Self {
        Self {
            content: "''".to_string(),
            margin,
            display: "table".to_string(),
        }
    }

    /// camelCase declarations in emission order
    pub fn declarations(&self) -> Vec<(&'static str, &str)> {
        let margin = match &self.margin {
            BlockMargin::Start(value) => ("marginBlockStart", value.as_str()),
            BlockMargin::End(value) => ("marginBlockEnd", value.as_str()),
        };
        vec![("content", self.content.as_str()), margin, ("display", self.display.as_str())]
    }
}

/// Style object for a trimmed text box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleObject {
    pub font_size: String,
    pub line_height: String,
    pub before: PseudoRule,
    pub after: PseudoRule,
}

impl StyleObject {
    /// Run the trim computation and lay the result out
    pub fn from_options(options: &SizingOptions, metrics: &FontMetrics) -> Result<Self> {
        Ok(create_style_object(&precompute_values(options, metrics)?))
    }

    /// camelCase root declarations in emission order
    pub fn declarations(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("fontSize", self.font_size.as_str()),
            ("lineHeight", self.line_height.as_str()),
        ]
    }
}

impl From<&ComputedValues> for StyleObject {
    fn from(values: &ComputedValues) -> Self {
        create_style_object(values)
    }
}

/// Lay computed (or variable-reference) values out as a style object
pub fn create_style_object(values: &ComputedValues) -> StyleObject {
    StyleObject {
        font_size: values.font_size.clone(),
        line_height: values.line_height.clone(),
        before: PseudoRule::new(BlockMargin::End(values.cap_height_trim.clone())),
        after: PseudoRule::new(BlockMargin::Start(values.baseline_trim.clone())),
    }
}

/// Serialize a style object as three rules under `.{rule_name}`
pub fn create_style_string(rule_name: &str, style: &StyleObject) -> String {
    [
        css_rule(rule_name, None, &style.declarations()),
        css_rule(rule_name, Some("before"), &style.before.declarations()),
        css_rule(rule_name, Some("after"), &style.after.declarations()),
    ]
    .join("\n")
}

fn css_rule(rule_name: &str, pseudo: Option<&str>, declarations: &[(&str, &str)]) -> String {
    let selector = match pseudo {
        Some(pseudo) => format!(".{rule_name}::{pseudo}"),
        None => format!(".{rule_name}"),
    };
    let body = declarations
        .iter()
        .map(|(property, value)| {
            format!("  {}: {}", to_css_property(property), value.replace('\'', "\""))
        })
        .collect::<Vec<_>>()
        .join(";\n");
    format!("\n{selector} {{\n{body};\n}}")
}
