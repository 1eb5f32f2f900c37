//! Custom property names

use capsize_core::{ComputedValues, create_style_object, create_style_string};

use crate::{Result, VarsError, is_identifier};

/// Default custom property prefix
pub const DEFAULT_PREFIX: &str = "capsize";

/// Names of the four custom properties a text style assigns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapsizeVars {
    prefix: String,
}

impl Default for CapsizeVars {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl CapsizeVars {
    pub fn new(prefix: &str) -> Result<Self> {
        if !is_identifier(prefix) {
            return Err(VarsError::InvalidPrefix(prefix.to_string()));
        }
        Ok(Self {
            prefix: prefix.to_string(),
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn name(&self, key: &str) -> String {
        format!("--{}-{}", self.prefix, key)
    }

    pub fn font_size(&self) -> String {
        self.name("font-size")
    }

    pub fn line_height(&self) -> String {
        self.name("line-height")
    }

    pub fn cap_height_trim(&self) -> String {
        self.name("cap-height-trim")
    }

    pub fn baseline_trim(&self) -> String {
        self.name("baseline-trim")
    }

    /// `var()` references in place of computed values
    pub fn references(&self) -> ComputedValues {
        ComputedValues::new(
            format!("var({})", self.font_size()),
            format!("var({})", self.line_height()),
            format!("var({})", self.cap_height_trim()),
            format!("var({})", self.baseline_trim()),
        )
    }

    /// Custom property declarations assigning `values`
    pub fn assign(&self, values: &ComputedValues) -> Vec<(String, String)> {
        vec![
            (self.font_size(), values.font_size.clone()),
            (self.line_height(), values.line_height.clone()),
            (self.cap_height_trim(), values.cap_height_trim.clone()),
            (self.baseline_trim(), values.baseline_trim.clone()),
        ]
    }

    /// The shared rule that reads the custom properties
    pub fn base_rule(&self, class_name: &str) -> Result<String> {
        if !is_identifier(class_name) {
            return Err(VarsError::InvalidClassName(class_name.to_string()));
        }
        let style = create_style_object(&self.references());
        Ok(create_style_string(class_name, &style))
    }
}
