//! Capsize Vars - CSS Custom Property Bindings
//!
//! Binds trimmed text values to four CSS custom properties. One shared rule
//! reads the properties; each text style only assigns them, optionally with
//! different values per media query.

mod text_style;
mod vars;

pub use text_style::{StyleInput, TextStyle};
pub use vars::CapsizeVars;

use capsize_core::CapsizeError;

/// Build a stylesheet with the shared rule followed by every text style
pub fn stylesheet(vars: &CapsizeVars, base_class: &str, styles: &[TextStyle]) -> Result<String> {
    let mut css = vars.base_rule(base_class)?;
    for style in styles {
        css.push_str("\n\n");
        css.push_str(&style.to_css(vars));
    }
    Ok(css)
}

/// Binding error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VarsError {
    #[error(transparent)]
    Capsize(#[from] CapsizeError),

    #[error("Invalid class name: {0:?}")]
    InvalidClassName(String),

    #[error("Invalid custom property prefix: {0:?}")]
    InvalidPrefix(String),

    #[error("Empty media query for `.{0}`")]
    EmptyMediaQuery(String),

    #[error("Invalid media query: {0:?}")]
    InvalidMediaQuery(String),
}

pub type Result<T> = std::result::Result<T, VarsError>;

/// Class names are emitted unescaped, so only plain identifiers are accepted
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '-' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("heading"));
        assert!(is_identifier("text-lg_2"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("2xl"));
        assert!(!is_identifier("a b"));
        assert!(!is_identifier("a.b"));
    }
}
