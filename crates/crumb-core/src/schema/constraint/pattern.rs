use super::Constraint;

use crate::{Error, Result};

use regex::Regex;

/// Requires a String attribute to match a regular expression.
#[derive(Debug, Clone)]
pub struct ConstraintPattern {
    regex: Regex,
}

impl ConstraintPattern {
    /// Compiles `pattern`. An invalid expression is a schema error.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| Error::invalid_schema(format!("invalid pattern `{pattern}`: {e}")))?;
        Ok(Self { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub(crate) fn check(&self, attribute: &str, value: &str) -> Result<()> {
        if self.regex.is_match(value) {
            Ok(())
        } else {
            Err(Error::validation_pattern(attribute, self.regex.as_str()))
        }
    }
}

impl From<ConstraintPattern> for Constraint {
    fn from(pattern: ConstraintPattern) -> Self {
        Constraint::Pattern(pattern)
    }
}
