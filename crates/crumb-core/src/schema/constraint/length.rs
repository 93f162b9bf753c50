use super::Constraint;

use crate::Result;

#[derive(Debug, Clone)]
pub struct ConstraintLength {
    /// The minimum length of the field.
    pub min: Option<u64>,

    /// The maximum length of the field.
    pub max: Option<u64>,
}

impl ConstraintLength {
    pub(crate) fn check(&self, attribute: &str, value: &str) -> Result<()> {
        let value_len = value.chars().count();
        let min = self.min.map(|m| m as usize);
        let max = self.max.map(|m| m as usize);

        if min.is_some_and(|min| value_len < min) || max.is_some_and(|max| value_len > max) {
            return Err(crate::Error::validation_length(attribute, value_len, min, max));
        }

        Ok(())
    }
}

impl From<ConstraintLength> for Constraint {
    fn from(length: ConstraintLength) -> Self {
        Constraint::Length(length)
    }
}
