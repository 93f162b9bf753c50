use super::Constraint;

use crate::Result;

/// Inclusive numeric bounds for Integer and Float attributes.
#[derive(Debug, Clone)]
pub struct ConstraintRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ConstraintRange {
    pub(crate) fn check(&self, attribute: &str, value: f64) -> Result<()> {
        if self.min.is_some_and(|min| value < min) || self.max.is_some_and(|max| value > max) {
            return Err(crate::Error::validation_range(
                attribute, value, self.min, self.max,
            ));
        }

        Ok(())
    }
}

impl From<ConstraintRange> for Constraint {
    fn from(range: ConstraintRange) -> Self {
        Constraint::Range(range)
    }
}
