use super::Error;

/// Error when a value fails an attribute's validator chain.
#[derive(Debug)]
pub(super) struct ValidationError {
    attribute: Box<str>,
    kind: ValidationErrorKind,
}

#[derive(Debug)]
enum ValidationErrorKind {
    /// String length constraint violation
    Length {
        value_len: usize,
        min: Option<usize>,
        max: Option<usize>,
    },

    /// Numeric range constraint violation
    Range {
        value: f64,
        min: Option<f64>,
        max: Option<f64>,
    },

    /// String did not match the required pattern
    Pattern { pattern: Box<str> },

    /// Explicit null assigned to a non-nullable attribute
    Null,
}

impl std::error::Error for ValidationError {}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "validation failed for `{}`: ", self.attribute)?;

        match &self.kind {
            ValidationErrorKind::Length {
                value_len,
                min,
                max,
            } => {
                // If min and max are the same, show exact length requirement
                if let (Some(min), Some(max)) = (min, max) {
                    if min == max {
                        return write!(
                            f,
                            "value length {} does not match required length {}",
                            value_len, min
                        );
                    }
                }

                match (min, max) {
                    (Some(min), _) if value_len < min => write!(
                        f,
                        "value length {} is too short (minimum: {})",
                        value_len, min
                    ),
                    (_, Some(max)) if value_len > max => write!(
                        f,
                        "value length {} is too long (maximum: {})",
                        value_len, max
                    ),
                    _ => f.write_str("length constraint violation"),
                }
            }
            ValidationErrorKind::Range { value, min, max } => match (min, max) {
                (Some(min), _) if value < min => {
                    write!(f, "value {} is less than minimum {}", value, min)
                }
                (_, Some(max)) if value > max => {
                    write!(f, "value {} is greater than maximum {}", value, max)
                }
                _ => f.write_str("range constraint violation"),
            },
            ValidationErrorKind::Pattern { pattern } => {
                write!(f, "value does not match pattern `{}`", pattern)
            }
            ValidationErrorKind::Null => f.write_str("value must not be null"),
        }
    }
}

impl Error {
    pub fn validation_length(
        attribute: &str,
        value_len: usize,
        min: Option<usize>,
        max: Option<usize>,
    ) -> Error {
        Error::validation(
            attribute,
            ValidationErrorKind::Length {
                value_len,
                min,
                max,
            },
        )
    }

    pub fn validation_range(
        attribute: &str,
        value: f64,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Error {
        Error::validation(attribute, ValidationErrorKind::Range { value, min, max })
    }

    pub fn validation_pattern(attribute: &str, pattern: &str) -> Error {
        Error::validation(
            attribute,
            ValidationErrorKind::Pattern {
                pattern: pattern.into(),
            },
        )
    }

    pub fn validation_null(attribute: &str) -> Error {
        Error::validation(attribute, ValidationErrorKind::Null)
    }

    fn validation(attribute: &str, kind: ValidationErrorKind) -> Error {
        Error::from(super::ErrorKind::Validation(ValidationError {
            attribute: attribute.into(),
            kind,
        }))
    }

    /// Returns `true` if this error is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self.root().kind(), super::ErrorKind::Validation(_))
    }
}
