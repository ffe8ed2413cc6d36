/// Rejection of a request parameter at the HTTP boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid {field} '{value}': expected one of {expected}")]
    InvalidValue {
        field: &'static str,
        value: String,
        expected: String,
    },
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

impl ValidationError {
    pub(crate) fn invalid(field: &'static str, value: &str, allowed: &[&str]) -> Self {
        Self::InvalidValue {
            field,
            value: value.to_string(),
            expected: allowed.join(", "),
        }
    }
}
