use super::Error;

/// Error when a filter uses an operator name outside the supported set.
#[derive(Debug)]
pub(super) struct UnsupportedOperator {
    operator: Box<str>,
}

impl std::error::Error for UnsupportedOperator {}

impl core::fmt::Display for UnsupportedOperator {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unsupported operator `{}`", self.operator)
    }
}

impl Error {
    /// Creates an unsupported operator error.
    pub fn unsupported_operator(operator: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedOperator(UnsupportedOperator {
            operator: operator.into().into(),
        }))
    }

    /// Returns `true` if this error is an unsupported operator error.
    pub fn is_unsupported_operator(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnsupportedOperator(_))
    }
}
