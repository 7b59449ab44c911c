use super::Error;

/// Error when an operator object names more than one operator.
///
/// `{"age": {"gt": 1, "lt": 9}}` is rejected rather than guessing whether the
/// caller meant a conjunction. Split the constraint with an explicit `and`.
#[derive(Debug)]
pub(super) struct AmbiguousCondition {
    field: Box<str>,
    operators: usize,
}

impl std::error::Error for AmbiguousCondition {}

impl core::fmt::Display for AmbiguousCondition {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "ambiguous condition on `{}`: expected a single operator, found {}",
            self.field, self.operators
        )
    }
}

impl Error {
    /// Creates an ambiguous condition error.
    pub fn ambiguous_condition(field: impl Into<String>, operators: usize) -> Error {
        Error::from(super::ErrorKind::AmbiguousCondition(AmbiguousCondition {
            field: field.into().into(),
            operators,
        }))
    }

    /// Returns `true` if this error is an ambiguous condition error.
    pub fn is_ambiguous_condition(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::AmbiguousCondition(_))
    }
}
