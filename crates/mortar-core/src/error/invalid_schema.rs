use super::Error;

/// A model that cannot be registered.
///
/// Raised for index declarations without columns or over undeclared
/// columns, and for a second model registered under a taken name. Nothing
/// reaches the database for such a model.
#[derive(Debug)]
pub(super) struct InvalidSchema {
    model: Box<str>,
    reason: Box<str>,
}

impl std::error::Error for InvalidSchema {}

impl core::fmt::Display for InvalidSchema {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid model `{}`: {}", self.model, self.reason)
    }
}

impl Error {
    pub fn invalid_schema(model: impl Into<String>, reason: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidSchema(InvalidSchema {
            model: model.into().into(),
            reason: reason.into().into(),
        }))
    }

    pub fn is_invalid_schema(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidSchema(_))
    }
}
