use super::Error;

/// Error when a required argument of an adapter operation is absent.
#[derive(Debug)]
pub(super) struct MissingArgument {
    message: Box<str>,
}

impl std::error::Error for MissingArgument {}

impl core::fmt::Display for MissingArgument {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "missing argument: {}", self.message)
    }
}

impl Error {
    /// Creates a missing argument error.
    pub fn missing_argument(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MissingArgument(MissingArgument {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a missing argument error.
    pub fn is_missing_argument(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MissingArgument(_))
    }
}
