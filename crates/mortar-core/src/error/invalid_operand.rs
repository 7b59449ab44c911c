use super::Error;

/// Error when an operator receives an operand of the wrong shape.
///
/// For example `between` with anything other than a two element list, or
/// `inq` with a scalar.
#[derive(Debug)]
pub(super) struct InvalidOperand {
    message: Box<str>,
}

impl std::error::Error for InvalidOperand {}

impl core::fmt::Display for InvalidOperand {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid operand: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid operand error.
    pub fn invalid_operand(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidOperand(InvalidOperand {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid operand error.
    pub fn is_invalid_operand(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidOperand(_))
    }
}
