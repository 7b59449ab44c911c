mod adhoc;
mod ambiguous_condition;
mod driver;
mod invalid_configuration;
mod invalid_operand;
mod invalid_schema;
mod invalid_value;
mod missing_argument;
mod table_missing;
mod unknown_database;
mod unknown_field;
mod unknown_model;
mod unsupported_operator;

use adhoc::AdhocError;
use ambiguous_condition::AmbiguousCondition;
use driver::DriverError;
use invalid_configuration::InvalidConfiguration;
use invalid_operand::InvalidOperand;
use invalid_schema::InvalidSchema;
use invalid_value::InvalidValue;
use missing_argument::MissingArgument;
use std::sync::Arc;
use table_missing::TableMissing;
use unknown_database::UnknownDatabase;
use unknown_field::UnknownField;
use unknown_model::UnknownModel;
use unsupported_operator::UnsupportedOperator;

/// Returns early with an ad-hoc error built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Builds an ad-hoc error from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur in Mortar.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context is shown first,
    /// followed by earlier context, ending with the root cause.
    #[inline(always)]
    pub fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let kind = match consequent.inner {
            Some(inner) => match Arc::try_unwrap(inner) {
                Ok(inner) => inner.kind,
                Err(shared) => ErrorKind::Adhoc(AdhocError::new(shared.kind.to_string())),
            },
            None => ErrorKind::Unknown,
        };

        Error {
            inner: Some(Arc::new(ErrorInner {
                kind,
                cause: Some(self),
            })),
        }
    }

    /// Walks the chain down to the error that started it.
    pub fn root(&self) -> &Error {
        let mut err = self;
        while let Some(cause) = err.inner.as_ref().and_then(|inner| inner.cause.as_ref()) {
            err = cause;
        }
        err
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Driver(err) => Some(err),
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    AmbiguousCondition(AmbiguousCondition),
    Driver(DriverError),
    InvalidConfiguration(InvalidConfiguration),
    InvalidOperand(InvalidOperand),
    InvalidSchema(InvalidSchema),
    InvalidValue(InvalidValue),
    MissingArgument(MissingArgument),
    TableMissing(TableMissing),
    UnknownDatabase(UnknownDatabase),
    UnknownField(UnknownField),
    UnknownModel(UnknownModel),
    UnsupportedOperator(UnsupportedOperator),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            AmbiguousCondition(err) => core::fmt::Display::fmt(err, f),
            Driver(err) => core::fmt::Display::fmt(err, f),
            InvalidConfiguration(err) => core::fmt::Display::fmt(err, f),
            InvalidOperand(err) => core::fmt::Display::fmt(err, f),
            InvalidSchema(err) => core::fmt::Display::fmt(err, f),
            InvalidValue(err) => core::fmt::Display::fmt(err, f),
            MissingArgument(err) => core::fmt::Display::fmt(err, f),
            TableMissing(err) => core::fmt::Display::fmt(err, f),
            UnknownDatabase(err) => core::fmt::Display::fmt(err, f),
            UnknownField(err) => core::fmt::Display::fmt(err, f),
            UnknownModel(err) => core::fmt::Display::fmt(err, f),
            UnsupportedOperator(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown mortar error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Error {
        Error::invalid_configuration(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

impl From<uuid::Error> for Error {
    fn from(err: uuid::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

/// Trait for types that can be converted into an Error.
pub trait IntoError {
    /// Converts this type into an Error.
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

impl IntoError for &str {
    fn into_error(self) -> Error {
        Error::from_args(format_args!("{self}"))
    }
}

impl IntoError for String {
    fn into_error(self) -> Error {
        Error::from_args(format_args!("{self}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_size() {
        // Ensure Error stays at one word (size of pointer/Arc)
        let expected_size = core::mem::size_of::<usize>();
        assert_eq!(expected_size, core::mem::size_of::<Error>());
    }

    #[test]
    fn error_from_args() {
        let err = Error::from_args(format_args!("test error: {}", 42));
        assert_eq!(err.to_string(), "test error: 42");
    }

    #[test]
    fn error_chain_display() {
        let err = Error::unknown_field("Post", "titel")
            .context(err!("compiling filter"))
            .context("Post.all()");

        assert_eq!(
            err.to_string(),
            "Post.all(): compiling filter: unknown field `titel` on model `Post`"
        );
        assert!(err.root().is_unknown_field());
        assert!(!err.is_unknown_field());
    }

    #[test]
    fn ambiguous_condition() {
        let err = Error::ambiguous_condition("age", 2);
        assert_eq!(
            err.to_string(),
            "ambiguous condition on `age`: expected a single operator, found 2"
        );
        assert!(err.is_ambiguous_condition());
    }

    #[test]
    fn unsupported_operator() {
        let err = Error::unsupported_operator("regexp");
        assert_eq!(err.to_string(), "unsupported operator `regexp`");
    }

    #[test]
    fn missing_argument() {
        let err = Error::missing_argument("update requires a filter");
        assert_eq!(
            err.to_string(),
            "missing argument: update requires a filter"
        );
        assert!(err.is_missing_argument());
    }

    #[test]
    fn table_missing_is_a_signal() {
        let err = Error::table_missing("users");
        assert!(err.is_table_missing());
        assert!(!err.is_driver());
        assert_eq!(err.to_string(), "table `users` does not exist");
    }

    #[test]
    fn driver_error_walks_source_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = Error::driver(io);
        assert!(err.is_driver());
        assert_eq!(err.to_string(), "refused");
    }
}
