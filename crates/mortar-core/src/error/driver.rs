use super::Error;

/// A failure reported by the database channel that mortar does not
/// interpret.
#[derive(Debug)]
pub(super) struct DriverError {
    pub(super) inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for DriverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for DriverError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}", self.inner)?;

        let mut cause = self.inner.source();
        while let Some(err) = cause {
            write!(f, ": {err}")?;
            cause = err.source();
        }

        Ok(())
    }
}

impl Error {
    /// Wraps an error raised by the channel, e.g. a `mysql_async` error the
    /// adapter has no dedicated kind for.
    pub fn driver(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::Driver(DriverError {
            inner: Box::new(err),
        }))
    }

    pub fn is_driver(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Driver(_))
    }
}
