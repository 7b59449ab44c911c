use super::Error;

#[derive(Debug)]
pub(super) struct UnknownModel {
    model: Box<str>,
}

impl std::error::Error for UnknownModel {}

impl core::fmt::Display for UnknownModel {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "model `{}` is not registered", self.model)
    }
}

impl Error {
    pub fn unknown_model(model: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownModel(UnknownModel {
            model: model.into().into(),
        }))
    }

    pub fn is_unknown_model(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnknownModel(_))
    }
}
