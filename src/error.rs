/// Every failure this crate reports falls in one of two categories.
///
/// `Validation` means the caller's request is malformed and can be fixed by
/// correcting the input. `Internal` covers incomplete configuration and
/// provider-side rejections. Configuration failures name the missing item;
/// provider rejections keep the provider's message.
#[derive(thiserror::Error)]
pub enum DispatchError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Internal(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    ValidationError,
    InternalServerError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ValidationError => "VALIDATION_ERROR",
            ErrorKind::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DispatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DispatchError::Validation(_) => ErrorKind::ValidationError,
            DispatchError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// The status a caller embedding this crate behind an API would attach.
    pub fn status(&self) -> u16 {
        match self {
            DispatchError::Validation(_) => 400,
            DispatchError::Internal(_) => 500,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            DispatchError::Validation(message) | DispatchError::Internal(message) => message,
        }
    }

    pub(crate) fn missing_configuration(name: &str) -> Self {
        DispatchError::Internal(format!("Missing environment variable: {name}"))
    }
}

impl std::fmt::Debug for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl serde::Serialize for DispatchError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("DispatchError", 3)?;
        state.serialize_field("status", &self.status())?;
        state.serialize_field("kind", self.kind().as_str())?;
        state.serialize_field("message", self.message())?;
        state.end()
    }
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
