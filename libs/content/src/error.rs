use repository::RepositoryError;

/// Failure of a content operation. Each operation fails with exactly one
/// of these; mapping them to transport status codes is the caller's job.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("no {kind} found")]
    NotFound { kind: &'static str },

    #[error("{kind} {name:?} already exists")]
    DuplicateName { kind: &'static str, name: String },

    #[error("{0}")]
    InvalidContent(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] RepositoryError),
}

pub type ContentResult<T> = Result<T, ContentError>;

pub(crate) trait IntoContentResult<T> {
    /// Maps a unique-constraint violation to `DuplicateName` and a vanished
    /// record to `NotFound`. Anything else is `StoreUnavailable`.
    fn or_duplicate(self, kind: &'static str, name: &str) -> ContentResult<T>;
}

impl<T> IntoContentResult<T> for Result<T, RepositoryError> {
    fn or_duplicate(self, kind: &'static str, name: &str) -> ContentResult<T> {
        self.map_err(|e| match e {
            RepositoryError::Conflict { .. } => ContentError::DuplicateName {
                kind,
                name: name.to_string(),
            },
            RepositoryError::NotFound { .. } => ContentError::NotFound { kind },
            e => ContentError::StoreUnavailable(e),
        })
    }
}
