use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlidezError {
    #[error("slide index {index} out of range ({len} slides)")]
    OutOfRange { index: i64, len: usize },

    #[error("invalid input: {0}")]
    MalformedInput(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("notes page not available for slide {0}")]
    NotesUnavailable(usize),

    #[error("notes shape not found on slide {0}")]
    NotesShapeNotFound(usize),

    #[error("authorization failed: {0}")]
    Auth(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("error {during}: {source}")]
    During {
        during: &'static str,
        #[source]
        source: Box<SlidezError>,
    },
}

impl SlidezError {
    /// Wraps the error with a short description of the operation that failed.
    pub fn during(self, during: &'static str) -> Self {
        SlidezError::During {
            during,
            source: Box::new(self),
        }
    }

    /// The underlying category, with every `During` layer removed.
    pub fn root(&self) -> &SlidezError {
        let mut current = self;
        while let SlidezError::During { source, .. } = current {
            current = source;
        }
        current
    }
}

impl From<reqwest::Error> for SlidezError {
    fn from(err: reqwest::Error) -> Self {
        SlidezError::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SlidezError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn during_prefixes_the_operation() {
        let err = SlidezError::Rejected("Invalid requests[0]".into()).during("reordering slides");
        assert_eq!(
            err.to_string(),
            "error reordering slides: request rejected: Invalid requests[0]"
        );
    }

    #[test]
    fn root_peels_nested_wrappers() {
        let err = SlidezError::OutOfRange { index: 7, len: 3 }
            .during("getting presentation")
            .during("adding shape");
        assert!(matches!(
            err.root(),
            SlidezError::OutOfRange { index: 7, len: 3 }
        ));
    }
}
