use thiserror::Error;

/// Errors caused by user input, such as an unknown preset passed on the command line.
///
/// These are recoverable: the caller is expected to report them and exit cleanly.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unknown {kind} preset `{name}`")]
    InvalidPresetName { kind: &'static str, name: String },
}

impl ValidationError {
    pub(crate) fn preset(kind: &'static str, name: impl Into<String>) -> Self {
        ValidationError::InvalidPresetName {
            kind,
            name: name.into(),
        }
    }
}

/// Violations of the internal data model.
///
/// Raised while tessellating, building or converting a scene. They are fatal for the job that
/// raised them but never for sibling jobs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantError {
    #[error("unsupported material kind `{0}`")]
    UnsupportedMaterialKind(String),
    #[error("dangling {kind} reference `{name}`")]
    DanglingReference { kind: &'static str, name: String },
    #[error("degenerate tessellation input: {what} = {value}")]
    DegenerateTessellationInput { what: &'static str, value: usize },
    #[error("cannot merge {src} into {dst}")]
    MismatchedTopology {
        dst: &'static str,
        src: &'static str,
    },
}

impl InvariantError {
    pub(crate) fn dangling(kind: &'static str, name: impl Into<String>) -> Self {
        InvariantError::DanglingReference {
            kind,
            name: name.into(),
        }
    }
}

/// Job-level error: anything that can stop a single scene from being written.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Invariant(#[from] InvariantError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not start the worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
    #[error("job panicked: {0}")]
    Panic(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::{Error, InvariantError, ValidationError};

    #[test]
    fn messages() {
        let err = ValidationError::preset("scene", "nope");
        assert_eq!(err.to_string(), "unknown scene preset `nope`");
        let err = InvariantError::DegenerateTessellationInput {
            what: "usteps",
            value: 0,
        };
        assert_eq!(
            err.to_string(),
            "degenerate tessellation input: usteps = 0"
        );
    }

    #[test]
    fn wraps_transparently() {
        let err: Error = InvariantError::dangling("mesh", "obj01").into();
        assert!(matches!(
            err,
            Error::Invariant(InvariantError::DanglingReference { .. })
        ));
        assert_eq!(err.to_string(), "dangling mesh reference `obj01`");
    }
}
