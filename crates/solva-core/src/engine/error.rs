use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ShellError {
    #[error("Reference does not resolve against this frame: {detail}")]
    ReferenceNotInFrame { detail: String },

    #[error("Reference selects no particles")]
    EmptyReference,

    #[error("Search radius must be positive and finite, got {radius}")]
    InvalidRadius { radius: f64 },

    #[error("Requested {requested} molecules but only {available} exist outside the central species")]
    InsufficientCandidates { requested: usize, available: usize },
}
