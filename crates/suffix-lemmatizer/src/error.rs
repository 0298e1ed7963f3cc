use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid smoothing method {0:?} (expected \"none\" or \"add-one\")")]
    UnknownSmoothing(String),
    #[error("invalid lookup strategy {0:?} (expected \"exact\", \"longest-suffix\" or \"compound\")")]
    UnknownStrategy(String),
    #[error("training corpus contains no lemma counts")]
    EmptyCorpus,
    #[error("corpus counts for {0:?} exceed the supported total")]
    CountOverflow(String),
    #[error("failed to access model file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed model snapshot: {0}")]
    Json(#[from] serde_json::Error),
}
