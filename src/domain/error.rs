use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Please enter URL and select quality")]
    MissingSelection,

    #[error("{0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(String),
}
