pub mod error;
pub mod model;

pub use error::AppError;
pub use model::{DownloadPlan, OperationStatus, QualityOption, SelectionState, Severity};
