pub mod debouncer;
pub mod download_coordinator;

pub use debouncer::Debouncer;
pub use download_coordinator::DownloadCoordinator;
