pub mod dispatcher;
pub mod executor;

pub use dispatcher::{build_requests, output_file_name, prepare, validate_selection, Dispatcher};
pub use executor::HttpDownloadExecutor;
