pub mod traits;

pub use traits::{DownloadExecutor, PageSnapshot, PageSource, SizeProbe};
