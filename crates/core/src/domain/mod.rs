mod download;
mod path_number;

pub use download::{DownloadObserver, DownloadOutcome, DownloadRejection};
pub use path_number::PathNumber;
