//! CLI command handlers. Each command is in its own file.

mod completions;
mod download;
mod plan;
mod status;

pub use completions::run_completions;
pub use download::{run_download, DownloadOptions};
pub use plan::run_plan;
pub use status::run_status;
