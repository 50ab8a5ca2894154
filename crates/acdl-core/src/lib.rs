pub mod config;
pub mod logging;

// Pipeline: manifest → plan → scheduler → extract
pub mod downloader;
pub mod extract;
pub mod format;
pub mod manifest;
pub mod plan;
pub mod scheduler;
pub mod split;
pub mod task;

pub use downloader::Downloader;
pub use format::{AudioFormat, Quality};
pub use split::Split;
pub use task::{Outcome, Summary};
