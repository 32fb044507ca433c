// Downloader module - share link in, video record out

pub mod errors;
pub mod fetcher;
pub mod locators;
pub mod models;
pub mod orchestrator;
pub mod traits;
pub mod utils;

pub use errors::ExtractError;
pub use fetcher::HttpFetcher;
pub use models::{NetworkConfig, VideoRecord};
pub use orchestrator::VideoExtractor;
pub use traits::{PageFetcher, PayloadLocator};
