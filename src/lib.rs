// Watermark Wizard Library
// Overlays a text or logo watermark on every image in a folder

pub mod batch;
pub mod config;
pub mod error;
pub mod logging;
pub mod watermark;
