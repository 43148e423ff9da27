//! Configuration module for scriber-register
//!
//! - Base directory resolution
//! - Settings persistence

pub mod paths;
pub mod settings;

pub use paths::RegisterPaths;
pub use settings::Settings;
