//! scriber-register - Terminal registration wizard for Scriber
//!
//! This library provides the core of a three-step account registration
//! wizard. Answers accumulate in a flat map of dotted field names to string
//! values, persisted after each step in a file-backed local key/value store,
//! so the wizard can be resumed at any step.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Form data, field and step definitions
//! - `storage`: Local key/value store with atomic JSON writes
//! - `wizard`: Step catalog, routing, Continue gating and submission
//! - `audit`: Submission log
//! - `export`: JSON, YAML and CSV export
//! - `display`: Terminal output formatting for the CLI
//! - `cli`: Non-interactive command handlers
//! - `tui`: Interactive terminal wizard
//! - `logging`: tracing subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use scriber_register::config::{RegisterPaths, Settings};
//! use scriber_register::cli::open_registration;
//!
//! let paths = RegisterPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let registration = open_registration(&paths, &settings)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod storage;
pub mod tui;
pub mod wizard;

pub use error::RegisterError;
