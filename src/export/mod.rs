//! Export module for scriber-register
//!
//! Writes the accumulated registration data in several formats:
//! - JSON: machine-readable, schema versioned
//! - YAML: human-readable
//! - CSV: one row per field, spreadsheet-compatible

pub mod csv;
pub mod json;
pub mod yaml;

use std::io::Write;

pub use self::csv::export_csv;
pub use self::json::{export_json, RegistrationExport, EXPORT_SCHEMA_VERSION};
pub use self::yaml::export_yaml;

use crate::error::RegisterResult;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportFormat {
    #[default]
    Json,
    Yaml,
    Csv,
}

/// Write `export` in the requested format
pub fn write_export<W: Write>(
    export: &RegistrationExport,
    format: ExportFormat,
    writer: &mut W,
) -> RegisterResult<()> {
    match format {
        ExportFormat::Json => export_json(export, writer),
        ExportFormat::Yaml => export_yaml(export, writer),
        ExportFormat::Csv => export_csv(export, writer),
    }
}
