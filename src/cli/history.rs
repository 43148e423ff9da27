//! CLI command for the submission log

use crate::audit::SubmissionLog;
use crate::config::RegisterPaths;
use crate::error::RegisterResult;

/// Print the most recent submissions, newest first
pub fn handle_history(paths: &RegisterPaths, limit: usize) -> RegisterResult<()> {
    let log = SubmissionLog::new(paths.submission_log());
    if !log.exists() {
        println!("No submissions recorded yet.");
        return Ok(());
    }

    let entries = log.read_recent(limit)?;
    for entry in entries.iter().rev() {
        println!("{}", entry.format_human_readable());
        println!();
    }

    Ok(())
}
