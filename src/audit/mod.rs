//! Submission log for scriber-register
//!
//! Records every step submission with the fields whose persisted value it
//! changed, in an append-only JSONL file.
//!
//! # Example
//!
//! ```rust,ignore
//! use scriber_register::audit::{diff_form_data, SubmissionEntry, SubmissionLog};
//!
//! let log = SubmissionLog::new(paths.submission_log());
//! let changes = diff_form_data(&submission.before, &submission.after);
//! log.log(&SubmissionEntry::new(session_id, submission.step_id, changes))?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::{diff_form_data, format_value, FieldChange};
pub use entry::SubmissionEntry;
pub use logger::SubmissionLog;

use uuid::Uuid;

use crate::error::RegisterResult;
use crate::wizard::Submission;

/// Record a submission under the given session
pub fn record_submission(
    log: &SubmissionLog,
    session_id: Uuid,
    submission: &Submission,
) -> RegisterResult<()> {
    let changes = diff_form_data(&submission.before, &submission.after);
    log.log(&SubmissionEntry::new(session_id, &submission.step_id, changes))
}
