//! Repositories over the persisted documents.
//!
//! Every mutation is a read-modify-write of one whole document. Each repository serializes its
//! own mutations; reads are never blocked.

mod posts;
mod projects;
mod technologies;
mod topics;

pub use posts::*;
pub use projects::*;
pub use technologies::*;
pub use topics::*;

use chrono::Utc;

use crate::errors::AppError;

/// Current instant as an RFC 3339 timestamp.
fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

/// Millisecond timestamp id, bumped past any id already taken.
fn timestamp_id(is_taken: impl Fn(&str) -> bool) -> String {
    let mut candidate = Utc::now().timestamp_millis();
    loop {
        let id = candidate.to_string();
        if !is_taken(&id) {
            return id;
        }
        candidate += 1;
    }
}

fn require_title(kind: &str, title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::Validation(format!("{} title is required", kind)));
    }
    Ok(())
}
