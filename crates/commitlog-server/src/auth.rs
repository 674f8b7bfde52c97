//! Policy-Based Authorization
//!
//! Evaluates whether a subject may perform an action before any log call is
//! made. The policy is a JSON document of grant entries:
//!
//! ```json
//! [
//!   { "subject": "root",     "actions": ["produce", "consume"] },
//!   { "subject": "mirror-*", "actions": ["consume"] }
//! ]
//! ```
//!
//! Subjects and actions support `*` suffix wildcards. Anything not granted
//! is denied.
//!
//! ## Usage
//!
//! ```ignore
//! let authorizer = Authorizer::from_file("policy.json")?;
//! authorizer.authorize("root", auth::PRODUCE)?;
//! ```

use std::path::Path;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Action name for appending records.
pub const PRODUCE: &str = "produce";

/// Action name for reading records or cluster metadata.
pub const CONSUME: &str = "consume";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{subject:?} is not permitted to {action:?}")]
    PermissionDenied { subject: String, action: String },

    #[error("invalid policy document: {0}")]
    Policy(String),

    #[error("failed to read policy document: {0}")]
    Io(#[from] std::io::Error),
}

/// One grant: a subject pattern and the actions it may perform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyEntry {
    /// Subject pattern, e.g. `"root"` or `"replica-*"`.
    pub subject: String,
    /// Granted action patterns.
    pub actions: Vec<String>,
}

/// In-memory policy evaluator. Deny by default.
#[derive(Debug, Default)]
pub struct Authorizer {
    entries: RwLock<Vec<PolicyEntry>>,
}

impl Authorizer {
    /// Load the policy document from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AuthError> {
        let raw = std::fs::read_to_string(path)?;
        let entries: Vec<PolicyEntry> =
            serde_json::from_str(&raw).map_err(|e| AuthError::Policy(e.to_string()))?;
        Ok(Self::from_entries(entries))
    }

    pub fn from_entries(entries: Vec<PolicyEntry>) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// An authorizer that permits every subject to do everything. Intended
    /// for development setups running without a policy document.
    pub fn allow_all() -> Self {
        Self::from_entries(vec![PolicyEntry {
            subject: "*".to_string(),
            actions: vec!["*".to_string()],
        }])
    }

    /// Check whether `subject` may perform `action`.
    pub fn authorize(&self, subject: &str, action: &str) -> Result<(), AuthError> {
        let entries = self.entries.read().unwrap();

        let allowed = entries.iter().any(|entry| {
            pattern_matches(&entry.subject, subject)
                && entry.actions.iter().any(|a| pattern_matches(a, action))
        });

        if allowed {
            Ok(())
        } else {
            Err(AuthError::PermissionDenied {
                subject: subject.to_string(),
                action: action.to_string(),
            })
        }
    }

    /// Replace the policy, e.g. after a config reload.
    pub fn set_entries(&self, new_entries: Vec<PolicyEntry>) {
        *self.entries.write().unwrap() = new_entries;
    }
}

/// Match `value` against `pattern`, where a trailing `*` matches any
/// suffix and a bare `*` matches everything.
fn pattern_matches(pattern: &str, value: &str) -> bool {
    if pattern == "*" {
        return true;
    }
    if let Some(prefix) = pattern.strip_suffix('*') {
        return value.starts_with(prefix);
    }
    pattern == value
}
