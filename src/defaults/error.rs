use crate::protected::PolicyViolation;
use crate::store::StoreError;
use crate::tag_set::InvalidTag;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DefaultsError {
    #[error("Policy violation: {0}")]
    Policy(#[from] PolicyViolation),

    #[error("Tag set not found: {0}")]
    NotFound(String),

    #[error("Tag set already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid tag set identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Entity type does not support metatag defaults: {0}")]
    UnsupportedEntityType(String),

    #[error("Invalid value for tag '{tag}': {reason}")]
    InvalidTag { tag: String, reason: String },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl DefaultsError {
    /// Whether the caller asked for something the rules forbid, as opposed
    /// to the system failing to carry it out.
    #[must_use]
    pub fn is_policy_violation(&self) -> bool {
        matches!(self, Self::Policy(_))
    }
}

impl From<InvalidTag> for DefaultsError {
    fn from(err: InvalidTag) -> Self {
        Self::InvalidTag {
            tag: err.tag,
            reason: err.reason,
        }
    }
}
