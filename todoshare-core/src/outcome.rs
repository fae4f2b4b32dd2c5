//! Result of an operation that may not apply.

use serde::{Deserialize, Serialize};

/// What happened when a mutation was attempted.
///
/// Sharing and list operations never fail outright. Instead they report
/// whether they changed anything, so callers can tell "done" from
/// "nothing to do" from "refused".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum Outcome {
    Applied,
    NoOp,
    Rejected(String),
}

impl Outcome {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Outcome::Rejected(reason.into())
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

/// A new value together with the outcome that produced it.
///
/// On `NoOp` and `Rejected` the value is an unchanged copy of the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Update<T> {
    #[serde(flatten)]
    pub outcome: Outcome,
    pub value: T,
}

impl<T> Update<T> {
    pub fn applied(value: T) -> Self {
        Update {
            outcome: Outcome::Applied,
            value,
        }
    }

    pub fn no_op(value: T) -> Self {
        Update {
            outcome: Outcome::NoOp,
            value,
        }
    }

    pub fn rejected(value: T, reason: impl Into<String>) -> Self {
        Update {
            outcome: Outcome::rejected(reason),
            value,
        }
    }
}
