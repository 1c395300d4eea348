//! Caller identity as supplied by the authentication collaborator. The core performs no
//! permission checks of its own; the role is threaded through for audit logging only.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// The role the authentication collaborator resolved for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[display("admin")]
    Admin,
    #[display("csr")]
    Csr,
    #[display("anonymous")]
    Anonymous,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerIdentity {
    pub name: String,
    pub role: Role,
}

impl CallerIdentity {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        CallerIdentity { name: name.into(), role }
    }
}
