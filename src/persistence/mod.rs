pub(crate) mod memory;
pub(crate) mod service;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{VitaeError, VitaeResult};

/// Opaque account identifier supplied by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identifier of a remotely stored resume.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub String);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Who is acting. Passed explicitly to every operation that attributes or authorizes data.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum IdentityContext {
    #[default]
    Anonymous,
    Authenticated(UserId),
}

impl IdentityContext {
    pub fn user(id: impl Into<String>) -> Self {
        Self::Authenticated(UserId(id.into()))
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Self::Authenticated(id) => Some(id),
            Self::Anonymous => None,
        }
    }

    /// The "save as mine" capability: the acting user, or [`VitaeError::Unauthenticated`].
    pub fn require_user(&self) -> VitaeResult<&UserId> {
        self.user_id().ok_or(VitaeError::Unauthenticated)
    }
}
