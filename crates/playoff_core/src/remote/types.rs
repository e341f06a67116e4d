//! Request/response shapes and the remote error envelope.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ApiResult<T> = Result<T, ApiError>;

/// Remote operation, carried in error envelopes for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiOp {
    Browse,
    ListMine,
    Fetch,
    Create,
    Update,
    Delete,
    Register,
    Leave,
    SetStatus,
    RemoveParticipant,
}

impl ApiOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Browse => "browse",
            Self::ListMine => "list_mine",
            Self::Fetch => "fetch",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Register => "register",
            Self::Leave => "leave",
            Self::SetStatus => "set_status",
            Self::RemoveParticipant => "remove_participant",
        }
    }
}

/// Typed transport error envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub op: ApiOp,
    /// Stable machine-readable code, e.g. `not_found` or `network`.
    pub code: String,
    /// Human-readable detail, safe to log.
    pub message: String,
    /// Whether the caller may retry the same request.
    pub retryable: bool,
}

impl ApiError {
    pub fn new(
        op: ApiOp,
        code: impl Into<String>,
        message: impl Into<String>,
        retryable: bool,
    ) -> Self {
        Self {
            op,
            code: code.into(),
            message: message.into(),
            retryable,
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "remote {} failed ({}): {}",
            self.op.as_str(),
            self.code,
            self.message
        )
    }
}

impl Error for ApiError {}

/// Filters for the public tournament listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseQuery {
    /// Free-text name filter.
    pub text: Option<String>,
    pub city: Option<String>,
    /// Only tournaments starting at or after this instant, epoch ms.
    pub starts_after_ms: Option<i64>,
}

/// Form payload for creating or editing a tournament.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentDraft {
    pub name: String,
    pub city: Option<String>,
    pub starts_at_ms: i64,
    pub max_participants: Option<u32>,
}

/// Server acknowledgement for a delete round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    pub acknowledged: bool,
}
