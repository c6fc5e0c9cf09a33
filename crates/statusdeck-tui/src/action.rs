//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::fmt;

use statusdeck_core::{RequestCount, Server, ServerId, Snapshot, StatusCheck, StatusId};

/// Which panel holds focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelId {
    #[default]
    Servers,
    Statuses,
}

impl PanelId {
    pub fn next(self) -> Self {
        match self {
            Self::Servers => Self::Statuses,
            Self::Statuses => Self::Servers,
        }
    }
}

/// What the input line is collecting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    NewServer,
    RenameServer(ServerId),
    CheckUrl,
}

impl InputKind {
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::NewServer => "New server name",
            Self::RenameServer(_) => "Rename server",
            Self::CheckUrl => "URL to check",
        }
    }

    /// The operation a submitted value turns into.
    pub fn submit(self, value: String) -> SyncOp {
        match self {
            Self::NewServer => SyncOp::CreateServer(value),
            Self::RenameServer(id) => SyncOp::RenameServer(id, value),
            Self::CheckUrl => SyncOp::CheckStatus(value),
        }
    }
}

/// A remote operation, keyed by entity id where it targets one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOp {
    CreateServer(String),
    RenameServer(ServerId, String),
    DeleteServer(ServerId),
    CheckStatus(String),
    DeleteStatus(StatusId),
    ResetRequestCount,
    RefreshAll,
}

impl fmt::Display for SyncOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateServer(name) => write!(f, "create server {name}"),
            Self::RenameServer(id, name) => write!(f, "rename server {id} to {name}"),
            Self::DeleteServer(id) => write!(f, "delete server {id}"),
            Self::CheckStatus(url) => write!(f, "check {url}"),
            Self::DeleteStatus(id) => write!(f, "delete status check {id}"),
            Self::ResetRequestCount => f.write_str("reset request count"),
            Self::RefreshAll => f.write_str("refresh"),
        }
    }
}

/// A destructive operation awaiting y/n.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteServer { id: ServerId, name: String },
    DeleteStatus { id: StatusId, url: String },
    ResetRequestCount,
}

impl ConfirmAction {
    pub fn into_op(self) -> SyncOp {
        match self {
            Self::DeleteServer { id, .. } => SyncOp::DeleteServer(id),
            Self::DeleteStatus { id, .. } => SyncOp::DeleteStatus(id),
            Self::ResetRequestCount => SyncOp::ResetRequestCount,
        }
    }
}

impl fmt::Display for ConfirmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeleteServer { name, .. } => write!(f, "Delete server {name}?"),
            Self::DeleteStatus { url, .. } => write!(f, "Delete status check for {url}?"),
            Self::ResetRequestCount => f.write_str("Reset the request counter?"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ──
    FocusNext,
    SelectNext,
    SelectPrev,
    ToggleHelp,

    // ── Input line ──
    OpenInput(InputKind, String),
    SubmitInput(InputKind, String),
    CancelInput,

    // ── Confirmation ──
    RequestConfirm(ConfirmAction),
    ConfirmYes,
    ConfirmNo,

    // ── Remote operations ──
    Sync(SyncOp),
    SyncFinished,

    // ── View updates (from the data bridge) ──
    ServersUpdated(Snapshot<Server>),
    StatusesUpdated(Snapshot<StatusCheck>),
    RequestCountUpdated(Option<RequestCount>),
}
