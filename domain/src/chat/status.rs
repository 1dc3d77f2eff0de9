//! Backend reachability state.

/// Reachability of the backend service.
///
/// Starts at [`Connecting`] until the first status probe completes, then
/// settles on [`Online`] (with the backend's own status label) or
/// [`Disconnected`].
///
/// [`Connecting`]: BackendHealth::Connecting
/// [`Online`]: BackendHealth::Online
/// [`Disconnected`]: BackendHealth::Disconnected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendHealth {
    /// No probe has completed yet.
    Connecting,
    /// The backend answered its status endpoint with this label.
    Online(String),
    /// The last probe failed.
    Disconnected,
}

impl BackendHealth {
    pub fn is_online(&self) -> bool {
        matches!(self, BackendHealth::Online(_))
    }

    /// Human-readable label for the status badge.
    pub fn label(&self) -> &str {
        match self {
            BackendHealth::Connecting => "Connecting...",
            BackendHealth::Online(status) => status,
            BackendHealth::Disconnected => "Disconnected",
        }
    }
}
