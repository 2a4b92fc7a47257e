use serde::{Deserialize, Serialize};

/// Opaque provider-side instance identifier (e.g. `i-0abc123`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub String);

/// A VPN endpoint instance as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpnInstance {
    pub id: InstanceId,
    /// Public IPv4 address. Assigned asynchronously after launch, so this
    /// is absent for a short window on fresh instances.
    pub ip: Option<String>,
}

/// Snapshot of a single instance's provisioning status.
#[derive(Debug, Clone)]
pub struct InstanceDetail {
    pub id: InstanceId,
    pub state: InstanceState,
    pub ip: Option<String>,
}

/// Provider-reported instance state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceState {
    Pending,
    Running,
    ShuttingDown,
    Stopped,
    Terminated,
    Unknown,
}
