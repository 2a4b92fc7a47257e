pub mod controller;
pub mod ec2;
pub mod types;

use async_trait::async_trait;
use types::{InstanceDetail, InstanceId, VpnInstance};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(
        "{op} denied by the provider: {message} \
         (check the access policy attached to this service's credentials)"
    )]
    AccessDenied { op: &'static str, message: String },

    #[error("{op} failed ({}): {message}", .code.as_deref().unwrap_or("no error code"))]
    Api {
        op: &'static str,
        code: Option<String>,
        message: String,
    },

    #[error("malformed {op} response: {detail}")]
    MalformedResponse { op: &'static str, detail: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Raw instance-management contract against the compute provider.
///
/// Every operation is scoped to a region; nothing is cached between calls.
/// The EC2 implementation lives in [`ec2`], tests substitute their own.
#[async_trait]
pub trait ComputeProvider: Send + Sync + 'static {
    /// Create exactly one instance from the named launch template.
    /// Returns the provider-assigned instance id.
    async fn run_instance(&self, region: &str, template_name: &str) -> Result<InstanceId>;

    /// Current state and public address of a single instance.
    async fn describe_instance(&self, region: &str, id: &InstanceId) -> Result<InstanceDetail>;

    /// VPN-tagged instances currently running or pending in the region.
    async fn list_vpn_instances(&self, region: &str) -> Result<Vec<VpnInstance>>;

    /// Bulk-terminate the given instances in one call.
    /// Returns how many the provider accepted for termination.
    async fn terminate_instances(&self, region: &str, ids: &[InstanceId]) -> Result<usize>;

    /// Regions the compute service is available in.
    async fn list_regions(&self) -> Result<Vec<String>>;
}
