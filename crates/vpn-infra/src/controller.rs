use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::types::{InstanceId, VpnInstance};
use crate::{ComputeProvider, Result};

/// Outcome of a terminate sweep.
///
/// `NothingRunning` is a valid no-op; a failed terminate call surfaces as
/// an `Err` instead, so callers never mistake one for the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminateOutcome {
    NothingRunning,
    Terminated(usize),
}

impl TerminateOutcome {
    pub fn count(&self) -> usize {
        match self {
            Self::NothingRunning => 0,
            Self::Terminated(n) => *n,
        }
    }
}

/// Lifecycle coordination for the per-region VPN instance.
///
/// Holds no state of its own; the provider is the sole source of truth
/// and every operation re-queries it.
pub struct InstanceController {
    provider: Arc<dyn ComputeProvider>,
    ip_wait: Duration,
}

impl InstanceController {
    /// `ip_wait` is the fixed pause between launching an instance and
    /// querying its public address (address assignment is asynchronous).
    pub fn new(provider: Arc<dyn ComputeProvider>, ip_wait: Duration) -> Self {
        Self { provider, ip_wait }
    }

    /// VPN instances currently up in the region, in provider response order.
    ///
    /// Failures here propagate: every other decision (the already-running
    /// check before launch, the terminate sweep) is built on this result,
    /// and a silently-empty listing would launch duplicates.
    pub async fn list_instances(&self, region: &str) -> Result<Vec<VpnInstance>> {
        match self.provider.list_vpn_instances(region).await {
            Ok(instances) => Ok(instances),
            Err(e) => {
                error!(region, error = %e, "instance listing failed");
                Err(e)
            }
        }
    }

    /// Launch one instance from the named template and report its id and
    /// (if already assigned) public address.
    ///
    /// The wait is a heuristic, not a poll loop; under slow provisioning
    /// the address comes back `None` and shows up in later listings.
    pub async fn launch_instance(&self, template_name: &str, region: &str) -> Result<VpnInstance> {
        let id = match self.provider.run_instance(region, template_name).await {
            Ok(id) => id,
            Err(e) => {
                error!(region, template_name, error = %e, "instance launch failed");
                return Err(e);
            }
        };

        info!(region, instance_id = %id.0, "instance launched");

        tokio::time::sleep(self.ip_wait).await;

        // The instance exists at this point, so a failed address lookup
        // degrades to "no address yet" rather than discarding the launch.
        let ip = match self.provider.describe_instance(region, &id).await {
            Ok(detail) => detail.ip,
            Err(e) => {
                warn!(region, instance_id = %id.0, error = %e, "address lookup after launch failed");
                None
            }
        };

        Ok(VpnInstance { id, ip })
    }

    /// Terminate every VPN instance in the region with a single bulk call.
    pub async fn terminate_instances(&self, region: &str) -> Result<TerminateOutcome> {
        let instances = self.list_instances(region).await?;
        if instances.is_empty() {
            return Ok(TerminateOutcome::NothingRunning);
        }

        let ids: Vec<InstanceId> = instances.into_iter().map(|i| i.id).collect();

        match self.provider.terminate_instances(region, &ids).await {
            Ok(count) => {
                info!(region, count, "instances terminated");
                Ok(TerminateOutcome::Terminated(count))
            }
            Err(e) => {
                error!(region, error = %e, "instance termination failed");
                Err(e)
            }
        }
    }

    /// Regions the provider's compute service is available in.
    pub async fn valid_regions(&self) -> Result<Vec<String>> {
        self.provider.list_regions().await
    }
}
