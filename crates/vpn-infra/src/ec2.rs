use async_trait::async_trait;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_ec2::Client;
use aws_sdk_ec2::config::Region;
use aws_sdk_ec2::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_ec2::types::{Filter, InstanceStateName, LaunchTemplateSpecification};

use crate::types::{InstanceDetail, InstanceId, InstanceState, VpnInstance};
use crate::{ComputeProvider, Error, Result};

/// Tag that marks an instance as a VPN endpoint.
const VPN_TAG_FILTER: &str = "tag:instance_type";
const VPN_TAG_VALUE: &str = "vpn";

/// States that count as "currently up" for the one-per-region check.
const ACTIVE_STATES: [&str; 2] = ["running", "pending"];

/// Region used for region-agnostic calls when the credential chain
/// resolves no region of its own.
const FALLBACK_REGION: &str = "us-east-1";

/// EC2 provider using the AWS SDK.
///
/// Credentials and the home region come from the standard resolution chain
/// (env vars, shared config, instance profile) via `from_env()`. Clients
/// are built per call for whatever region the request targets.
pub struct Ec2Compute {
    base: SdkConfig,
    home_region: String,
}

impl Ec2Compute {
    pub async fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let base = aws_config::defaults(BehaviorVersion::latest()).load().await;
        let home_region = base
            .region()
            .map(|r| r.as_ref().to_owned())
            .unwrap_or_else(|| FALLBACK_REGION.into());

        Self { base, home_region }
    }

    pub fn home_region(&self) -> &str {
        &self.home_region
    }

    fn client(&self, region: &str) -> Client {
        let config = aws_sdk_ec2::config::Builder::from(&self.base)
            .region(Region::new(region.to_owned()))
            .build();
        Client::from_conf(config)
    }

    fn parse_state(name: &InstanceStateName) -> InstanceState {
        match name {
            InstanceStateName::Pending => InstanceState::Pending,
            InstanceStateName::Running => InstanceState::Running,
            InstanceStateName::ShuttingDown => InstanceState::ShuttingDown,
            InstanceStateName::Stopped | InstanceStateName::Stopping => InstanceState::Stopped,
            InstanceStateName::Terminated => InstanceState::Terminated,
            _ => InstanceState::Unknown,
        }
    }
}

/// Classify an SDK failure by its structured error code.
///
/// Authorization failures get their own variant so the operator sees an
/// actionable message; everything else keeps the raw provider code.
fn classify<E>(op: &'static str, err: SdkError<E>) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    let code = err.code().map(str::to_owned);
    let message = DisplayErrorContext(&err).to_string();

    match code.as_deref() {
        Some("UnauthorizedOperation") | Some("AuthFailure") => {
            Error::AccessDenied { op, message }
        }
        _ => Error::Api { op, code, message },
    }
}

#[async_trait]
impl ComputeProvider for Ec2Compute {
    async fn run_instance(&self, region: &str, template_name: &str) -> Result<InstanceId> {
        let resp = self
            .client(region)
            .run_instances()
            .min_count(1)
            .max_count(1)
            .launch_template(
                LaunchTemplateSpecification::builder()
                    .launch_template_name(template_name)
                    .build(),
            )
            .send()
            .await
            .map_err(|e| classify("run-instances", e))?;

        let id = resp
            .instances()
            .first()
            .and_then(|i| i.instance_id())
            .ok_or_else(|| Error::MalformedResponse {
                op: "run-instances",
                detail: "reservation contains no instance id".into(),
            })?;

        Ok(InstanceId(id.to_owned()))
    }

    async fn describe_instance(&self, region: &str, id: &InstanceId) -> Result<InstanceDetail> {
        let resp = self
            .client(region)
            .describe_instances()
            .instance_ids(id.0.clone())
            .send()
            .await
            .map_err(|e| classify("describe-instances", e))?;

        let instance = resp
            .reservations()
            .first()
            .and_then(|r| r.instances().first())
            .ok_or_else(|| Error::MalformedResponse {
                op: "describe-instances",
                detail: format!("instance {} missing from the response", id.0),
            })?;

        Ok(InstanceDetail {
            id: id.clone(),
            state: instance
                .state()
                .and_then(|s| s.name())
                .map(Self::parse_state)
                .unwrap_or(InstanceState::Unknown),
            ip: instance.public_ip_address().map(str::to_owned),
        })
    }

    async fn list_vpn_instances(&self, region: &str) -> Result<Vec<VpnInstance>> {
        let resp = self
            .client(region)
            .describe_instances()
            .filters(
                Filter::builder()
                    .name("instance-state-name")
                    .set_values(Some(ACTIVE_STATES.iter().map(|s| s.to_string()).collect()))
                    .build(),
            )
            .filters(
                Filter::builder()
                    .name(VPN_TAG_FILTER)
                    .values(VPN_TAG_VALUE)
                    .build(),
            )
            .send()
            .await
            .map_err(|e| classify("describe-instances", e))?;

        let mut instances = Vec::new();
        for reservation in resp.reservations() {
            for instance in reservation.instances() {
                let id = instance.instance_id().ok_or_else(|| Error::MalformedResponse {
                    op: "describe-instances",
                    detail: "instance record without an instance id".into(),
                })?;

                // A pending instance may not have its address yet.
                instances.push(VpnInstance {
                    id: InstanceId(id.to_owned()),
                    ip: instance.public_ip_address().map(str::to_owned),
                });
            }
        }

        Ok(instances)
    }

    async fn terminate_instances(&self, region: &str, ids: &[InstanceId]) -> Result<usize> {
        let resp = self
            .client(region)
            .terminate_instances()
            .set_instance_ids(Some(ids.iter().map(|id| id.0.clone()).collect()))
            .send()
            .await
            .map_err(|e| classify("terminate-instances", e))?;

        Ok(resp.terminating_instances().len())
    }

    async fn list_regions(&self) -> Result<Vec<String>> {
        let resp = self
            .client(&self.home_region)
            .describe_regions()
            .send()
            .await
            .map_err(|e| classify("describe-regions", e))?;

        Ok(resp
            .regions()
            .iter()
            .filter_map(|r| r.region_name())
            .map(str::to_owned)
            .collect())
    }
}
