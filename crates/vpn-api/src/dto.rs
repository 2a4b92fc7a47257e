use serde::Serialize;
use vpn_infra::types::{InstanceId, VpnInstance};

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub region: String,
    pub running_instances: Vec<VpnInstance>,
}

#[derive(Debug, Serialize)]
pub struct LaunchResponse {
    pub region: String,
    pub instance_id: InstanceId,
    pub ip: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TerminateResponse {
    pub region: String,
    pub instances_terminated: usize,
}
