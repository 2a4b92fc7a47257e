// Shared fixtures: an in-memory compute provider and a test server builder.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum_test::TestServer;

use vpn_api::config::AppConfig;
use vpn_api::routes::api_router;
use vpn_api::state::AppState;
use vpn_infra::controller::InstanceController;
use vpn_infra::types::{InstanceDetail, InstanceId, InstanceState, VpnInstance};
use vpn_infra::{ComputeProvider, Result};

pub const KNOWN_REGIONS: [&str; 3] = ["us-east-1", "us-west-2", "eu-central-1"];

/// In-memory provider with a fixed region list and a mutable instance set.
/// Records every call so tests can assert on call order and counts.
#[derive(Default)]
pub struct FakeCompute {
    pub instances: Mutex<Vec<VpnInstance>>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeCompute {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seeded(instances: Vec<VpnInstance>) -> Arc<Self> {
        Arc::new(Self {
            instances: Mutex::new(instances),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn instance_count(&self) -> usize {
        self.instances.lock().unwrap().len()
    }
}

pub fn instance(id: &str, ip: Option<&str>) -> VpnInstance {
    VpnInstance {
        id: InstanceId(id.to_owned()),
        ip: ip.map(str::to_owned),
    }
}

#[async_trait]
impl ComputeProvider for FakeCompute {
    async fn run_instance(&self, _region: &str, _template_name: &str) -> Result<InstanceId> {
        self.calls.lock().unwrap().push("run".into());
        let id = InstanceId("i-0abc123".into());
        self.instances.lock().unwrap().push(VpnInstance {
            id: id.clone(),
            ip: Some("203.0.113.5".into()),
        });
        Ok(id)
    }

    async fn describe_instance(&self, _region: &str, id: &InstanceId) -> Result<InstanceDetail> {
        self.calls.lock().unwrap().push("describe".into());
        let instances = self.instances.lock().unwrap();
        let found = instances.iter().find(|i| &i.id == id).expect("unknown instance id");
        Ok(InstanceDetail {
            id: found.id.clone(),
            state: InstanceState::Running,
            ip: found.ip.clone(),
        })
    }

    async fn list_vpn_instances(&self, _region: &str) -> Result<Vec<VpnInstance>> {
        self.calls.lock().unwrap().push("list".into());
        Ok(self.instances.lock().unwrap().clone())
    }

    async fn terminate_instances(&self, _region: &str, ids: &[InstanceId]) -> Result<usize> {
        self.calls.lock().unwrap().push(format!("terminate:{}", ids.len()));
        self.instances.lock().unwrap().retain(|i| !ids.contains(&i.id));
        Ok(ids.len())
    }

    async fn list_regions(&self) -> Result<Vec<String>> {
        self.calls.lock().unwrap().push("regions".into());
        Ok(KNOWN_REGIONS.iter().map(|r| r.to_string()).collect())
    }
}

pub fn test_config(template: Option<&str>) -> AppConfig {
    AppConfig {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        default_region: "us-east-1".into(),
        launch_template_name: template.map(str::to_owned),
        launch_ip_wait: Duration::ZERO,
    }
}

pub fn test_server(provider: Arc<FakeCompute>, config: AppConfig) -> TestServer {
    let controller = Arc::new(InstanceController::new(provider, config.launch_ip_wait));
    let state = AppState { controller, config };
    TestServer::new(api_router(state)).unwrap()
}
