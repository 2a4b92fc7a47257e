use std::sync::Arc;

use vpn_infra::controller::InstanceController;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<InstanceController>,
    pub config: AppConfig,
}
