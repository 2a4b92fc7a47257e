use std::env;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen_addr: SocketAddr,
    /// Region used when the request path names none.
    pub default_region: String,
    /// Launch template for new VPN instances. Optional at startup; POST
    /// requests fail with a remediation message while it is unset.
    pub launch_template_name: Option<String>,
    /// Pause between launching an instance and querying its address.
    pub launch_ip_wait: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            listen_addr: env::var("LISTEN_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8080".into())
                .parse()
                .expect("LISTEN_ADDR must be a valid socket address"),
            default_region: env::var("DEFAULT_REGION").unwrap_or_else(|_| "us-east-1".into()),
            launch_template_name: env::var("LAUNCH_TEMPLATE_NAME").ok(),
            launch_ip_wait: Duration::from_millis(
                env::var("LAUNCH_IP_WAIT_MS")
                    .unwrap_or_else(|_| "1000".into())
                    .parse()
                    .expect("LAUNCH_IP_WAIT_MS must be a valid u64"),
            ),
        }
    }
}
