use babycam_core::{ClientConfig, IceServerConfig};
use std::net::IpAddr;
use tracing::warn;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8787;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface or hostname to listen on.
    pub host: String,
    pub port: u16,
    /// Externally reachable origin, used when building share links.
    pub public_base_url: Option<String>,
    pub ice_servers: Vec<IceServerConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            public_base_url: None,
            ice_servers: IceServerConfig::default_servers(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn primary_origin(&self) -> String {
        match &self.public_base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://localhost:{}", self.port),
        }
    }

    /// `http://<ip>:<port>` for every non-loopback IPv4 interface.
    pub fn lan_origins(&self) -> Vec<String> {
        let interfaces = match local_ip_address::list_afinet_netifas() {
            Ok(interfaces) => interfaces,
            Err(e) => {
                warn!("Could not list network interfaces: {}", e);
                return Vec::new();
            }
        };

        interfaces
            .into_iter()
            .filter_map(|(_, ip)| match ip {
                IpAddr::V4(v4) if !v4.is_loopback() => Some(format!("http://{}:{}", v4, self.port)),
                _ => None,
            })
            .collect()
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            public_base_url: self.public_base_url.clone().unwrap_or_default(),
            ice_servers: self.ice_servers.clone(),
            local_watch_urls: self
                .lan_origins()
                .into_iter()
                .map(|origin| format!("{}/watch", origin))
                .collect(),
        }
    }
}

/// Parses the `ICE_SERVERS` JSON list. Unset, empty or invalid input falls
/// back to the public STUN server.
pub fn parse_ice_servers(raw: Option<&str>) -> Vec<IceServerConfig> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return IceServerConfig::default_servers();
    };

    match serde_json::from_str::<Vec<IceServerConfig>>(raw) {
        Ok(servers) if !servers.is_empty() => servers,
        Ok(_) => IceServerConfig::default_servers(),
        Err(e) => {
            warn!("ICE_SERVERS is invalid ({}), using default STUN", e);
            IceServerConfig::default_servers()
        }
    }
}
