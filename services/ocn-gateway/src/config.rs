//! Gateway Configuration
//!
//! Bind address and per-agent upstream base URLs, resolved from the
//! environment with the demo fleet's local ports as defaults.

use std::collections::BTreeMap;
use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

use ocn_types::Agent;

/// Gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Address the proxy listens on
    pub addr: SocketAddr,

    /// Agent key to upstream base URL
    pub agents: BTreeMap<String, String>,
}

impl GatewayConfig {
    /// Resolve configuration from the environment.
    ///
    /// `OCN_GATEWAY_ADDR` overrides the bind address and
    /// `OCN_<AGENT>_URL` (e.g. `OCN_ORCA_URL`) overrides one upstream.
    pub fn from_env() -> anyhow::Result<Self> {
        let addr = match std::env::var("OCN_GATEWAY_ADDR") {
            Ok(raw) => raw.parse()?,
            Err(_) => default_addr(),
        };

        let mut agents = BTreeMap::new();
        for agent in Agent::ROSTER {
            let key = agent.as_str().to_string();
            let var = format!("OCN_{}_URL", key.to_uppercase());
            let base = std::env::var(&var)
                .unwrap_or_else(|_| format!("http://localhost:{}", default_port(agent)));
            agents.insert(key, base);
        }

        Ok(Self { addr, agents })
    }

    /// Base URL for an agent key, if configured
    pub fn agent_base(&self, agent: &str) -> Option<&str> {
        self.agents.get(agent).map(String::as_str)
    }

    /// Configured agent keys, sorted
    pub fn agent_names(&self) -> Vec<&str> {
        self.agents.keys().map(String::as_str).collect()
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        let agents = Agent::ROSTER
            .iter()
            .map(|agent| {
                (
                    agent.as_str().to_string(),
                    format!("http://localhost:{}", default_port(*agent)),
                )
            })
            .collect();
        Self {
            addr: default_addr(),
            agents,
        }
    }
}

fn default_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8088))
}

/// Local dev ports the agent fleet binds by convention
fn default_port(agent: Agent) -> u16 {
    match agent {
        Agent::Orca => 8080,
        Agent::Weave => 8082,
        Agent::Okra => 8083,
        Agent::Opal => 8084,
        Agent::Onyx => 8086,
        Agent::Olive => 8087,
        Agent::System => 8088,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_covers_the_roster() {
        let config = GatewayConfig::default();
        assert_eq!(config.agents.len(), 6);
        assert_eq!(
            config.agent_base("orca"),
            Some("http://localhost:8080")
        );
        assert_eq!(
            config.agent_base("olive"),
            Some("http://localhost:8087")
        );
        assert!(config.agent_base("system").is_none());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = GatewayConfig::default();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["agents"]["orca"], "http://localhost:8080");

        let back: GatewayConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back.addr, config.addr);
        assert_eq!(back.agents, config.agents);
    }

    #[test]
    fn test_agent_names_sorted() {
        let config = GatewayConfig::default();
        let names = config.agent_names();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
