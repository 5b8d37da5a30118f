//! Web front end configuration from TOML (`[web]` section)

use multillm_domain::Protocol;
use serde::{Deserialize, Serialize};

/// Raw web configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWebConfig {
    /// Address the server listens on
    pub bind: String,
    /// Protocol used by `POST /prompt`
    pub protocol: String,
    /// Protocols selectable through `POST /compare`
    pub protocols: Vec<String>,
}

impl Default for FileWebConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".to_string(),
            protocol: "3-way".to_string(),
            protocols: vec!["1-way".to_string(), "2-way".to_string(), "3-way".to_string()],
        }
    }
}

impl FileWebConfig {
    pub fn default_protocol(&self) -> Protocol {
        Protocol::from(self.protocol.as_str())
    }

    pub fn selectable_protocols(&self) -> Vec<Protocol> {
        self.protocols
            .iter()
            .map(|name| Protocol::from(name.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let web = FileWebConfig::default();
        assert_eq!(web.default_protocol(), Protocol::ThreeWay);
        assert_eq!(
            web.selectable_protocols(),
            vec![Protocol::OneWay, Protocol::TwoWay, Protocol::ThreeWay]
        );
    }
}
