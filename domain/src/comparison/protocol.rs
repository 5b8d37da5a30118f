//! Comparison protocol value object

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Named comparison protocol
///
/// Unrecognized names parse into [`Protocol::Unknown`] so a run can log the
/// mistake and finish with no decision instead of failing.
///
/// # Example
///
/// ```
/// use multillm_domain::Protocol;
///
/// let protocol: Protocol = "3-way".parse().unwrap();
/// assert_eq!(protocol, Protocol::ThreeWay);
/// assert_eq!(protocol.fan_out_cap(), Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// Compare the first two answers once
    OneWay,
    /// Compare the first answer against the second, then the third
    TwoWay,
    /// Like `TwoWay`, then also compare the second and third
    ThreeWay,
    /// Compare two answers; query a third model only if they disagree
    TwoThenThird,
    /// Compare three answers all ways at once
    ThreeAll,
    /// Compare every pair of enabled models and look for a quorum
    NWay,
    /// Query only, no comparison
    None,
    /// Name that matched no protocol
    Unknown(String),
}

impl Protocol {
    /// Get the string identifier for this protocol
    pub fn as_str(&self) -> &str {
        match self {
            Protocol::OneWay => "1-way",
            Protocol::TwoWay => "2-way",
            Protocol::ThreeWay => "3-way",
            Protocol::TwoThenThird => "2-1",
            Protocol::ThreeAll => "3-all",
            Protocol::NWay => "n-way",
            Protocol::None => "none",
            Protocol::Unknown(name) => name,
        }
    }

    /// All recognized protocols, in help-text order
    pub fn known() -> Vec<Protocol> {
        vec![
            Protocol::OneWay,
            Protocol::TwoWay,
            Protocol::ThreeWay,
            Protocol::TwoThenThird,
            Protocol::ThreeAll,
            Protocol::NWay,
            Protocol::None,
        ]
    }

    /// Maximum number of models queried up front; `None` means every enabled model
    pub fn fan_out_cap(&self) -> Option<usize> {
        match self {
            Protocol::OneWay | Protocol::TwoThenThird => Some(2),
            Protocol::TwoWay | Protocol::ThreeWay | Protocol::ThreeAll => Some(3),
            Protocol::NWay | Protocol::None | Protocol::Unknown(_) => None,
        }
    }

    /// Number of non-empty answers needed before any judge is consulted
    pub fn min_candidates(&self) -> usize {
        match self {
            Protocol::OneWay | Protocol::TwoThenThird | Protocol::NWay => 2,
            Protocol::TwoWay | Protocol::ThreeWay | Protocol::ThreeAll => 3,
            Protocol::None | Protocol::Unknown(_) => 0,
        }
    }

    /// Whether this protocol ever asks a judge
    pub fn adjudicates(&self) -> bool {
        !matches!(self, Protocol::None | Protocol::Unknown(_))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Protocol::Unknown(_))
    }

    /// One-line description for help output
    pub fn description(&self) -> &'static str {
        match self {
            Protocol::OneWay => "compare two responses",
            Protocol::TwoWay => "compare first response with second and third response",
            Protocol::ThreeWay => "compare three responses to see if any two agree",
            Protocol::TwoThenThird => {
                "compare 2 responses and go on to a third if first two disagree"
            }
            Protocol::ThreeAll => "compare three responses all ways",
            Protocol::NWay => "compare all the responses each way",
            Protocol::None => "just query, no comparison",
            Protocol::Unknown(_) => "unknown protocol",
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Protocol {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "1-way" => Protocol::OneWay,
            "2-way" => Protocol::TwoWay,
            "3-way" => Protocol::ThreeWay,
            "2-1" => Protocol::TwoThenThird,
            "3-all" => Protocol::ThreeAll,
            "n-way" => Protocol::NWay,
            "none" => Protocol::None,
            other => Protocol::Unknown(other.to_string()),
        })
    }
}

impl From<&str> for Protocol {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(protocol) => protocol,
            Err(never) => match never {},
        }
    }
}

impl Serialize for Protocol {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Protocol {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Protocol::from(s.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_roundtrip() {
        for protocol in Protocol::known() {
            assert_eq!(Protocol::from(protocol.as_str()), protocol);
        }
    }

    #[test]
    fn test_unknown_protocol() {
        let protocol = Protocol::from("4-way");
        assert_eq!(protocol, Protocol::Unknown("4-way".to_string()));
        assert!(protocol.is_unknown());
        assert!(!protocol.adjudicates());
        assert_eq!(protocol.to_string(), "4-way");
    }

    #[test]
    fn test_fan_out_caps() {
        assert_eq!(Protocol::OneWay.fan_out_cap(), Some(2));
        assert_eq!(Protocol::TwoThenThird.fan_out_cap(), Some(2));
        assert_eq!(Protocol::TwoWay.fan_out_cap(), Some(3));
        assert_eq!(Protocol::ThreeWay.fan_out_cap(), Some(3));
        assert_eq!(Protocol::ThreeAll.fan_out_cap(), Some(3));
        assert_eq!(Protocol::NWay.fan_out_cap(), None);
        assert_eq!(Protocol::None.fan_out_cap(), None);
    }

    #[test]
    fn test_min_candidates() {
        assert_eq!(Protocol::OneWay.min_candidates(), 2);
        assert_eq!(Protocol::TwoThenThird.min_candidates(), 2);
        assert_eq!(Protocol::NWay.min_candidates(), 2);
        assert_eq!(Protocol::TwoWay.min_candidates(), 3);
        assert_eq!(Protocol::ThreeAll.min_candidates(), 3);
        assert_eq!(Protocol::None.min_candidates(), 0);
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Protocol::TwoThenThird).unwrap();
        assert_eq!(json, "\"2-1\"");
        let parsed: Protocol = serde_json::from_str("\"n-way\"").unwrap();
        assert_eq!(parsed, Protocol::NWay);
    }
}
