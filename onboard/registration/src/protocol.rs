use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Version of the network contract interface.
///
/// `Legacy` registrations carry the owner address up front and no fee. `Current` registrations
/// append the token amount that funds the validator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolVersion {
    Legacy,
    #[default]
    Current,
}

impl ProtocolVersion {
    /// Whether registrations under this version are funded with a fee
    pub fn has_fee_model(&self) -> bool {
        matches!(self, ProtocolVersion::Current)
    }
}

impl Display for ProtocolVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ProtocolVersion::Legacy => write!(f, "legacy"),
            ProtocolVersion::Current => write!(f, "current"),
        }
    }
}

impl FromStr for ProtocolVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "legacy" => Ok(ProtocolVersion::Legacy),
            "current" => Ok(ProtocolVersion::Current),
            other => Err(format!("Unknown protocol version: {other}")),
        }
    }
}
