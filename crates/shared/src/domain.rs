use std::fmt;

use serde::{Deserialize, Serialize};

/// Reachability of the backend as last observed by a network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    #[default]
    Unknown,
    Online,
    Offline,
}

impl ConnectionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Online => "online",
            Self::Offline => "offline",
        }
    }

    pub fn from_reachable(reachable: bool) -> Self {
        if reachable {
            Self::Online
        } else {
            Self::Offline
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_unknown() {
        assert_eq!(ConnectionStatus::default(), ConnectionStatus::Unknown);
    }

    #[test]
    fn serializes_as_lowercase_strings() {
        assert_eq!(
            serde_json::to_string(&ConnectionStatus::Offline).expect("json"),
            "\"offline\""
        );
        assert_eq!(ConnectionStatus::Online.to_string(), "online");
    }
}
