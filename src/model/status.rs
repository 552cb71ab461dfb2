//! Connection and service status types

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status shown by dots, cards and indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Connected,
    Connecting,
    #[default]
    Disconnected,
    Error,
    Success,
    Warning,
    Info,
}

impl Status {
    /// Parse a status string; anything unrecognized is `Disconnected`
    pub fn parse(s: &str) -> Status {
        match s.trim().to_ascii_lowercase().as_str() {
            "connected" => Status::Connected,
            "connecting" => Status::Connecting,
            "error" => Status::Error,
            "success" => Status::Success,
            "warning" => Status::Warning,
            "info" => Status::Info,
            _ => Status::Disconnected,
        }
    }

    /// Lowercase key used in panel files
    pub fn key(&self) -> &'static str {
        match self {
            Status::Connected => "connected",
            Status::Connecting => "connecting",
            Status::Disconnected => "disconnected",
            Status::Error => "error",
            Status::Success => "success",
            Status::Warning => "warning",
            Status::Info => "info",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Status::Connected | Status::Success => "Connected",
            Status::Connecting => "Connecting...",
            Status::Warning => "Warning",
            Status::Error => "Error",
            Status::Info => "Info",
            Status::Disconnected => "Disconnected",
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, Status::Connecting)
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        Status::parse(&s)
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.key().to_string()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Transport used by a backing service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    WebSocket,
    #[default]
    Http,
}

impl ServiceKind {
    pub fn badge(&self) -> &'static str {
        match self {
            ServiceKind::WebSocket => "WebSocket",
            ServiceKind::Http => "HTTP",
        }
    }
}

/// Declared service in the panel file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSpec {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub kind: ServiceKind,
}

/// Runtime view of a service as reported by the store
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceState {
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub kind: ServiceKind,
    pub status: Status,
    pub error: Option<String>,
    pub last_checked: Option<DateTime<Local>>,
    pub reconnect_attempts: u32,
}

impl ServiceState {
    pub fn from_spec(spec: &ServiceSpec) -> Self {
        Self {
            name: spec.name.clone(),
            description: spec.description.clone(),
            url: spec.url.clone(),
            kind: spec.kind,
            status: Status::Disconnected,
            error: None,
            last_checked: None,
            reconnect_attempts: 0,
        }
    }

    pub fn formatted_last_checked(&self) -> Option<String> {
        self.last_checked
            .map(|t| format!("Checked {}", t.format("%H:%M:%S")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_defaults_to_disconnected() {
        assert_eq!(Status::parse("connected"), Status::Connected);
        assert_eq!(Status::parse(" Warning "), Status::Warning);
        assert_eq!(Status::parse("exploded"), Status::Disconnected);
        assert_eq!(Status::parse(""), Status::Disconnected);
    }

    #[test]
    fn test_status_titles() {
        assert_eq!(Status::Success.title(), "Connected");
        assert_eq!(Status::Connecting.title(), "Connecting...");
        assert_eq!(Status::Info.to_string(), "Info");
    }

    #[test]
    fn test_status_deserialize_unknown_is_disconnected() {
        let status: Status = serde_yaml::from_str("bogus").unwrap();
        assert_eq!(status, Status::Disconnected);
        let status: Status = serde_yaml::from_str("error").unwrap();
        assert_eq!(status, Status::Error);
    }

    #[test]
    fn test_service_kind_from_yaml() {
        let spec: ServiceSpec =
            serde_yaml::from_str("name: Motion\nkind: websocket\nurl: ws://localhost:8765").unwrap();
        assert_eq!(spec.kind, ServiceKind::WebSocket);
        assert_eq!(spec.kind.badge(), "WebSocket");

        let state = ServiceState::from_spec(&spec);
        assert_eq!(state.status, Status::Disconnected);
        assert!(state.formatted_last_checked().is_none());
    }
}
