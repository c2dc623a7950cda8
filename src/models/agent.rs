use serde::{Deserialize, Serialize};

use super::Coordinates;

/// Availability of a field agent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum AgentStatus {
    Free,
    Busy,
    Offline,
}

impl AgentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Free => "FREE",
            AgentStatus::Busy => "BUSY",
            AgentStatus::Offline => "OFFLINE",
        }
    }

    /// Whether the agent may take a new booking
    pub fn accepts_assignment(&self) -> bool {
        match self {
            AgentStatus::Free => true,
            AgentStatus::Busy | AgentStatus::Offline => false,
        }
    }
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field agent as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub address: String,
    pub status: AgentStatus,
    #[serde(default)]
    pub location: Coordinates,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub service_area: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_bookings: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_bookings: Option<Vec<String>>,
}

/// Registration payload for a new agent
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentDraft {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
    pub address: String,
    pub status: AgentStatus,
    pub location: Coordinates,
    pub services: Vec<String>,
    pub service_area: String,
}

impl AgentDraft {
    /// New agents are registered as `FREE`
    pub fn new(name: impl Into<String>, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone_number: String::new(),
            password: password.into(),
            address: String::new(),
            status: AgentStatus::Free,
            location: Coordinates::default(),
            services: Vec::new(),
            service_area: String::new(),
        }
    }

    /// Toggle a service capability on or off
    pub fn toggle_service(&mut self, service: &str) {
        if let Some(pos) = self.services.iter().position(|s| s == service) {
            self.services.remove(pos);
        } else {
            self.services.push(service.to_string());
        }
    }
}
