use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// Lifecycle of a booking
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BookingStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 4] = [
        BookingStatus::Pending,
        BookingStatus::InProgress,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::InProgress => "In Progress",
            BookingStatus::Completed => "Completed",
            BookingStatus::Cancelled => "Cancelled",
        }
    }

    /// Only pending bookings can be handed to an agent
    pub fn is_assignable(&self) -> bool {
        match self {
            BookingStatus::Pending => true,
            BookingStatus::InProgress | BookingStatus::Completed | BookingStatus::Cancelled => false,
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        BookingStatus::ALL
            .into_iter()
            .find(|status| status.as_str().to_ascii_lowercase() == wanted)
            .ok_or_else(|| format!("unknown booking status: {s}"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentRef {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Extra work requested on top of the booked service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtraTask {
    pub description: String,
    pub extra_price: serde_json::Value,
}

/// Customer booking as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,
    pub client: ClientRef,
    pub service: ServiceRef,
    /// Absent until the booking has been assigned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<AgentRef>,
    #[serde(default)]
    pub service_provider: Option<String>,
    pub booking_date: String,
    pub booking_time: String,
    pub status: BookingStatus,
    #[serde(default)]
    pub payment_status: String,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    #[serde(default)]
    pub extra_tasks: Vec<ExtraTask>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_progress_keeps_its_space() {
        let status: BookingStatus = serde_json::from_str("\"In Progress\"").unwrap();
        assert_eq!(status, BookingStatus::InProgress);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"In Progress\"");
        assert!(serde_json::from_str::<BookingStatus>("\"InProgress\"").is_err());
    }

    #[test]
    fn status_parses_from_cli_spelling() {
        assert_eq!("in-progress".parse::<BookingStatus>(), Ok(BookingStatus::InProgress));
        assert_eq!("Cancelled".parse::<BookingStatus>(), Ok(BookingStatus::Cancelled));
        assert!("archived".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn only_pending_is_assignable() {
        let assignable: Vec<_> = BookingStatus::ALL
            .into_iter()
            .filter(BookingStatus::is_assignable)
            .collect();
        assert_eq!(assignable, vec![BookingStatus::Pending]);
    }

    #[test]
    fn booking_without_agent_parses() {
        let booking: Booking = serde_json::from_value(serde_json::json!({
            "_id": "b1",
            "client": { "_id": "c1", "name": "Cleo", "email": "cleo@example.com" },
            "service": { "_id": "s1", "name": "Deep clean", "description": "" },
            "serviceProvider": "org1",
            "bookingDate": "2024-05-01",
            "bookingTime": "10:00",
            "status": "Pending",
            "paymentStatus": "Unpaid",
            "location": { "type": "Point", "coordinates": [18.0, 59.0] },
            "extraTasks": [{ "description": "windows", "extraPrice": "20" }],
            "createdAt": "2024-04-30T08:00:00Z",
            "updatedAt": "2024-04-30T08:00:00Z"
        }))
        .unwrap();

        assert!(booking.agent.is_none());
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.extra_tasks.len(), 1);
        assert!(booking.created_at.is_some());
    }
}
