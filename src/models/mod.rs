pub mod agent;
pub mod booking;
pub mod organization;
pub mod service;

use serde::{Deserialize, Serialize};

pub use agent::{Agent, AgentDraft, AgentStatus};
pub use booking::{Booking, BookingStatus, ClientRef, ExtraTask, ServiceRef};
pub use organization::{DayHours, Organization, OrganizationDraft, SocialMedia, Weekday};
pub use service::{AdditionalTask, Availability, PostalAddress, Service, ServiceDraft, MAX_TAGS};

/// GeoJSON point as stored by the backend: `[longitude, latitude]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    #[serde(rename = "type", default = "GeoPoint::kind")]
    pub kind: String,
    pub coordinates: [f64; 2],
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            kind: Self::kind(),
            coordinates: [longitude, latitude],
        }
    }

    fn kind() -> String {
        "Point".to_string()
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates[1]
    }
}

/// Plain latitude/longitude pair, used by agent records
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A file attached to a multipart registration form
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geo_point_stores_longitude_first() {
        let point = GeoPoint::new(59.31, 18.07);
        assert_eq!(point.coordinates, [18.07, 59.31]);
        assert_eq!(point.latitude(), 59.31);

        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["type"], "Point");
    }

    #[test]
    fn geo_point_defaults_missing_type() {
        let point: GeoPoint = serde_json::from_str(r#"{"coordinates":[1.0,2.0]}"#).unwrap();
        assert_eq!(point.kind, "Point");
        assert_eq!(point.latitude(), 2.0);
    }
}
