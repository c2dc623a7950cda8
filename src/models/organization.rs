use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{GeoPoint, Upload};
use crate::error::GatewayError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];
}

/// Opening hours for one day, or the literal `"Closed"` marker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum DayHours {
    Open { start: String, end: String },
    Closed(ClosedMarker),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum ClosedMarker {
    Closed,
}

impl DayHours {
    pub fn open(start: impl Into<String>, end: impl Into<String>) -> Self {
        DayHours::Open {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn closed() -> Self {
        DayHours::Closed(ClosedMarker::Closed)
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, DayHours::Closed(_))
    }
}

impl std::fmt::Display for DayHours {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayHours::Open { start, end } => write!(f, "{start} - {end}"),
            DayHours::Closed(_) => f.write_str("Closed"),
        }
    }
}

/// Default week: every day 09:00-17:00
pub fn default_business_hours() -> BTreeMap<Weekday, DayHours> {
    Weekday::ALL
        .into_iter()
        .map(|day| (day, DayHours::open("09:00", "17:00")))
        .collect()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SocialMedia {
    #[serde(default)]
    pub facebook: String,
    #[serde(default)]
    pub twitter: String,
    #[serde(default)]
    pub instagram: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

/// The service-provider organization profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub social_media: SocialMedia,
    #[serde(default)]
    pub business_hours: BTreeMap<Weekday, DayHours>,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub bookings_count: u64,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub agent_count: u64,
    #[serde(default)]
    pub service_count: u64,
    #[serde(default)]
    pub clients: Vec<String>,
    #[serde(default)]
    pub review_count: u64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Registration form for the organization
#[derive(Debug, Clone, PartialEq)]
pub struct OrganizationDraft {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub description: String,
    pub website: String,
    pub logo: Option<Upload>,
    pub images: Vec<Upload>,
    pub social_media: SocialMedia,
    pub business_hours: BTreeMap<Weekday, DayHours>,
    pub location: Option<GeoPoint>,
}

impl OrganizationDraft {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: String::new(),
            address: address.into(),
            description: String::new(),
            website: String::new(),
            logo: None,
            images: Vec::new(),
            social_media: SocialMedia::default(),
            business_hours: default_business_hours(),
            location: None,
        }
    }

    /// Name, address and a location are required before submitting
    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.name.trim().is_empty() {
            return Err(GatewayError::Invalid("organization name is required".to_string()));
        }
        if self.address.trim().is_empty() {
            return Err(GatewayError::Invalid("address is required".to_string()));
        }
        if self.location.is_none() {
            return Err(GatewayError::Invalid("location is required".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_hours_accept_closed_marker() {
        let hours: BTreeMap<Weekday, DayHours> = serde_json::from_value(serde_json::json!({
            "Monday": { "start": "08:00", "end": "16:00" },
            "Sunday": "Closed"
        }))
        .unwrap();

        assert_eq!(hours[&Weekday::Monday].to_string(), "08:00 - 16:00");
        assert!(hours[&Weekday::Sunday].is_closed());
        assert_eq!(serde_json::to_value(DayHours::closed()).unwrap(), "Closed");
    }

    #[test]
    fn organization_tolerates_sparse_profile() {
        let org: Organization = serde_json::from_value(serde_json::json!({
            "name": "Sparkle Co",
            "socialMedia": { "facebook": "fb.com/sparkle" },
            "rating": 4.5
        }))
        .unwrap();

        assert_eq!(org.social_media.facebook, "fb.com/sparkle");
        assert!(org.social_media.linkedin.is_none());
        assert!(!org.is_verified);
        assert_eq!(org.rating, 4.5);
    }

    #[test]
    fn draft_requires_name_address_and_location() {
        let mut draft = OrganizationDraft::new("  ", "Main St 1");
        assert!(draft.validate().is_err());

        draft.name = "Sparkle Co".to_string();
        assert!(draft.validate().is_err());

        draft.location = Some(GeoPoint::new(59.0, 18.0));
        assert!(draft.validate().is_ok());
        assert_eq!(draft.business_hours.len(), 7);
    }
}
