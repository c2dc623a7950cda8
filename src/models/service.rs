use serde::{Deserialize, Serialize};

use super::{GeoPoint, Upload};
use crate::error::GatewayError;

/// Upper bound on the tag set of a service
pub const MAX_TAGS: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalTask {
    pub description: String,
    pub extra_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_added: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub country: String,
}

/// Catalog entry offered by the organization
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub base_price: f64,
    #[serde(default)]
    pub estimated_duration: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub availability: Vec<Availability>,
    #[serde(default)]
    pub additional_tasks: Vec<AdditionalTask>,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    #[serde(default)]
    pub address: PostalAddress,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Form for adding a service to the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDraft {
    pub name: String,
    pub description: String,
    pub base_price: f64,
    pub estimated_duration: String,
    pub category: String,
    pub availability: Vec<Availability>,
    pub additional_tasks: Vec<AdditionalTask>,
    pub location: GeoPoint,
    pub address: PostalAddress,
    pub images: Vec<Upload>,
    tags: Vec<String>,
}

impl ServiceDraft {
    pub fn new(name: impl Into<String>, base_price: f64, location: GeoPoint) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            base_price,
            estimated_duration: String::new(),
            category: String::new(),
            availability: Vec::new(),
            additional_tasks: Vec::new(),
            location,
            address: PostalAddress::default(),
            images: Vec::new(),
            tags: Vec::new(),
        }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Add a tag, ignoring blanks and duplicates. Fails once the set is full.
    pub fn add_tag(&mut self, tag: &str) -> Result<(), GatewayError> {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return Ok(());
        }
        if self.tags.len() >= MAX_TAGS {
            return Err(GatewayError::Invalid(format!(
                "a service can carry at most {MAX_TAGS} tags"
            )));
        }
        self.tags.push(tag.to_string());
        Ok(())
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.name.trim().is_empty() {
            return Err(GatewayError::Invalid("service name is required".to_string()));
        }
        if self.tags.len() > MAX_TAGS {
            return Err(GatewayError::Invalid(format!(
                "a service can carry at most {MAX_TAGS} tags"
            )));
        }
        Ok(())
    }
}
