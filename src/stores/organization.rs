use tracing::info;

use super::{EntityStore, Resource};
use crate::error::GatewayError;
use crate::gateway::endpoints::organization as routes;
use crate::gateway::{FormPayload, RequestBody};
use crate::models::{Organization, OrganizationDraft};

impl Resource for Organization {
    const KIND: &'static str = "organization";
}

fn registration_form(draft: &OrganizationDraft) -> Result<FormPayload, GatewayError> {
    draft.validate()?;

    let mut form = FormPayload::new()
        .text("name", draft.name.trim())
        .text("phone", draft.phone.trim())
        .text("address", draft.address.trim())
        .text("description", draft.description.trim())
        .text("website", draft.website.trim());

    if let Some(logo) = &draft.logo {
        form = form.file("logo", logo.clone());
    }
    for image in &draft.images {
        form = form.file("images", image.clone());
    }

    let form = form
        .json("socialMedia", &draft.social_media)?
        .json("businessHours", &draft.business_hours)?
        .json("location", &draft.location)?;
    Ok(form)
}

/// There is one organization per deployment; it lives in the selection slot.
impl EntityStore<Organization> {
    pub fn profile(&self) -> Option<Organization> {
        self.current()
    }

    /// Fetch the profile. Returns whether one is registered.
    /// A failed fetch keeps whatever profile was loaded before.
    pub async fn load(&self) -> bool {
        match routes::detail()
            .fetch::<Organization>(self.gateway(), RequestBody::Empty)
            .await
        {
            Ok(org) => {
                info!("Loaded organization profile for {}", org.name);
                self.set_current(Some(org));
                true
            }
            Err(err) => {
                self.report("load", "Failed to fetch organization details", &err);
                false
            }
        }
    }

    /// Register the organization and keep the server's profile
    pub async fn register(&self, draft: &OrganizationDraft) -> bool {
        let registered = match registration_form(draft) {
            Ok(form) => {
                routes::register()
                    .fetch::<Organization>(self.gateway(), RequestBody::Form(form))
                    .await
            }
            Err(err) => Err(err),
        };

        match registered {
            Ok(org) => {
                self.set_current(Some(org));
                self.notifier()
                    .notify_success("Organization registered successfully");
                true
            }
            Err(err) => {
                self.report("register", "Failed to register organization", &err);
                false
            }
        }
    }

    /// Replace the cached profile after a full-profile edit
    pub fn replace_details(&self, org: Organization) {
        self.set_current(Some(org));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{ApiPath, Method, MockGateway};
    use crate::models::{DayHours, GeoPoint, Upload, Weekday};
    use crate::notify::RecordingNotifier;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn store() -> (Arc<MockGateway>, Arc<RecordingNotifier>, EntityStore<Organization>) {
        let gateway = Arc::new(MockGateway::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let store = EntityStore::new(gateway.clone(), notifier.clone());
        (gateway, notifier, store)
    }

    fn org_json(name: &str) -> Value {
        json!({
            "name": name,
            "phone": "555-0101",
            "address": "Main St 1",
            "businessHours": { "Monday": { "start": "09:00", "end": "17:00" }, "Sunday": "Closed" },
            "serviceCount": 4,
            "agentCount": 2
        })
    }

    #[tokio::test]
    async fn load_reads_envelope_root() {
        let (gateway, _notifier, store) = store();
        gateway.reply(Method::Get, ApiPath::shopkeeper("org-detail"), 200, org_json("Sparkle Co"));

        assert!(store.load().await);

        let org = store.profile().unwrap();
        assert_eq!(org.service_count, 4);
        assert!(org.business_hours[&Weekday::Sunday].is_closed());
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_profile() {
        let (gateway, notifier, store) = store();
        gateway.reply(Method::Get, ApiPath::shopkeeper("org-detail"), 200, org_json("Sparkle Co"));
        gateway.reply(Method::Get, ApiPath::shopkeeper("org-detail"), 404, json!({}));
        store.load().await;

        assert!(!store.load().await);

        assert_eq!(store.profile().unwrap().name, "Sparkle Co");
        assert_eq!(notifier.errors(), vec!["Failed to fetch organization details"]);
    }

    #[tokio::test]
    async fn register_sends_form_and_stores_profile() {
        let (gateway, notifier, store) = store();
        gateway.reply(Method::Post, ApiPath::shopkeeper("register-org"), 201, org_json("Sparkle Co"));

        let mut draft = OrganizationDraft::new(" Sparkle Co ", "Main St 1");
        draft.location = Some(GeoPoint::new(59.3, 18.1));
        draft.logo = Some(Upload::new("logo.png", "image/png", vec![1, 2, 3]));
        draft.business_hours.insert(Weekday::Sunday, DayHours::closed());

        assert!(store.register(&draft).await);

        let sent = gateway.requests();
        let RequestBody::Form(form) = &sent[0].body else {
            panic!("expected multipart body");
        };
        assert_eq!(form.field("name"), Some("Sparkle Co"));
        assert!(form.field("businessHours").unwrap().contains(r#""Sunday":"Closed""#));
        assert_eq!(
            form.field("location"),
            Some(r#"{"type":"Point","coordinates":[18.1,59.3]}"#)
        );
        assert_eq!(form.files[0].field, "logo");
        assert_eq!(store.profile().unwrap().agent_count, 2);
        assert_eq!(notifier.successes(), vec!["Organization registered successfully"]);
    }

    #[tokio::test]
    async fn register_without_location_is_not_sent() {
        let (gateway, notifier, store) = store();

        assert!(!store.register(&OrganizationDraft::new("Sparkle Co", "Main St 1")).await);

        assert!(gateway.requests().is_empty());
        assert!(store.profile().is_none());
        assert_eq!(notifier.errors(), vec!["Failed to register organization"]);
    }

    #[test]
    fn replace_details_is_local_only() {
        let (gateway, _notifier, store) = store();
        let org: Organization = serde_json::from_value(org_json("Renamed Co")).unwrap();

        store.replace_details(org);

        assert_eq!(store.profile().unwrap().name, "Renamed Co");
        assert!(gateway.requests().is_empty());
    }
}
