use super::{Creatable, EntityStore, Fetchable, Keyed, Listable, Removable, Resource};
use crate::error::GatewayError;
use crate::gateway::endpoints::agent as routes;
use crate::gateway::{RequestBody, Route};
use crate::models::{Agent, AgentDraft, AgentStatus};

impl Resource for Agent {
    const KIND: &'static str = "agent";
}

impl Keyed for Agent {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Listable for Agent {
    const LISTED: Option<&'static str> = Some("Agents fetched successfully");
    const LIST_FAILED: &'static str = "Failed to fetch agents";

    fn list_route() -> Route {
        routes::list_all()
    }
}

impl Creatable for Agent {
    type Draft = AgentDraft;

    const CREATED: &'static str = "Agent added successfully";
    const CREATE_FAILED: &'static str = "Failed to add agent";

    fn create_route() -> Route {
        routes::register()
    }

    fn create_body(draft: &AgentDraft) -> Result<RequestBody, GatewayError> {
        if draft.name.trim().is_empty() || draft.email.trim().is_empty() {
            return Err(GatewayError::Invalid(
                "agent name and email are required".to_string(),
            ));
        }
        Ok(RequestBody::Json(serde_json::to_value(draft)?))
    }
}

impl Removable for Agent {
    const REMOVED: &'static str = "Agent deleted successfully";
    const REMOVE_FAILED: &'static str = "Failed to delete agent";

    fn remove_route(id: &str) -> Route {
        routes::delete(id)
    }
}

impl Fetchable for Agent {
    const FETCH_FAILED: &'static str = "Failed to fetch agent details";

    fn fetch_route(id: &str) -> Route {
        routes::get_one(id)
    }
}

impl EntityStore<Agent> {
    /// Cached agents with the given status, in backend order
    pub fn with_status(&self, status: AgentStatus) -> Vec<Agent> {
        self.snapshot()
            .into_iter()
            .filter(|agent| agent.status == status)
            .collect()
    }

    /// Cached agents offering a service
    pub fn offering(&self, service: &str) -> Vec<Agent> {
        self.snapshot()
            .into_iter()
            .filter(|agent| agent.services.iter().any(|s| s == service))
            .collect()
    }
}
