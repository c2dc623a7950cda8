use super::{Creatable, Keyed, Listable, Removable, Resource};
use crate::error::GatewayError;
use crate::gateway::endpoints::service as routes;
use crate::gateway::{FormPayload, RequestBody, Route};
use crate::models::{Service, ServiceDraft};

impl Resource for Service {
    const KIND: &'static str = "service";
}

impl Keyed for Service {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Listable for Service {
    const LISTED: Option<&'static str> = None;
    const LIST_FAILED: &'static str = "Failed to fetch services";

    fn list_route() -> Route {
        routes::list()
    }
}

impl Creatable for Service {
    type Draft = ServiceDraft;

    const CREATED: &'static str = "Service added successfully";
    const CREATE_FAILED: &'static str = "Failed to add service";

    fn create_route() -> Route {
        routes::add()
    }

    /// Scalars go as plain fields, structured values as JSON-encoded fields,
    /// images as repeated `images` file parts.
    fn create_body(draft: &ServiceDraft) -> Result<RequestBody, GatewayError> {
        draft.validate()?;

        let mut form = FormPayload::new()
            .text("name", draft.name.as_str())
            .text("description", draft.description.as_str())
            .text("basePrice", draft.base_price.to_string())
            .text("estimatedDuration", draft.estimated_duration.as_str())
            .text("category", draft.category.as_str())
            .json("availability", &draft.availability)?
            .json("additionalTasks", &draft.additional_tasks)?
            .json("location", &draft.location)?
            .json("address", &draft.address)?
            .json("tags", &draft.tags())?;

        for image in &draft.images {
            form = form.file("images", image.clone());
        }

        Ok(RequestBody::Form(form))
    }
}

impl Removable for Service {
    const REMOVED: &'static str = "Service deleted successfully";
    const REMOVE_FAILED: &'static str = "Failed to delete service";

    fn remove_route(id: &str) -> Route {
        routes::delete(id)
    }
}
