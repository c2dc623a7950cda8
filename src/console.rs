use std::sync::Arc;

use anyhow::Result;

use crate::assignment::AssignmentCoordinator;
use crate::config::ConsoleConfig;
use crate::gateway::{HttpGateway, RemoteGateway};
use crate::notify::{NotificationSink, TracingNotifier};
use crate::stores::{AgentStore, BookingStore, EntityStore, OrganizationStore, ServiceStore};

/// Every store and the coordinator, built once and shared by reference
pub struct Console {
    pub organization: Arc<OrganizationStore>,
    pub services: Arc<ServiceStore>,
    pub agents: Arc<AgentStore>,
    pub bookings: Arc<BookingStore>,
    pub assignments: AssignmentCoordinator,
}

impl Console {
    pub fn new(
        gateway: Arc<dyn RemoteGateway>,
        notifier: Arc<dyn NotificationSink>,
        config: &ConsoleConfig,
    ) -> Self {
        let agents = Arc::new(EntityStore::new(gateway.clone(), notifier.clone()));
        let bookings = Arc::new(EntityStore::new(gateway.clone(), notifier.clone()));
        let assignments = AssignmentCoordinator::new(
            gateway.clone(),
            notifier.clone(),
            Arc::clone(&agents),
            Arc::clone(&bookings),
        )
        .enforcing_preconditions(config.enforce_assignment_preconditions);

        Self {
            organization: Arc::new(EntityStore::new(gateway.clone(), notifier.clone())),
            services: Arc::new(EntityStore::new(gateway, notifier)),
            agents,
            bookings,
            assignments,
        }
    }

    /// Console talking HTTP to the configured backend, reporting through tracing
    pub fn connect(config: &ConsoleConfig) -> Result<Self> {
        let gateway = Arc::new(HttpGateway::new(config)?);
        Ok(Self::new(gateway, Arc::new(TracingNotifier), config))
    }
}
