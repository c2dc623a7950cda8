//! Booking → agent assignment.
//!
//! The coordinator only reads the agent and booking caches. A successful
//! assignment is not reflected locally: both stores keep showing the old
//! state until they are listed again. Two overlapping assignments for the
//! same booking are both sent; the backend decides which one sticks.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::error::GatewayError;
use crate::gateway::endpoints::booking as routes;
use crate::gateway::{RemoteGateway, RequestBody};
use crate::models::Agent;
use crate::notify::NotificationSink;
use crate::stores::{AgentStore, BookingStore};

const ASSIGNED: &str = "Booking assigned successfully";
const ASSIGN_FAILED: &str = "Error in assigning";

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRequest {
    pub booking_id: String,
    pub agent_id: String,
}

pub struct AssignmentCoordinator {
    gateway: Arc<dyn RemoteGateway>,
    notifier: Arc<dyn NotificationSink>,
    agents: Arc<AgentStore>,
    bookings: Arc<BookingStore>,
    enforce_preconditions: bool,
}

impl AssignmentCoordinator {
    pub fn new(
        gateway: Arc<dyn RemoteGateway>,
        notifier: Arc<dyn NotificationSink>,
        agents: Arc<AgentStore>,
        bookings: Arc<BookingStore>,
    ) -> Self {
        Self {
            gateway,
            notifier,
            agents,
            bookings,
            enforce_preconditions: false,
        }
    }

    /// Reject assignments the cached snapshots already rule out
    pub fn enforcing_preconditions(mut self, enforce: bool) -> Self {
        self.enforce_preconditions = enforce;
        self
    }

    /// Refresh the agent list for the picker and return it
    pub async fn open_dialog(&self) -> Vec<Agent> {
        self.agents.list().await;
        self.agents.snapshot()
    }

    /// Check the cached booking is `Pending` and the cached agent is `FREE`.
    /// Records missing from the cache pass; the backend is the authority.
    pub fn check(&self, booking_id: &str, agent_id: &str) -> Result<(), GatewayError> {
        if let Some(booking) = self.bookings.find(booking_id) {
            if !booking.status.is_assignable() {
                return Err(GatewayError::Invalid(format!(
                    "booking {} is {}",
                    booking_id, booking.status
                )));
            }
        }
        if let Some(agent) = self.agents.find(agent_id) {
            if !agent.status.accepts_assignment() {
                return Err(GatewayError::Invalid(format!(
                    "agent {} is {}",
                    agent_id, agent.status
                )));
            }
        }
        Ok(())
    }

    /// Ask the backend to bind a booking to an agent.
    /// Neither cache is touched, whatever the outcome.
    pub async fn assign(&self, booking_id: &str, agent_id: &str) {
        if self.enforce_preconditions {
            if let Err(err) = self.check(booking_id, agent_id) {
                warn!("Assignment of {} to {} refused: {}", booking_id, agent_id, err);
                self.notifier.notify_error(ASSIGN_FAILED);
                return;
            }
        }

        let request = AssignmentRequest {
            booking_id: booking_id.to_string(),
            agent_id: agent_id.to_string(),
        };
        let sent = match serde_json::to_value(&request) {
            Ok(body) => {
                routes::assign()
                    .call(self.gateway.as_ref(), RequestBody::Json(body))
                    .await
            }
            Err(err) => Err(err.into()),
        };

        match sent {
            Ok(_) => {
                info!("Booking {} assigned to agent {}", booking_id, agent_id);
                self.notifier.notify_success(ASSIGNED);
            }
            Err(err) => {
                warn!("Assignment of {} to {} failed: {}", booking_id, agent_id, err);
                self.notifier.notify_error(ASSIGN_FAILED);
            }
        }
    }
}
