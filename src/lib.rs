//! Entity cache and booking-assignment layer for the service-provider console.

pub mod assignment;
pub mod config;
pub mod console;
pub mod error;
pub mod gateway;
pub mod models;
pub mod notify;
pub mod stores;

pub use assignment::{AssignmentCoordinator, AssignmentRequest};
pub use config::ConsoleConfig;
pub use console::Console;
pub use error::GatewayError;
pub use gateway::RemoteGateway;
pub use notify::NotificationSink;
pub use stores::EntityStore;
