//! Endpoint table.
//!
//! The backend does not wrap its responses uniformly, so every route records
//! where its payload lives alongside the status code that counts as success:
//!
//! | route                       | success | payload        |
//! |-----------------------------|---------|----------------|
//! | POST auth/agent-register    | 201     | envelope root  |
//! | GET  all-agents             | 200     | `data`         |
//! | DELETE agent/{id}           | 200     | none           |
//! | GET  agent/{id}             | 200     | `agent`        |
//! | GET  bookings               | 200     | `bookings`     |
//! | POST assign-booking         | 200     | none           |
//! | GET  booking/{id}           | 200     | `booking`      |
//! | GET  org-detail             | 200     | envelope root  |
//! | POST register-org           | 201     | envelope root  |
//! | POST add-new-service        | 201     | envelope root  |
//! | GET  services               | 200     | `data`         |
//! | DELETE delete-service/{id}  | 200     | none           |

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::GatewayError;
use crate::gateway::traits::RemoteGateway;
use crate::gateway::types::{ApiPath, Envelope, Method, RequestBody};

pub const STATUS_OK: u16 = 200;
pub const STATUS_CREATED: u16 = 201;

/// Location of the interesting part of a response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadAt {
    Root,
    Key(&'static str),
    /// Only the status code matters
    StatusOnly,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub method: Method,
    pub path: ApiPath,
    pub expect: u16,
    pub payload: PayloadAt,
}

impl Route {
    fn new(method: Method, path: ApiPath, expect: u16, payload: PayloadAt) -> Self {
        Self {
            method,
            path,
            expect,
            payload,
        }
    }

    /// Check the status and dig the payload out of the envelope
    pub fn extract(&self, envelope: Envelope) -> Result<Value, GatewayError> {
        if envelope.status != self.expect {
            return Err(GatewayError::UnexpectedStatus {
                expected: self.expect,
                actual: envelope.status,
            });
        }

        match self.payload {
            PayloadAt::StatusOnly => Ok(Value::Null),
            PayloadAt::Root => match envelope.body {
                Value::Null => Err(GatewayError::MalformedPayload(format!(
                    "{} returned an empty body",
                    self.path
                ))),
                body => Ok(body),
            },
            PayloadAt::Key(key) => match envelope.body {
                Value::Object(mut map) => match map.remove(key) {
                    Some(Value::Null) | None => Err(GatewayError::MalformedPayload(format!(
                        "{} response has no `{}` field",
                        self.path, key
                    ))),
                    Some(value) => Ok(value),
                },
                _ => Err(GatewayError::MalformedPayload(format!(
                    "{} response is not an object",
                    self.path
                ))),
            },
        }
    }

    /// Send the request and return the unwrapped payload
    pub async fn call(
        &self,
        gateway: &dyn RemoteGateway,
        body: RequestBody,
    ) -> Result<Value, GatewayError> {
        debug!("{} {} via {}", self.method, self.path, gateway.backend_name());
        let envelope = gateway.request(self.method, &self.path, body).await?;
        self.extract(envelope)
    }

    /// Send the request and decode the payload into `T`
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        gateway: &dyn RemoteGateway,
        body: RequestBody,
    ) -> Result<T, GatewayError> {
        let payload = self.call(gateway, body).await?;
        Ok(serde_json::from_value(payload)?)
    }
}

pub mod agent {
    use super::*;

    pub fn register() -> Route {
        Route::new(
            Method::Post,
            ApiPath::auth("agent-register"),
            STATUS_CREATED,
            PayloadAt::Root,
        )
    }

    pub fn list_all() -> Route {
        Route::new(
            Method::Get,
            ApiPath::shopkeeper("all-agents"),
            STATUS_OK,
            PayloadAt::Key("data"),
        )
    }

    pub fn delete(id: &str) -> Route {
        Route::new(
            Method::Delete,
            ApiPath::shopkeeper(format!("agent/{id}")),
            STATUS_OK,
            PayloadAt::StatusOnly,
        )
    }

    pub fn get_one(id: &str) -> Route {
        Route::new(
            Method::Get,
            ApiPath::shopkeeper(format!("agent/{id}")),
            STATUS_OK,
            PayloadAt::Key("agent"),
        )
    }
}

pub mod booking {
    use super::*;

    pub fn list_all() -> Route {
        Route::new(
            Method::Get,
            ApiPath::shopkeeper("bookings"),
            STATUS_OK,
            PayloadAt::Key("bookings"),
        )
    }

    pub fn assign() -> Route {
        Route::new(
            Method::Post,
            ApiPath::shopkeeper("assign-booking"),
            STATUS_OK,
            PayloadAt::StatusOnly,
        )
    }

    pub fn get_one(id: &str) -> Route {
        Route::new(
            Method::Get,
            ApiPath::shopkeeper(format!("booking/{id}")),
            STATUS_OK,
            PayloadAt::Key("booking"),
        )
    }
}

pub mod organization {
    use super::*;

    pub fn detail() -> Route {
        Route::new(
            Method::Get,
            ApiPath::shopkeeper("org-detail"),
            STATUS_OK,
            PayloadAt::Root,
        )
    }

    pub fn register() -> Route {
        Route::new(
            Method::Post,
            ApiPath::shopkeeper("register-org"),
            STATUS_CREATED,
            PayloadAt::Root,
        )
    }
}

pub mod service {
    use super::*;

    pub fn add() -> Route {
        Route::new(
            Method::Post,
            ApiPath::shopkeeper("add-new-service"),
            STATUS_CREATED,
            PayloadAt::Root,
        )
    }

    pub fn list() -> Route {
        Route::new(
            Method::Get,
            ApiPath::shopkeeper("services"),
            STATUS_OK,
            PayloadAt::Key("data"),
        )
    }

    pub fn delete(id: &str) -> Route {
        Route::new(
            Method::Delete,
            ApiPath::shopkeeper(format!("delete-service/{id}")),
            STATUS_OK,
            PayloadAt::StatusOnly,
        )
    }
}
