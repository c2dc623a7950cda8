use crate::error::GatewayError;
use crate::gateway::types::{ApiPath, Envelope, Method, RequestBody};
use async_trait::async_trait;

/// Transport boundary to the system of record.
/// Returns any response it receives; interpreting the status is left to the caller.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    /// Send one request and hand back the raw envelope
    async fn request(
        &self,
        method: Method,
        path: &ApiPath,
        body: RequestBody,
    ) -> Result<Envelope, GatewayError>;

    /// Name of the backend, for diagnostics
    fn backend_name(&self) -> &'static str;
}
