pub mod endpoints;
pub mod http;
pub mod mock;
pub mod traits;
pub mod types;

pub use endpoints::{PayloadAt, Route};
pub use http::HttpGateway;
pub use mock::MockGateway;
pub use traits::RemoteGateway;
pub use types::{ApiPath, Envelope, FormPayload, Method, RequestBody, Scope};
