//! Larder backend: session-authenticated todo and recipe storage.
//!
//! Layered as domain (entities, ports, services), inbound (HTTP adapter),
//! outbound (persistence adapters), and server wiring.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request tracing middleware attaching per-request trace ids.
pub use middleware::Trace;
