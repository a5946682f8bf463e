// Module layout (Clean Architecture style)
// - bootstrap: configuration and service wiring
// - infrastructure: PostgreSQL pool and repository adapters
// - presentation: HTTP handlers, routing and JSON envelopes
// - application: ports, use cases and the ownership policy
// - domain: core models

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

#[cfg(test)]
pub(crate) mod testing;
