// Module layout (Clean Architecture style)
// - bootstrap: configuration, backend wiring and startup
// - infrastructure: Postgres and in-memory adapters
// - presentation: HTTP handlers and routing
// - application: ports, use cases and policies
// - domain: core models

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

#[cfg(test)]
pub(crate) mod testutil;
