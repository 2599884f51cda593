//! vigil-engine — the service-check aggregation engine.
//!
//! The [`Collector`] fans out one concurrent check per registered service
//! and fans the results back into a snapshot ordered like the registry.
//! The [`ResultCache`] sits between the collector and the checkers so a
//! service is never probed faster than its configured interval.
//!
//! Failure isolation is layered: checkers convert their own failures into
//! `Unhealthy` states, and the collector additionally guards against a
//! checker violating that contract. Such a service is logged and omitted
//! from the snapshot while the rest collect normally.

pub mod cache;
pub mod collector;

pub use cache::ResultCache;
pub use collector::Collector;
