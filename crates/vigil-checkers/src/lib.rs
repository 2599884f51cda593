//! vigil-checkers — pluggable health probes.
//!
//! Every probe variant implements the [`Checker`] contract: one call, one
//! [`ServiceState`], no escaping failures. The [`Registry`] binds configured
//! services to instantiated checkers once at startup; check-time dispatch
//! goes through the trait object.
//!
//! Built-in variants:
//!
//! | Kind | Checker | Probes |
//! |---|---|---|
//! | `http` | [`HttpChecker`] | an HTTP endpoint against an expected status |
//! | `rss` | [`FeedChecker`] | an RSS/Atom feed's reachability and parseability |

pub mod error;
pub mod feed;
pub mod http;
pub mod registry;

pub use error::{CheckerError, CheckerResult};
pub use feed::FeedChecker;
pub use http::HttpChecker;
pub use registry::{Registry, RegistryEntry, build_checker};

use async_trait::async_trait;
use vigil_core::{ConfigSchema, ServiceState};

/// Capability contract for one monitored target.
#[async_trait]
pub trait Checker: Send + Sync + std::fmt::Debug {
    /// Perform one probe attempt.
    ///
    /// Transport errors, timeouts, and parse errors are all converted into
    /// an `Unhealthy` state with a `details.error` description; this method
    /// never fails and applies its own configured timeout.
    async fn check(&self) -> ServiceState;

    /// Declarative description of the accepted configuration keys.
    fn config_schema(&self) -> ConfigSchema;
}
