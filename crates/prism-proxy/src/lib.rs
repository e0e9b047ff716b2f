#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Path routing and transparent forwarding to the native and
//! OpenAI-compatible upstreams

mod error;
mod forward;
mod route;

pub use error::{ProxyError, Result};
pub use forward::Forwarder;
pub use route::{DispatchTarget, PathRouter, RouteDecision, UpstreamKind, rewrite, single_joining_slash};
