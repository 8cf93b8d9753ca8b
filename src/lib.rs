//! Per-request CORS decision engine.
//!
//! Build a [`Cors`] once from [`CorsOptions`], then call [`Cors::check`] for
//! every request. The returned [`CorsDecision`] says which headers to write
//! and whether the request is a preflight that must be answered immediately.

mod allowed_headers;
mod allowed_methods;
#[cfg(feature = "serde")]
pub mod config;
pub mod constants;
mod context;
mod cors;
mod exposed_headers;
mod header_builder;
mod headers;
mod options;
mod origin;
mod result;

pub use allowed_headers::AllowedHeaders;
pub use allowed_methods::AllowedMethods;
#[cfg(feature = "serde")]
pub use config::CorsConfig;
pub use context::RequestContext;
pub use cors::Cors;
pub use exposed_headers::ExposedHeaders;
pub use headers::Headers;
pub use options::{CorsOptions, ValidationError};
pub use origin::{
    BoxFuture, Origin, OriginCallbackFn, OriginDecision, OriginMatcher, OriginResult,
    PatternError,
};
pub use result::{BoxError, CorsDecision, CorsError, PreflightResult, SimpleResult};
