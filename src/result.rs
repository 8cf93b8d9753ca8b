use crate::headers::Headers;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Headers and status for a preflight that must be answered immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreflightResult {
    pub headers: Headers,
    pub status: u16,
}

/// Headers to attach to the downstream response of a simple request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleResult {
    pub headers: Headers,
}

/// Overall decision returned by the policy engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsDecision {
    /// Terminate the request with `status`; never run application logic.
    Preflight(PreflightResult),
    /// Continue to the next handler and attach the headers to its response.
    Simple(SimpleResult),
    /// Origin resolution disabled CORS. Continue untouched.
    NotApplicable,
}

impl CorsDecision {
    pub fn headers(&self) -> Option<&Headers> {
        match self {
            CorsDecision::Preflight(result) => Some(&result.headers),
            CorsDecision::Simple(result) => Some(&result.headers),
            CorsDecision::NotApplicable => None,
        }
    }

    pub fn into_headers(self) -> Headers {
        match self {
            CorsDecision::Preflight(result) => result.headers,
            CorsDecision::Simple(result) => result.headers,
            CorsDecision::NotApplicable => Headers::new(),
        }
    }

    pub fn is_short_circuit(&self) -> bool {
        matches!(self, CorsDecision::Preflight(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            CorsDecision::Preflight(result) => Some(result.status),
            _ => None,
        }
    }
}

/// Errors that can be produced during CORS evaluation.
#[derive(Debug, Error)]
pub enum CorsError {
    #[error("origin callback failed: {0}")]
    OriginCallback(#[source] BoxError),
}

#[cfg(test)]
#[path = "result_test.rs"]
mod result_test;
