use crate::constants::method;

/// Borrowed view of the request attributes the engine reads.
///
/// Header values are `None` when the header is absent. Values are passed
/// through verbatim; nothing is trimmed or case-folded before echoing.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestContext<'a> {
    pub method: &'a str,
    pub origin: Option<&'a str>,
    pub access_control_request_method: Option<&'a str>,
    pub access_control_request_headers: Option<&'a str>,
}

impl<'a> RequestContext<'a> {
    pub fn new(method: &'a str) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn with_origin(mut self, origin: &'a str) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_request_method(mut self, value: &'a str) -> Self {
        self.access_control_request_method = Some(value);
        self
    }

    pub fn with_request_headers(mut self, value: &'a str) -> Self {
        self.access_control_request_headers = Some(value);
        self
    }

    /// A preflight is an `OPTIONS` request that also announces the intended
    /// method. A bare `OPTIONS` call is handled as a simple request.
    pub fn is_preflight(&self) -> bool {
        self.method.eq_ignore_ascii_case(method::OPTIONS)
            && self
                .access_control_request_method
                .is_some_and(|value| !value.trim().is_empty())
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;
