use crate::allowed_headers::AllowedHeaders;
use crate::allowed_methods::AllowedMethods;
use crate::exposed_headers::ExposedHeaders;
use crate::origin::Origin;
use thiserror::Error;

/// Static CORS configuration, read-only once handed to [`Cors`](crate::Cors).
#[derive(Clone, Debug)]
pub struct CorsOptions {
    pub origin: Origin,
    pub methods: AllowedMethods,
    pub allowed_headers: AllowedHeaders,
    pub exposed_headers: ExposedHeaders,
    pub credentials: bool,
    /// Seconds, emitted as `Access-Control-Max-Age` on preflights.
    pub max_age: Option<u64>,
    pub options_success_status: u16,
}

impl Default for CorsOptions {
    fn default() -> Self {
        Self {
            origin: Origin::Any,
            methods: AllowedMethods::default(),
            allowed_headers: AllowedHeaders::default(),
            exposed_headers: ExposedHeaders::default(),
            credentials: false,
            max_age: None,
            options_success_status: 204,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} contains {value:?}, which is not a valid header value")]
    InvalidHeaderValue { field: &'static str, value: String },
    #[error("options_success_status must be a 2xx status code, got {0}")]
    InvalidSuccessStatus(u16),
}

impl CorsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin(mut self, origin: impl Into<Origin>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn methods(mut self, methods: AllowedMethods) -> Self {
        self.methods = methods;
        self
    }

    pub fn allowed_headers(mut self, headers: AllowedHeaders) -> Self {
        self.allowed_headers = headers;
        self
    }

    pub fn exposed_headers(mut self, headers: impl Into<ExposedHeaders>) -> Self {
        self.exposed_headers = headers.into();
        self
    }

    pub fn credentials(mut self, enabled: bool) -> Self {
        self.credentials = enabled;
        self
    }

    pub fn max_age(mut self, seconds: u64) -> Self {
        self.max_age = Some(seconds);
        self
    }

    pub fn options_success_status(mut self, status: u16) -> Self {
        self.options_success_status = status;
        self
    }

    /// Rejects configured values that cannot be written as response headers.
    /// Values are otherwise accepted as given.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Origin::Exact(value) = &self.origin {
            ensure_header_value("origin", value)?;
        }

        for value in self.methods.values() {
            ensure_header_value("methods", value)?;
        }

        if let AllowedHeaders::List(values) = &self.allowed_headers {
            for value in values {
                ensure_header_value("allowed_headers", value)?;
            }
        }

        for value in self.exposed_headers.values() {
            ensure_header_value("exposed_headers", value)?;
        }

        if !(200..=299).contains(&self.options_success_status) {
            return Err(ValidationError::InvalidSuccessStatus(
                self.options_success_status,
            ));
        }

        Ok(())
    }
}

// Same byte rules as `http::HeaderValue::from_str`.
fn ensure_header_value(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let valid = value
        .bytes()
        .all(|byte| byte == b'\t' || (byte >= 0x20 && byte != 0x7f));

    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidHeaderValue {
            field,
            value: value.to_owned(),
        })
    }
}

#[cfg(test)]
#[path = "options_test.rs"]
mod options_test;
