use crate::context::RequestContext;
use crate::header_builder::HeaderBuilder;
use crate::headers::HeaderCollection;
use crate::options::{CorsOptions, ValidationError};
use crate::origin::OriginDecision;
use crate::result::{CorsDecision, CorsError, PreflightResult, SimpleResult};
use tracing::debug;

/// Core CORS policy engine that evaluates requests using [`CorsOptions`].
///
/// The options are fixed at construction. Every call to [`Cors::check`]
/// resolves the origin again and builds a fresh header map, so a single
/// instance can be shared across threads and tasks.
#[derive(Clone, Debug)]
pub struct Cors {
    options: CorsOptions,
}

impl Cors {
    pub fn new(options: CorsOptions) -> Result<Self, ValidationError> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &CorsOptions {
        &self.options
    }

    /// Decide which CORS headers apply to `request`.
    ///
    /// Static origins resolve immediately; computed origins are awaited.
    /// A failing origin callback is returned as-is for the caller to map
    /// onto its own error response.
    pub async fn check(&self, request: &RequestContext<'_>) -> Result<CorsDecision, CorsError> {
        let decision = self.options.origin.resolve(request).await?;
        if decision == OriginDecision::Skip {
            debug!(
                method = request.method,
                origin = ?request.origin,
                "cors disabled for request"
            );
            return Ok(CorsDecision::NotApplicable);
        }

        let builder = HeaderBuilder::new(&self.options);
        let mut headers = HeaderCollection::new();
        headers.extend(builder.build_origin_headers(&decision, request));
        headers.extend(builder.build_credentials_header());
        headers.extend(builder.build_exposed_headers());

        if request.is_preflight() {
            Ok(CorsDecision::Preflight(
                self.process_preflight(&builder, request, headers),
            ))
        } else {
            Ok(CorsDecision::Simple(self.process_simple(request, headers)))
        }
    }

    fn process_preflight(
        &self,
        builder: &HeaderBuilder<'_>,
        request: &RequestContext<'_>,
        mut headers: HeaderCollection,
    ) -> PreflightResult {
        headers.extend(builder.build_methods_header());
        headers.extend(builder.build_allowed_headers(request));
        headers.extend(builder.build_max_age_header());

        debug!(
            origin = ?request.origin,
            request_method = ?request.access_control_request_method,
            status = self.options.options_success_status,
            "answering cors preflight"
        );

        PreflightResult {
            headers: headers.into_headers(),
            status: self.options.options_success_status,
        }
    }

    fn process_simple(
        &self,
        request: &RequestContext<'_>,
        headers: HeaderCollection,
    ) -> SimpleResult {
        debug!(
            method = request.method,
            origin = ?request.origin,
            empty = headers.is_empty(),
            "cors headers for simple request"
        );

        SimpleResult {
            headers: headers.into_headers(),
        }
    }
}

#[cfg(test)]
#[path = "cors_test.rs"]
mod cors_test;
