use std::future::Future;
use std::pin::Pin;

use cors_gate::constants::header;
use cors_gate::{CorsDecision, CorsError, Headers, RequestContext};
use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::http::StatusCode;
use hyper::http::header::{HeaderMap, HeaderName, HeaderValue};
use hyper::service::Service;
use hyper::{Request, Response};

use super::SharedCors;

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

pub type CorsBody = Full<Bytes>;

/// Wraps an inner service following the hyper 1.x server middleware guide:
/// https://hyper.rs/guides/1/server/middleware/
#[derive(Clone)]
pub struct CorsGate<S> {
    inner: S,
    cors: SharedCors,
}

impl<S> CorsGate<S> {
    pub fn new(cors: SharedCors, inner: S) -> Self {
        Self { inner, cors }
    }
}

impl<S> Service<Request<Incoming>> for CorsGate<S>
where
    S: Service<Request<Incoming>, Response = Response<CorsBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
{
    type Response = Response<CorsBody>;
    type Error = S::Error;
    type Future = BoxFuture<Result<Self::Response, Self::Error>>;

    fn call(&self, req: Request<Incoming>) -> Self::Future {
        let cors = self.cors.clone();
        let inner = self.inner.clone();
        let owned_ctx = OwnedRequestContext::from_request(&req);

        Box::pin(async move {
            let decision = cors.check(&owned_ctx.as_request_context()).await;

            match decision {
                Ok(CorsDecision::Preflight(result)) => {
                    let status =
                        StatusCode::from_u16(result.status).unwrap_or(StatusCode::NO_CONTENT);
                    Ok(preflight_response(status, &result.headers))
                }
                Ok(CorsDecision::Simple(result)) => {
                    let mut response = inner.call(req).await?;
                    apply_headers(response.headers_mut(), &result.headers);
                    Ok(response)
                }
                Ok(CorsDecision::NotApplicable) => inner.call(req).await,
                Err(err) => Ok(internal_error(err)),
            }
        })
    }
}

fn preflight_response(status: StatusCode, headers: &Headers) -> Response<CorsBody> {
    let mut response = Response::new(Full::new(Bytes::new()));
    *response.status_mut() = status;
    apply_headers(response.headers_mut(), headers);
    response
}

fn internal_error(err: CorsError) -> Response<CorsBody> {
    tracing::warn!(error = %err, "cors evaluation failed");
    let mut response = Response::new(Full::new(Bytes::from(format!("CORS error: {err}"))));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response
}

fn apply_headers(map: &mut HeaderMap, headers: &Headers) {
    for (name, value) in headers {
        if let (Ok(header_name), Ok(header_value)) = (
            HeaderName::try_from(name.as_str()),
            HeaderValue::from_str(value),
        ) {
            map.insert(header_name, header_value);
        }
    }
}

struct OwnedRequestContext {
    method: String,
    origin: Option<String>,
    access_control_request_method: Option<String>,
    access_control_request_headers: Option<String>,
}

impl OwnedRequestContext {
    fn from_request(request: &Request<Incoming>) -> Self {
        let headers = request.headers();

        Self {
            method: request.method().as_str().to_string(),
            origin: header_value(headers, header::ORIGIN),
            access_control_request_method: header_value(
                headers,
                header::ACCESS_CONTROL_REQUEST_METHOD,
            ),
            access_control_request_headers: header_value(
                headers,
                header::ACCESS_CONTROL_REQUEST_HEADERS,
            ),
        }
    }

    fn as_request_context(&self) -> RequestContext<'_> {
        RequestContext {
            method: &self.method,
            origin: self.origin.as_deref(),
            access_control_request_method: self.access_control_request_method.as_deref(),
            access_control_request_headers: self.access_control_request_headers.as_deref(),
        }
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
}
