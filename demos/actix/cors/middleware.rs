use std::future::{Ready, ready};
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::{
    StatusCode,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use actix_web::{Error, HttpRequest, HttpResponse};
use cors_gate::{CorsDecision, Headers, RequestContext, constants::header};

use super::SharedCors;

type LocalBoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + 'a>>;

pub struct CorsGate {
    cors: SharedCors,
}

impl CorsGate {
    pub fn new(cors: SharedCors) -> Self {
        Self { cors }
    }
}

impl<S, B> Transform<S, ServiceRequest> for CorsGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = CorsGateMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CorsGateMiddleware {
            service: Rc::new(service),
            cors: self.cors.clone(),
        }))
    }
}

pub struct CorsGateMiddleware<S> {
    service: Rc<S>,
    cors: SharedCors,
}

impl<S, B> Service<ServiceRequest> for CorsGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let cors = self.cors.clone();
        let service = Rc::clone(&self.service);
        let owned_ctx = OwnedRequestContext::from_request(req.request());

        Box::pin(async move {
            let decision = cors.check(&owned_ctx.as_request_context()).await;

            match decision {
                Ok(CorsDecision::Preflight(result)) => {
                    let status =
                        StatusCode::from_u16(result.status).unwrap_or(StatusCode::NO_CONTENT);
                    let mut response = HttpResponse::build(status).finish();
                    apply_headers(response.headers_mut(), &result.headers);
                    Ok(req.into_response(response.map_into_right_body()))
                }
                Ok(CorsDecision::Simple(result)) => {
                    let mut res = service.call(req).await?.map_into_left_body();
                    apply_headers(res.headers_mut(), &result.headers);
                    Ok(res)
                }
                Ok(CorsDecision::NotApplicable) => Ok(service.call(req).await?.map_into_left_body()),
                Err(err) => {
                    tracing::warn!(error = %err, "cors evaluation failed");
                    let response = HttpResponse::InternalServerError()
                        .body(format!("CORS error: {err}"))
                        .map_into_right_body();
                    Ok(req.into_response(response))
                }
            }
        })
    }
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
    fn from_request(request: &HttpRequest) -> Self {
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
