use std::convert::Infallible;
use std::future::{self, Ready};

use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::http::header::{CONTENT_TYPE, HeaderValue};
use hyper::http::{Method, StatusCode};
use hyper::service::Service;
use hyper::{Request, Response};

use crate::cors::SharedAppState;
use crate::cors::middleware::CorsBody;

const HTML: &str = "text/html; charset=utf-8";
const PLAIN: &str = "text/plain; charset=utf-8";

#[derive(Clone)]
pub struct Router {
    state: SharedAppState,
}

pub fn router(state: SharedAppState) -> Router {
    Router { state }
}

impl Service<Request<Incoming>> for Router {
    type Response = Response<CorsBody>;
    type Error = Infallible;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn call(&self, req: Request<Incoming>) -> Self::Future {
        let response = match (req.method(), req.uri().path()) {
            (&Method::GET, "/greet") => respond(
                StatusCode::OK,
                HTML,
                format!(
                    "<h1>{}</h1><p>Only origins on the allow-list receive CORS headers.</p>",
                    self.state.greeting
                ),
            ),
            (&Method::GET, "/health") => respond(StatusCode::OK, PLAIN, "ok".to_string()),
            _ => respond(StatusCode::NOT_FOUND, PLAIN, "Not Found".to_string()),
        };

        future::ready(Ok(response))
    }
}

fn respond(status: StatusCode, content_type: &'static str, body: String) -> Response<CorsBody> {
    let mut response = Response::new(Full::new(Bytes::from(body)));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}
