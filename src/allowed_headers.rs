/// Configuration for the `Access-Control-Allow-Headers` preflight header.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum AllowedHeaders {
    /// Echo the preflight's `Access-Control-Request-Headers` verbatim.
    #[default]
    MirrorRequest,
    List(Vec<String>),
}

impl AllowedHeaders {
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(values.into_iter().map(Into::into).collect())
    }

    pub fn mirror_request() -> Self {
        Self::MirrorRequest
    }

    /// An empty list falls back to echoing the request, same as
    /// [`Self::MirrorRequest`].
    pub fn header_value(&self, request_headers: Option<&str>) -> Option<String> {
        match self {
            Self::List(values) if !values.is_empty() => Some(values.join(",")),
            _ => request_headers.map(str::to_owned),
        }
    }
}

#[cfg(test)]
#[path = "allowed_headers_test.rs"]
mod allowed_headers_test;
