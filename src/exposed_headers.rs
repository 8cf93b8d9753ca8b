/// Configuration mirror of the `Access-Control-Expose-Headers` response header.
///
/// Accepts either one string that may already contain commas
/// (`"Accept,Authorization"`) or a sequence joined with `,`. Both spellings
/// produce the same header value.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ExposedHeaders(Vec<String>);

impl ExposedHeaders {
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(values.into_iter().map(Into::into).collect())
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serializes the configuration into a header-ready value.
    pub fn header_value(&self) -> Option<String> {
        let value = self.0.join(",");
        if value.is_empty() { None } else { Some(value) }
    }
}

impl From<&str> for ExposedHeaders {
    fn from(value: &str) -> Self {
        Self(vec![value.to_owned()])
    }
}

impl From<String> for ExposedHeaders {
    fn from(value: String) -> Self {
        Self(vec![value])
    }
}

impl<S: Into<String>> From<Vec<S>> for ExposedHeaders {
    fn from(values: Vec<S>) -> Self {
        Self::list(values)
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for ExposedHeaders {
    fn from(values: [S; N]) -> Self {
        Self::list(values)
    }
}

#[cfg(test)]
#[path = "exposed_headers_test.rs"]
mod exposed_headers_test;
