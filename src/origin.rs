use crate::constants::WILDCARD;
use crate::context::RequestContext;
use crate::result::{BoxError, CorsError};
use regex_automata::meta::{BuildError, Regex};
use std::fmt;
use std::future::{self, Future};
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Outcome of a computed origin callback.
pub type OriginResult = Result<OriginDecision, BoxError>;

pub type OriginCallbackFn =
    dyn for<'a> Fn(&'a RequestContext<'a>) -> BoxFuture<'a, OriginResult> + Send + Sync;

/// How `Access-Control-Allow-Origin` is resolved for each request.
#[derive(Clone, Default)]
pub enum Origin {
    /// Always emit `*`.
    #[default]
    Any,
    /// Echo the request's `Origin` header verbatim.
    Mirror,
    /// Emit nothing; CORS is off for every request.
    Disabled,
    /// Always emit this literal, whatever the request sent.
    Exact(String),
    /// Ask a callback on every request.
    Computed(Arc<OriginCallbackFn>),
}

/// Per-request result of origin resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginDecision {
    Any,
    Mirror,
    Exact(String),
    /// Disable CORS for this request.
    Skip,
}

impl OriginDecision {
    pub fn any() -> Self {
        Self::Any
    }

    pub fn mirror() -> Self {
        Self::Mirror
    }

    pub fn exact<S: Into<String>>(value: S) -> Self {
        Self::Exact(value.into())
    }

    pub fn skip() -> Self {
        Self::Skip
    }
}

impl From<bool> for OriginDecision {
    fn from(value: bool) -> Self {
        if value {
            OriginDecision::Mirror
        } else {
            OriginDecision::Skip
        }
    }
}

impl From<String> for OriginDecision {
    fn from(value: String) -> Self {
        OriginDecision::Exact(value)
    }
}

impl From<&str> for OriginDecision {
    fn from(value: &str) -> Self {
        OriginDecision::Exact(value.to_owned())
    }
}

impl<T> From<Option<T>> for OriginDecision
where
    T: Into<String>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => OriginDecision::Exact(inner.into()),
            None => OriginDecision::Skip,
        }
    }
}

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("failed to compile origin pattern")]
    Build(#[source] Box<BuildError>),
    #[error("compiling origin pattern took {elapsed:?}, over the {budget:?} budget")]
    Timeout { elapsed: Duration, budget: Duration },
    #[error("origin pattern length {length} exceeds maximum allowed {max}")]
    TooLong { length: usize, max: usize },
}

const PATTERN_COMPILE_BUDGET: Duration = Duration::from_millis(100);
const MAX_PATTERN_LENGTH: usize = 50_000;
const MAX_ORIGIN_LENGTH: usize = 4_096;

/// Single entry of an origin allow-list built with [`Origin::list`].
#[derive(Debug, Clone)]
pub enum OriginMatcher {
    Exact(String),
    Pattern(Regex),
}

impl OriginMatcher {
    pub fn exact<S: Into<String>>(value: S) -> Self {
        Self::Exact(value.into())
    }

    pub fn pattern(regex: Regex) -> Self {
        Self::Pattern(regex)
    }

    /// Compiles `pattern` case-insensitively.
    pub fn pattern_str(pattern: &str) -> Result<Self, PatternError> {
        Self::compile_pattern(pattern, PATTERN_COMPILE_BUDGET).map(Self::Pattern)
    }

    fn compile_pattern(pattern: &str, budget: Duration) -> Result<Regex, PatternError> {
        if pattern.len() > MAX_PATTERN_LENGTH {
            return Err(PatternError::TooLong {
                length: pattern.len(),
                max: MAX_PATTERN_LENGTH,
            });
        }

        let started = Instant::now();
        let regex = Regex::new(&format!("(?i:{pattern})"))
            .map_err(|err| PatternError::Build(Box::new(err)))?;
        let elapsed = started.elapsed();
        if elapsed > budget {
            return Err(PatternError::Timeout { elapsed, budget });
        }

        Ok(regex)
    }

    #[cfg(test)]
    pub(crate) fn pattern_str_with_budget(
        pattern: &str,
        budget: Duration,
    ) -> Result<Self, PatternError> {
        Self::compile_pattern(pattern, budget).map(Self::Pattern)
    }

    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            OriginMatcher::Exact(value) => value.eq_ignore_ascii_case(candidate),
            OriginMatcher::Pattern(regex) => regex.is_match(candidate.as_bytes()),
        }
    }
}

impl From<String> for OriginMatcher {
    fn from(value: String) -> Self {
        OriginMatcher::Exact(value)
    }
}

impl From<&str> for OriginMatcher {
    fn from(value: &str) -> Self {
        OriginMatcher::Exact(value.to_owned())
    }
}

impl Origin {
    pub fn any() -> Self {
        Self::Any
    }

    pub fn mirror() -> Self {
        Self::Mirror
    }

    pub fn disabled() -> Self {
        Self::Disabled
    }

    pub fn exact<S: Into<String>>(value: S) -> Self {
        Self::Exact(value.into())
    }

    /// Synchronous callback. The returned value converts into an
    /// [`OriginDecision`]: `true` echoes the request origin, `false` or `None`
    /// disables CORS, a string is used as the literal header value.
    pub fn computed<F, D>(callback: F) -> Self
    where
        F: for<'a> Fn(&RequestContext<'a>) -> D + Send + Sync + 'static,
        D: Into<OriginDecision>,
    {
        Self::computed_async(move |ctx| {
            let decision: OriginDecision = callback(ctx).into();
            Box::pin(future::ready(Ok::<_, BoxError>(decision)))
        })
    }

    /// Callback that may suspend. Errors are surfaced from
    /// [`Cors::check`](crate::Cors::check) as [`CorsError::OriginCallback`].
    pub fn computed_async<F>(callback: F) -> Self
    where
        F: for<'a> Fn(&'a RequestContext<'a>) -> BoxFuture<'a, OriginResult>
            + Send
            + Sync
            + 'static,
    {
        Self::Computed(Arc::new(callback))
    }

    /// Echo the request origin when it matches any entry, otherwise disable
    /// CORS for the request.
    pub fn list<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OriginMatcher>,
    {
        let matchers: Arc<[OriginMatcher]> = values.into_iter().map(Into::into).collect();
        Self::computed(move |ctx| {
            ctx.origin.is_some_and(|origin| {
                origin.len() <= MAX_ORIGIN_LENGTH
                    && matchers.iter().any(|matcher| matcher.matches(origin))
            })
        })
    }

    pub async fn resolve(&self, ctx: &RequestContext<'_>) -> Result<OriginDecision, CorsError> {
        let decision = match self {
            Origin::Any => OriginDecision::Any,
            Origin::Mirror => OriginDecision::Mirror,
            Origin::Disabled => OriginDecision::Skip,
            Origin::Exact(value) => OriginDecision::Exact(value.clone()),
            Origin::Computed(callback) => callback(ctx).await.map_err(|err| {
                tracing::debug!(error = %err, origin = ?ctx.origin, "origin callback failed");
                CorsError::OriginCallback(err)
            })?,
        };

        tracing::trace!(?decision, origin = ?ctx.origin, "resolved origin");
        Ok(decision)
    }
}

impl fmt::Debug for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Any => f.write_str("Any"),
            Origin::Mirror => f.write_str("Mirror"),
            Origin::Disabled => f.write_str("Disabled"),
            Origin::Exact(value) => f.debug_tuple("Exact").field(value).finish(),
            Origin::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<bool> for Origin {
    fn from(value: bool) -> Self {
        if value { Origin::Mirror } else { Origin::Disabled }
    }
}

impl From<&str> for Origin {
    fn from(value: &str) -> Self {
        if value == WILDCARD {
            Origin::Any
        } else {
            Origin::Exact(value.to_owned())
        }
    }
}

impl From<String> for Origin {
    fn from(value: String) -> Self {
        if value == WILDCARD {
            Origin::Any
        } else {
            Origin::Exact(value)
        }
    }
}

#[cfg(test)]
#[path = "origin_test.rs"]
mod origin_test;
