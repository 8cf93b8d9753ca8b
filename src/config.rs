//! Declarative configuration, available with the `serde` feature.
//!
//! ```ignore
//! let config: CorsConfig = serde_json::from_str(r#"{ "origin": true, "maxAge": 1440 }"#)?;
//! let cors = Cors::try_from(config)?;
//! ```
//!
//! A computed origin cannot be expressed declaratively; set it on the
//! options returned by [`CorsConfig::into_options`] instead.

use crate::allowed_headers::AllowedHeaders;
use crate::allowed_methods::AllowedMethods;
use crate::cors::Cors;
use crate::exposed_headers::ExposedHeaders;
use crate::options::{CorsOptions, ValidationError};
use crate::origin::Origin;
use serde::Deserialize;

/// `"*"`, a literal origin, or `true`/`false`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OriginSetting {
    Enabled(bool),
    Value(String),
}

/// One comma-joined string or a list of header names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ExposeSetting {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    pub origin: Option<OriginSetting>,
    pub expose: Option<ExposeSetting>,
    #[serde(alias = "maxAge")]
    pub max_age: Option<u64>,
    pub credentials: bool,
    pub methods: Option<Vec<String>>,
    pub headers: Option<Vec<String>>,
    #[serde(alias = "optionsSuccessStatus")]
    pub options_success_status: Option<u16>,
}

impl From<OriginSetting> for Origin {
    fn from(setting: OriginSetting) -> Self {
        match setting {
            OriginSetting::Enabled(enabled) => Origin::from(enabled),
            OriginSetting::Value(value) => Origin::from(value),
        }
    }
}

impl From<ExposeSetting> for ExposedHeaders {
    fn from(setting: ExposeSetting) -> Self {
        match setting {
            ExposeSetting::One(value) => ExposedHeaders::from(value),
            ExposeSetting::Many(values) => ExposedHeaders::list(values),
        }
    }
}

impl CorsConfig {
    /// Fill unset fields from [`CorsOptions::default`].
    pub fn into_options(self) -> CorsOptions {
        let defaults = CorsOptions::default();

        CorsOptions {
            origin: self.origin.map(Origin::from).unwrap_or(defaults.origin),
            methods: self
                .methods
                .map(AllowedMethods::list)
                .unwrap_or(defaults.methods),
            allowed_headers: self
                .headers
                .map(AllowedHeaders::list)
                .unwrap_or(defaults.allowed_headers),
            exposed_headers: self
                .expose
                .map(ExposedHeaders::from)
                .unwrap_or(defaults.exposed_headers),
            credentials: self.credentials,
            max_age: self.max_age,
            options_success_status: self
                .options_success_status
                .unwrap_or(defaults.options_success_status),
        }
    }
}

impl TryFrom<CorsConfig> for Cors {
    type Error = ValidationError;

    fn try_from(config: CorsConfig) -> Result<Self, Self::Error> {
        Cors::new(config.into_options())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
