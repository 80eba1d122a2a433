//! # Settings Module
//!
//! Describes a CORS configuration in a YAML or JSON file so it can be changed
//! without recompiling.
//!
//! ```yaml
//! mode: custom                       # default | custom | disabled
//! allowOrigin: "https://example.com"
//! allowMethods: { value: "GET,POST", append: false }
//! allowHeaders: ["Origin", "Accept"]
//! exposeHeaders: "X-Total-Count"
//! allowCredentials: true
//! maxAge: { value: 12, unit: hours }
//! infoHeader: { name: X-My-Header, value: My_Info, append: true }
//! ```
//!
//! List fields accept a plain string, a list of strings, or a
//! `{ value, append }` map. `maxAge` accepts plain seconds or
//! `{ value, unit }`. When `mode` is omitted, a file with any field set is a
//! custom configuration and an empty file is the default one.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use serde::Deserialize;

use crate::middleware::cors::{CorsBuilder, CorsConfig, CorsMode, CorsSlot, TimeUnit};

/// A single string or a list of strings, joined with `,`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    One(String),
    Many(Vec<String>),
}

impl StringOrList {
    pub fn joined(&self) -> String {
        match self {
            StringOrList::One(s) => s.clone(),
            StringOrList::Many(items) => items.join(","),
        }
    }
}

/// Value of a list header, with or without an explicit append flag
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ListSetting {
    Plain(StringOrList),
    Detailed(DetailedList),
}

/// `{ value, append }` form of a list header
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetailedList {
    pub value: StringOrList,
    #[serde(default)]
    pub append: bool,
}

impl ListSetting {
    fn parts(&self) -> (String, bool) {
        match self {
            ListSetting::Plain(value) => (value.joined(), false),
            ListSetting::Detailed(detailed) => (detailed.value.joined(), detailed.append),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MaxAgeSetting {
    Seconds(u64),
    WithUnit { value: u64, unit: TimeUnit },
}

impl MaxAgeSetting {
    pub fn seconds(self) -> u64 {
        match self {
            MaxAgeSetting::Seconds(secs) => secs,
            MaxAgeSetting::WithUnit { value, unit } => unit.to_seconds(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InfoHeaderSetting {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub append: bool,
}

/// CORS configuration as written in a settings file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CorsSettings {
    pub mode: Option<CorsMode>,
    pub allow_origin: Option<String>,
    pub allow_methods: Option<ListSetting>,
    pub allow_headers: Option<ListSetting>,
    pub expose_headers: Option<ListSetting>,
    pub allow_credentials: Option<bool>,
    pub max_age: Option<MaxAgeSetting>,
    pub info_header: Option<InfoHeaderSetting>,
}

impl CorsSettings {
    /// Parse settings from YAML (JSON is valid YAML too)
    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).context("invalid CORS settings")
    }

    fn has_fields(&self) -> bool {
        self.allow_origin.is_some()
            || self.allow_methods.is_some()
            || self.allow_headers.is_some()
            || self.expose_headers.is_some()
            || self.allow_credentials.is_some()
            || self.max_age.is_some()
            || self.info_header.is_some()
    }

    /// Turn the settings into a builder, ready for `build()`
    pub fn into_builder(self) -> CorsBuilder {
        let mode = match self.mode {
            Some(mode) => mode,
            None if self.has_fields() => CorsMode::Custom,
            None => CorsMode::Default,
        };
        let mut builder = match mode {
            CorsMode::Default => CorsBuilder::default_cors(),
            CorsMode::Custom => CorsBuilder::builder(),
            CorsMode::Disabled => CorsBuilder::disabled(),
        };

        if let Some(origin) = self.allow_origin {
            builder = builder.set_allow_origin(origin);
        }
        if let Some(methods) = &self.allow_methods {
            builder = match methods.parts() {
                (v, true) => builder.append_allow_methods(&v),
                (v, false) => builder.set_allow_methods(&v),
            };
        }
        if let Some(headers) = &self.allow_headers {
            builder = match headers.parts() {
                (v, true) => builder.append_allow_headers(&v),
                (v, false) => builder.set_allow_headers(&v),
            };
        }
        if let Some(expose) = &self.expose_headers {
            builder = match expose.parts() {
                (v, true) => builder.append_expose_headers(&v),
                (v, false) => builder.set_expose_headers(&v),
            };
        }
        if let Some(allow) = self.allow_credentials {
            builder = builder.set_allow_credentials(allow);
        }
        if let Some(max_age) = self.max_age {
            builder = builder.set_max_age(max_age.seconds(), TimeUnit::Seconds);
        }
        if let Some(info) = self.info_header {
            builder = if info.append {
                builder.append_info_header(info.name, info.value)
            } else {
                builder.set_info_header(info.name, info.value)
            };
        }
        builder
    }
}

/// Load settings from a `.yaml`, `.yml` or `.json` file
pub fn load_settings(path: impl AsRef<Path>) -> anyhow::Result<CorsSettings> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read CORS settings from {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    let settings = if is_json {
        serde_json::from_str::<CorsSettings>(&content).context("invalid CORS settings")?
    } else {
        CorsSettings::from_yaml_str(&content)?
    };
    Ok(settings)
}

/// Load a settings file, build it and install it into the process-wide slot
pub fn install_from_file(path: impl AsRef<Path>) -> anyhow::Result<Arc<CorsConfig>> {
    install_from_file_into(path, &CorsSlot::global())
}

/// Load a settings file, build it and install it into `slot`
pub fn install_from_file_into(
    path: impl AsRef<Path>,
    slot: &CorsSlot,
) -> anyhow::Result<Arc<CorsConfig>> {
    let path = path.as_ref();
    let config = load_settings(path)?
        .into_builder()
        .build_into(slot)
        .with_context(|| format!("rejected CORS settings in {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_settings_are_default() {
        let config = CorsSettings::from_yaml_str("").unwrap().into_builder().finish().unwrap();
        assert_eq!(config, CorsConfig::default_set());
    }

    #[test]
    fn test_fields_without_mode_are_custom() {
        let settings = CorsSettings::from_yaml_str("allowOrigin: https://example.com").unwrap();
        let config = settings.into_builder().finish().unwrap();
        assert_eq!(config.mode(), CorsMode::Custom);
        assert_eq!(config.allow_origin(), Some("https://example.com"));
        assert_eq!(config.allow_methods().value(), None);
    }

    #[test]
    fn test_list_setting_forms() {
        let settings = CorsSettings::from_yaml_str(
            r#"
allowMethods: "GET,POST"
allowHeaders: [Origin, Accept]
exposeHeaders: { value: [X-A, X-B], append: true }
"#,
        )
        .unwrap();
        let config = settings.into_builder().finish().unwrap();
        assert_eq!(config.allow_methods().value(), Some("GET,POST"));
        assert!(!config.allow_methods().append());
        assert_eq!(config.allow_headers().value(), Some("Origin,Accept"));
        assert_eq!(config.expose_headers().value(), Some("X-A,X-B"));
        assert!(config.expose_headers().append());
    }

    #[test]
    fn test_max_age_forms() {
        let plain = CorsSettings::from_yaml_str("maxAge: 600").unwrap();
        assert_eq!(plain.max_age.unwrap().seconds(), 600);

        let with_unit = CorsSettings::from_yaml_str("maxAge: { value: 1440, unit: minutes }").unwrap();
        assert_eq!(with_unit.max_age.unwrap().seconds(), 86_400);
    }

    #[test]
    fn test_disabled_mode() {
        let settings = CorsSettings::from_yaml_str("mode: disabled\nallowOrigin: '*'").unwrap();
        assert!(settings.into_builder().finish().unwrap().is_disabled());
    }

    #[test]
    fn test_default_mode_with_override() {
        let settings = CorsSettings::from_yaml_str("mode: default\nallowCredentials: false").unwrap();
        let config = settings.into_builder().finish().unwrap();
        assert_eq!(config.mode(), CorsMode::Custom);
        assert_eq!(config.allow_credentials(), Some(false));
        assert_eq!(config.allow_origin(), Some("*"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(CorsSettings::from_yaml_str("allowOrigins: ['*']").is_err());
    }

    #[test]
    fn test_misspelled_nested_keys_rejected() {
        assert!(CorsSettings::from_yaml_str("allowMethods: { value: GET, apend: true }").is_err());
        assert!(
            CorsSettings::from_yaml_str("infoHeader: { name: X-Info, value: v, appnd: true }")
                .is_err()
        );
    }

    #[test]
    fn test_info_header_setting() {
        let settings =
            CorsSettings::from_yaml_str("infoHeader: { name: X-Info, value: hello, append: true }")
                .unwrap();
        let config = settings.into_builder().finish().unwrap();
        let info = config.info_header().unwrap();
        assert_eq!(info.name(), "X-Info");
        assert_eq!(info.value(), "hello");
        assert!(info.append());
    }
}
