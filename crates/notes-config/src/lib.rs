//! Site metadata configuration for the Notes blog.
//!
//! The site owner declares the record in `site.toml`, which is embedded in
//! the library at compile time. [`SiteConfig::load`] parses and validates
//! that declaration; [`SiteConfig::shared`] hands out the process-wide copy.
//!
//! Validation reports every offending field at once (see
//! [`ValidationErrors`]). Fields are addressable by their schema name via
//! [`SiteConfig::get`]:
//!
//! ```
//! use notes_config::SiteConfig;
//!
//! let config = SiteConfig::load().unwrap();
//! let title = config.get("siteTitle").unwrap();
//! assert_eq!(title.as_text(), Some("Ross's Notes"));
//! ```

mod field;
mod validate;

pub use field::{Field, FieldValue};
pub use validate::{Problem, ValidationErrors, ValidationIssue};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "site.toml";

/// The declared site record.
const DECLARATION: &str = include_str!("../site.toml");

/// Process-wide record, loaded on first access.
static SHARED: LazyLock<Result<SiteConfig, ConfigError>> = LazyLock::new(SiteConfig::load);

/// Site metadata consumed by templates and feed generators.
///
/// Missing keys deserialize to empty values so that [`SiteConfig::validate`]
/// can report them together with everything else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory containing the blog posts.
    #[serde(rename = "blogPostDir")]
    pub blog_post_dir: String,
    /// Site title.
    #[serde(rename = "siteTitle")]
    pub site_title: String,
    /// Alternative site title for SEO.
    #[serde(rename = "siteTitleAlt")]
    pub site_title_alt: String,
    /// Logo used for SEO and the web manifest.
    #[serde(rename = "siteLogo")]
    pub site_logo: String,
    /// Absolute URL of the site, without the path prefix.
    #[serde(rename = "siteUrl")]
    pub site_url: String,
    /// Prefix for all generated links. May be empty.
    #[serde(rename = "pathPrefix")]
    pub path_prefix: String,
    /// Whether the footer is always visible.
    #[serde(rename = "fixedFooter")]
    pub fixed_footer: bool,
    /// Site description for feeds and meta tags.
    #[serde(rename = "siteDescription")]
    pub site_description: String,
    /// Path of the RSS feed.
    #[serde(rename = "siteRss")]
    pub site_rss: String,
    /// Facebook application ID. Empty disables app insights.
    #[serde(rename = "siteFBAppID")]
    pub site_fb_app_id: String,
    /// Google Analytics tracking ID. Empty disables tracking.
    #[serde(rename = "siteGATrackingID")]
    pub site_ga_tracking_id: String,
    /// Category assigned to posts that declare none.
    #[serde(rename = "postDefaultCategoryID")]
    pub post_default_category_id: String,
    /// Author name.
    #[serde(rename = "userName")]
    pub user_name: String,
    /// Author Twitter handle, conventionally `@`-prefixed.
    #[serde(rename = "userTwitter")]
    pub user_twitter: String,
    /// Author location.
    #[serde(rename = "userLocation")]
    pub user_location: String,
    /// Author avatar URL.
    #[serde(rename = "userAvatar")]
    pub user_avatar: String,
    /// Author bio.
    #[serde(rename = "userDescription")]
    pub user_description: String,
    /// Profile links in display order.
    #[serde(rename = "userLinks")]
    pub user_links: Vec<LinkEntry>,
    /// Footer and feed copyright line.
    pub copyright: String,
}

/// One social or profile link shown in the author segment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinkEntry {
    /// Human-readable label.
    pub label: String,
    /// Link target, any URI scheme (including `mailto:`).
    pub url: String,
    /// Icon class name, interpreted by the consumer.
    #[serde(rename = "iconClassName")]
    pub icon_class_name: String,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// One or more fields failed validation.
    #[error("Configuration error: {0}")]
    Validation(ValidationErrors),
    /// Field name outside the schema.
    #[error("Unknown configuration field: {0}")]
    UnknownField(String),
}

impl SiteConfig {
    /// Load and validate the declared site record.
    ///
    /// Every call parses the embedded declaration afresh, so repeated calls
    /// yield equal records. Use [`SiteConfig::shared`] to avoid re-parsing.
    pub fn load() -> Result<Self, ConfigError> {
        Self::parse(DECLARATION, "embedded")
    }

    /// Process-wide record, loaded once on first access.
    ///
    /// A failed load is cached too; every caller sees the same error.
    pub fn shared() -> Result<&'static Self, &'static ConfigError> {
        SHARED.as_ref()
    }

    /// Parse and validate a declaration held in memory.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, "inline")
    }

    /// Parse and validate a declaration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if `path` doesn't exist.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Search for `site.toml` in `start` and its parents.
    pub fn discover(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                tracing::info!(path = %candidate.display(), "Found site configuration");
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Validate the record, reporting every violation at once.
    ///
    /// Called automatically by all loaders.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate::validate(self).map_err(ConfigError::Validation)
    }

    /// Facebook application ID, or `None` when app insights are disabled.
    pub fn facebook_app_id(&self) -> Option<&str> {
        non_empty(&self.site_fb_app_id)
    }

    /// Google Analytics tracking ID, or `None` when tracking is disabled.
    pub fn google_analytics_id(&self) -> Option<&str> {
        non_empty(&self.site_ga_tracking_id)
    }

    fn parse(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;

        if let Err(errors) = validate::validate(&config) {
            tracing::warn!(
                source = origin,
                issues = errors.issues().len(),
                "Site configuration rejected"
            );
            return Err(ConfigError::Validation(errors));
        }

        tracing::debug!(
            source = origin,
            links = config.user_links.len(),
            "Site configuration loaded"
        );
        Ok(config)
    }
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}
