//! Validation of [`SiteConfig`] records.
//!
//! All rules run on every call; the resulting [`ValidationErrors`] lists
//! each violation in schema order rather than stopping at the first one.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::{Field, SiteConfig};

/// Fields that must be non-empty.
pub(crate) const REQUIRED: [Field; 11] = [
    Field::BlogPostDir,
    Field::SiteTitle,
    Field::SiteTitleAlt,
    Field::SiteLogo,
    Field::SiteUrl,
    Field::SiteDescription,
    Field::SiteRss,
    Field::PostDefaultCategoryId,
    Field::UserName,
    Field::UserAvatar,
    Field::Copyright,
];

/// RFC 3986 scheme, a colon and a non-empty remainder without whitespace.
static URI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:\S+$").unwrap());

/// What is wrong with a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Problem {
    /// Required value is empty or absent.
    Empty,
    /// Value is not an absolute `http://` or `https://` URL.
    NotHttpUrl,
    /// Path does not begin with `/`.
    MissingLeadingSlash,
    /// Value is not a syntactically valid URI.
    InvalidUri,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Empty => "cannot be empty",
            Self::NotHttpUrl => "must start with http:// or https://",
            Self::MissingLeadingSlash => "must start with /",
            Self::InvalidUri => "must be a valid URI",
        })
    }
}

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Field path, e.g. `siteTitle` or `userLinks[1].url`.
    pub field: String,
    pub problem: Problem,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.problem)
    }
}

/// Every validation failure found in one record.
///
/// Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    issues: Vec<ValidationIssue>,
}

impl ValidationErrors {
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Names of the offending fields, in schema order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.issues.iter().map(|issue| issue.field.as_str())
    }

    /// Whether `field` has at least one issue.
    pub fn contains(&self, field: &str) -> bool {
        self.fields().any(|f| f == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

/// Collects issues while the rules run.
#[derive(Default)]
struct Report {
    issues: Vec<ValidationIssue>,
}

impl Report {
    fn push(&mut self, field: impl Into<String>, problem: Problem) {
        self.issues.push(ValidationIssue {
            field: field.into(),
            problem,
        });
    }

    /// Record an issue if `value` is empty. Returns whether it was non-empty.
    fn require_non_empty(&mut self, value: &str, field: impl Into<String>) -> bool {
        if value.is_empty() {
            self.push(field, Problem::Empty);
            return false;
        }
        true
    }

    fn finish(self) -> Result<(), ValidationErrors> {
        if self.issues.is_empty() {
            return Ok(());
        }
        Err(ValidationErrors {
            issues: self.issues,
        })
    }
}

fn is_http_url(url: &str) -> bool {
    url.strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .is_some_and(|rest| !rest.is_empty())
}

pub(crate) fn validate(config: &SiteConfig) -> Result<(), ValidationErrors> {
    let mut report = Report::default();

    for field in Field::ALL {
        let value = config.field(field).as_text().unwrap_or_default();

        if REQUIRED.contains(&field) && !report.require_non_empty(value, field.name()) {
            continue;
        }

        match field {
            Field::SiteUrl if !is_http_url(value) => {
                report.push(field.name(), Problem::NotHttpUrl);
            }
            Field::SiteRss | Field::PathPrefix if !value.is_empty() && !value.starts_with('/') => {
                report.push(field.name(), Problem::MissingLeadingSlash);
            }
            Field::UserLinks => {
                for (i, link) in config.user_links.iter().enumerate() {
                    report.require_non_empty(&link.label, format!("userLinks[{i}].label"));
                    let url_field = format!("userLinks[{i}].url");
                    if report.require_non_empty(&link.url, url_field.clone())
                        && !URI_RE.is_match(&link.url)
                    {
                        report.push(url_field, Problem::InvalidUri);
                    }
                }
            }
            _ => {}
        }
    }

    report.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConfigError, LinkEntry};
    use pretty_assertions::assert_eq;

    fn valid_config() -> SiteConfig {
        SiteConfig::load().unwrap()
    }

    /// Mutable access to a string-valued field.
    fn text_mut(config: &mut SiteConfig, field: Field) -> &mut String {
        match field {
            Field::BlogPostDir => &mut config.blog_post_dir,
            Field::SiteTitle => &mut config.site_title,
            Field::SiteTitleAlt => &mut config.site_title_alt,
            Field::SiteLogo => &mut config.site_logo,
            Field::SiteUrl => &mut config.site_url,
            Field::PathPrefix => &mut config.path_prefix,
            Field::SiteDescription => &mut config.site_description,
            Field::SiteRss => &mut config.site_rss,
            Field::SiteFbAppId => &mut config.site_fb_app_id,
            Field::SiteGaTrackingId => &mut config.site_ga_tracking_id,
            Field::PostDefaultCategoryId => &mut config.post_default_category_id,
            Field::UserName => &mut config.user_name,
            Field::UserTwitter => &mut config.user_twitter,
            Field::UserLocation => &mut config.user_location,
            Field::UserAvatar => &mut config.user_avatar,
            Field::UserDescription => &mut config.user_description,
            Field::Copyright => &mut config.copyright,
            Field::FixedFooter | Field::UserLinks => panic!("{field} is not a string field"),
        }
    }

    /// Assert that validation fails with exactly the expected issues.
    fn assert_issues(config: &SiteConfig, expected: &[(&str, Problem)]) {
        let errors = match config.validate() {
            Err(ConfigError::Validation(errors)) => errors,
            other => panic!("Expected ConfigError::Validation, got {other:?}"),
        };
        let actual: Vec<(&str, Problem)> = errors
            .issues()
            .iter()
            .map(|issue| (issue.field.as_str(), issue.problem))
            .collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_validate_declared_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validate_each_required_field_empty() {
        for field in REQUIRED {
            let mut config = valid_config();
            text_mut(&mut config, field).clear();
            assert_issues(&config, &[(field.name(), Problem::Empty)]);
        }
    }

    #[test]
    fn test_validate_optional_fields_may_be_empty() {
        let mut config = valid_config();
        for field in [
            Field::PathPrefix,
            Field::SiteFbAppId,
            Field::SiteGaTrackingId,
            Field::UserTwitter,
            Field::UserLocation,
            Field::UserDescription,
        ] {
            text_mut(&mut config, field).clear();
        }
        config.user_links.clear();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_reports_all_empty_fields() {
        let mut config = valid_config();
        config.site_title.clear();
        config.user_avatar.clear();
        config.copyright.clear();
        assert_issues(
            &config,
            &[
                ("siteTitle", Problem::Empty),
                ("userAvatar", Problem::Empty),
                ("copyright", Problem::Empty),
            ],
        );
    }

    #[test]
    fn test_validate_error_message_lists_fields() {
        let mut config = valid_config();
        config.site_title.clear();
        config.user_name.clear();
        let msg = config.validate().unwrap_err().to_string();
        assert!(msg.contains("siteTitle cannot be empty"), "got: {msg}");
        assert!(msg.contains("userName cannot be empty"), "got: {msg}");
    }

    #[test]
    fn test_validate_site_url_scheme() {
        let mut config = valid_config();
        config.site_url = "ftp://example.com/".to_owned();
        assert_issues(&config, &[("siteUrl", Problem::NotHttpUrl)]);

        config.site_url = "https://".to_owned();
        assert_issues(&config, &[("siteUrl", Problem::NotHttpUrl)]);

        config.site_url = "http://localhost:8000".to_owned();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_site_rss_leading_slash() {
        let mut config = valid_config();
        config.site_rss = "rss.xml".to_owned();
        assert_issues(&config, &[("siteRss", Problem::MissingLeadingSlash)]);
    }

    #[test]
    fn test_validate_path_prefix_leading_slash() {
        let mut config = valid_config();
        config.path_prefix = "blog".to_owned();
        assert_issues(&config, &[("pathPrefix", Problem::MissingLeadingSlash)]);
    }

    #[test]
    fn test_validate_link_entries() {
        let mut config = valid_config();
        config.user_links.push(LinkEntry {
            label: String::new(),
            url: "not a uri".to_owned(),
            icon_class_name: String::new(),
        });
        assert_issues(
            &config,
            &[
                ("userLinks[3].label", Problem::Empty),
                ("userLinks[3].url", Problem::InvalidUri),
            ],
        );
    }

    #[test]
    fn test_validate_link_empty_url() {
        let mut config = valid_config();
        config.user_links[0].url.clear();
        assert_issues(&config, &[("userLinks[0].url", Problem::Empty)]);
    }

    #[test]
    fn test_uri_pattern() {
        assert!(URI_RE.is_match("mailto:rosstod@gmail.com"));
        assert!(URI_RE.is_match("https://github.com/rsstdd/notes"));
        assert!(URI_RE.is_match("tel:+15555550100"));
        assert!(!URI_RE.is_match("github.com/rsstdd"));
        assert!(!URI_RE.is_match("1http://example.com"));
        assert!(!URI_RE.is_match("mailto:"));
    }

    #[test]
    fn test_errors_contains() {
        let mut config = valid_config();
        config.blog_post_dir.clear();
        let ConfigError::Validation(errors) = config.validate().unwrap_err() else {
            panic!("Expected ConfigError::Validation");
        };
        assert!(errors.contains("blogPostDir"));
        assert!(!errors.contains("siteTitle"));
    }
}
