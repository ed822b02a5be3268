//! Name-based access to [`SiteConfig`] fields.
//!
//! Templates address configuration values by their schema name
//! (`siteTitle`, `userLinks`, ...). [`Field`] is the closed set of those
//! names; [`SiteConfig::get`] resolves a name to a borrowed [`FieldValue`].

use std::fmt;
use std::str::FromStr;

use crate::{ConfigError, LinkEntry, SiteConfig};

/// A field of the site configuration schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    BlogPostDir,
    SiteTitle,
    SiteTitleAlt,
    SiteLogo,
    SiteUrl,
    PathPrefix,
    FixedFooter,
    SiteDescription,
    SiteRss,
    SiteFbAppId,
    SiteGaTrackingId,
    PostDefaultCategoryId,
    UserName,
    UserTwitter,
    UserLocation,
    UserAvatar,
    UserDescription,
    UserLinks,
    Copyright,
}

impl Field {
    /// All fields in declaration order.
    pub const ALL: [Self; 19] = [
        Self::BlogPostDir,
        Self::SiteTitle,
        Self::SiteTitleAlt,
        Self::SiteLogo,
        Self::SiteUrl,
        Self::PathPrefix,
        Self::FixedFooter,
        Self::SiteDescription,
        Self::SiteRss,
        Self::SiteFbAppId,
        Self::SiteGaTrackingId,
        Self::PostDefaultCategoryId,
        Self::UserName,
        Self::UserTwitter,
        Self::UserLocation,
        Self::UserAvatar,
        Self::UserDescription,
        Self::UserLinks,
        Self::Copyright,
    ];

    /// Schema name, as used in `site.toml` and by [`SiteConfig::get`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::BlogPostDir => "blogPostDir",
            Self::SiteTitle => "siteTitle",
            Self::SiteTitleAlt => "siteTitleAlt",
            Self::SiteLogo => "siteLogo",
            Self::SiteUrl => "siteUrl",
            Self::PathPrefix => "pathPrefix",
            Self::FixedFooter => "fixedFooter",
            Self::SiteDescription => "siteDescription",
            Self::SiteRss => "siteRss",
            Self::SiteFbAppId => "siteFBAppID",
            Self::SiteGaTrackingId => "siteGATrackingID",
            Self::PostDefaultCategoryId => "postDefaultCategoryID",
            Self::UserName => "userName",
            Self::UserTwitter => "userTwitter",
            Self::UserLocation => "userLocation",
            Self::UserAvatar => "userAvatar",
            Self::UserDescription => "userDescription",
            Self::UserLinks => "userLinks",
            Self::Copyright => "copyright",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = ConfigError;

    /// Names are case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| ConfigError::UnknownField(s.to_owned()))
    }
}

/// Borrowed value of a single configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// String-valued field.
    Text(&'a str),
    /// Boolean field.
    Flag(bool),
    /// The ordered link list.
    Links(&'a [LinkEntry]),
}

impl<'a> FieldValue<'a> {
    pub fn as_text(self) -> Option<&'a str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_flag(self) -> Option<bool> {
        match self {
            Self::Flag(flag) => Some(flag),
            _ => None,
        }
    }

    pub fn as_links(self) -> Option<&'a [LinkEntry]> {
        match self {
            Self::Links(links) => Some(links),
            _ => None,
        }
    }
}

impl SiteConfig {
    /// Value of a field.
    pub fn field(&self, field: Field) -> FieldValue<'_> {
        match field {
            Field::BlogPostDir => FieldValue::Text(&self.blog_post_dir),
            Field::SiteTitle => FieldValue::Text(&self.site_title),
            Field::SiteTitleAlt => FieldValue::Text(&self.site_title_alt),
            Field::SiteLogo => FieldValue::Text(&self.site_logo),
            Field::SiteUrl => FieldValue::Text(&self.site_url),
            Field::PathPrefix => FieldValue::Text(&self.path_prefix),
            Field::FixedFooter => FieldValue::Flag(self.fixed_footer),
            Field::SiteDescription => FieldValue::Text(&self.site_description),
            Field::SiteRss => FieldValue::Text(&self.site_rss),
            Field::SiteFbAppId => FieldValue::Text(&self.site_fb_app_id),
            Field::SiteGaTrackingId => FieldValue::Text(&self.site_ga_tracking_id),
            Field::PostDefaultCategoryId => FieldValue::Text(&self.post_default_category_id),
            Field::UserName => FieldValue::Text(&self.user_name),
            Field::UserTwitter => FieldValue::Text(&self.user_twitter),
            Field::UserLocation => FieldValue::Text(&self.user_location),
            Field::UserAvatar => FieldValue::Text(&self.user_avatar),
            Field::UserDescription => FieldValue::Text(&self.user_description),
            Field::UserLinks => FieldValue::Links(&self.user_links),
            Field::Copyright => FieldValue::Text(&self.copyright),
        }
    }

    /// Value of the field named `name`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownField` if `name` is not a schema field.
    pub fn get(&self, name: &str) -> Result<FieldValue<'_>, ConfigError> {
        Ok(self.field(name.parse()?))
    }
}
