//! Link metadata for event links.
//!
//! Event data lists links as a mapping from a link type to a URL:
//!
//! ```yaml
//! links:
//!   fb.event: https://facebook.com/events/123
//!   homepage: https://example.org
//!   tradivarium: ~
//! ```
//!
//! [`resolve_links`] turns that mapping into display-ready [`EventLink`]s.
//! Known link types get their title and icon from a fixed table; any other
//! type falls back to a generic link icon.
//!
//! # Example
//!
//! ```
//! use ftwhub_core::links::{resolve_links, LinkKind};
//! use ftwhub_core::value::Value;
//!
//! let links = Value::from_yaml_str("fb.event: https://fb.example/e/1\nmystery: https://x.example").unwrap();
//! let resolved = resolve_links(&links);
//! assert_eq!(resolved[0].symbol, "facebook");
//! assert_eq!(resolved[1].symbol, "link");
//! assert_eq!(LinkKind::from_key("mystery"), LinkKind::Other);
//! ```

use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::value::Value;

/// The kind of an event link, selected by its key in the `links` mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    /// `fb.event`
    FacebookEvent,
    /// `tradivarium`
    Tradivarium,
    /// `homepage`
    Homepage,
    /// Any other link type.
    Other,
}

impl LinkKind {
    /// Looks up the kind for a link-type key. Unknown keys map to [`LinkKind::Other`].
    pub fn from_key(key: &str) -> Self {
        match key {
            "fb.event" => Self::FacebookEvent,
            "tradivarium" => Self::Tradivarium,
            "homepage" => Self::Homepage,
            _ => Self::Other,
        }
    }

    /// Link text shown to readers, if the kind has one.
    pub fn title(&self) -> Option<&'static str> {
        match self {
            Self::FacebookEvent => Some("diese Veranstaltung auf Facebook"),
            Self::Tradivarium => Some("Veranstaltungsinfos auf tradivarium.at"),
            Self::Homepage => Some("Mehr Infos auf der Homepage"),
            Self::Other => None,
        }
    }

    /// Icon name used by the templates.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::FacebookEvent => "facebook",
            Self::Tradivarium | Self::Homepage | Self::Other => "link",
        }
    }

    /// Alt text for the icon.
    pub fn alt(&self) -> &'static str {
        match self {
            Self::FacebookEvent => "Facebook-Logo",
            Self::Tradivarium | Self::Homepage | Self::Other => "Link-Symbol",
        }
    }
}

/// A resolved event link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventLink {
    /// The link-type key as written in the data.
    #[serde(rename = "type")]
    pub link_type: String,
    /// The link target.
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub symbol: String,
    pub alt: String,
}

impl EventLink {
    /// Creates a link with the display metadata of `link_type`.
    pub fn new(link_type: impl Into<String>, href: impl Into<String>) -> Self {
        let link_type = link_type.into();
        let kind = LinkKind::from_key(&link_type);
        Self {
            link_type,
            href: href.into(),
            title: kind.title().map(str::to_string),
            symbol: kind.symbol().to_string(),
            alt: kind.alt().to_string(),
        }
    }
}

/// Resolves a `links` mapping into display-ready links.
///
/// Entries with a null or empty URL are dropped. The order of the mapping is
/// kept. A value that is not a mapping (including null) yields no links.
pub fn resolve_links(links: &Value) -> Vec<EventLink> {
    let Some(map) = links.as_mapping() else {
        if !links.is_null() {
            warn!(found = links.type_name(), "Ignoring links that are not a mapping");
        }
        return Vec::new();
    };

    map.iter()
        .filter_map(|(link_type, url)| {
            if !url.is_truthy() {
                debug!(link_type = %link_type, "Dropping link without URL");
                return None;
            }
            let Some(href) = url.to_text() else {
                warn!(link_type = %link_type, found = url.type_name(), "Ignoring link with non-scalar URL");
                return None;
            };
            if Url::parse(&href).is_err() {
                warn!(link_type = %link_type, href = %href, "Link URL does not parse as an absolute URL");
            }
            Some(EventLink::new(link_type.as_str(), href))
        })
        .collect()
}
