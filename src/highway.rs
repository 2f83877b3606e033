//! OSM `highway` allow-list used when ingesting ways.
//!
//! Only non-service road classes are routable. This keeps routes off
//! footpaths and service alleys as much as possible.

use rustc_hash::FxHashSet;

/// Highway classes accepted by default.
pub const DEFAULT_ALLOWED_HIGHWAYS: &[&str] = &[
    "motorway",
    "trunk",
    "primary",
    "secondary",
    "tertiary",
    "unclassified",
    "residential",
    "living_street",
    "motorway_link",
    "trunk_link",
    "primary_link",
    "secondary_link",
    "tertiary_link",
];

/// Set of highway tag values that may form graph edges.
#[derive(Debug, Clone)]
pub struct HighwayFilter {
    allowed: FxHashSet<String>,
}

impl HighwayFilter {
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether a way tagged `highway=<tag>` is routable. Empty tags never are.
    pub fn allows(&self, tag: &str) -> bool {
        !tag.is_empty() && self.allowed.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }
}

impl Default for HighwayFilter {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_HIGHWAYS.iter().copied())
    }
}
