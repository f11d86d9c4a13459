//! Route classification for auth-style pages.
//!
//! Auth pages render no sidebar and must never pull in the search widget.
//! Classification is a pure function of the path string and is recomputed on
//! every full or soft page load.

use serde::Deserialize;

use crate::config::routes;

/// Result of classifying the current route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteClassification {
    /// True for login/register/profile and everything under the auth namespace.
    pub is_excluded_route: bool,
}

impl RouteClassification {
    pub const EXCLUDED: Self = Self {
        is_excluded_route: true,
    };
    pub const ALLOWED: Self = Self {
        is_excluded_route: false,
    };
}

/// Excluded route patterns.
///
/// `exact` entries match a single path. `prefixes` match a namespace: the
/// prefix itself and anything below it, but not siblings that merely share
/// leading characters (`/auth` excludes `/auth/reset`, not `/authors`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RouteRules {
    pub exact: Vec<String>,
    pub prefixes: Vec<String>,
}

impl Default for RouteRules {
    fn default() -> Self {
        Self {
            exact: routes::EXCLUDED_EXACT.iter().map(|s| s.to_string()).collect(),
            prefixes: routes::EXCLUDED_PREFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl RouteRules {
    /// Classify a path (as found in `location.pathname`).
    pub fn classify(&self, path: &str) -> RouteClassification {
        let path = normalize(path);

        let exact = self.exact.iter().any(|route| normalize(route) == path);
        let namespaced = self.prefixes.iter().any(|prefix| {
            let prefix = normalize(prefix);
            path == prefix
                || path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/'))
        });

        RouteClassification {
            is_excluded_route: exact || namespaced,
        }
    }
}

/// Classify a path against the built-in excluded routes.
pub fn classify_route(path: &str) -> RouteClassification {
    RouteRules::default().classify(path)
}

/// Drop any query/fragment and trailing slashes (`/login/` serves `/login`).
fn normalize(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() && path.starts_with('/') {
        "/"
    } else {
        trimmed
    }
}
