use crate::{auth::Role, locale::split_locale_prefix};

/// Roles allowed into the `/admin` area.
pub const STAFF_ROLES: &[Role] = &[Role::Admin, Role::Editor];

/// Roles that satisfy "any authenticated user".
pub const ANY_AUTHENTICATED: &[Role] = &[Role::User, Role::Editor, Role::Admin];

/// The public sections of the site. Each entry also makes its direct
/// children public (e.g. `/blog/{slug}`), except the root.
pub const DEFAULT_PUBLIC_PREFIXES: &[&str] = &[
    "/",
    "/about",
    "/services",
    "/blog",
    "/news",
    "/events",
    "/contact",
    "/resources",
];

/// RouteClass
///
/// The outcome of classifying a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Public,
    Protected { required: &'static [Role] },
}

impl RouteClass {
    /// Whether a session holding `role` may enter a route of this class.
    pub fn permits(&self, role: Role) -> bool {
        match self {
            RouteClass::Public => true,
            RouteClass::Protected { required } => required.contains(&role),
        }
    }

    pub fn is_public(&self) -> bool {
        matches!(self, RouteClass::Public)
    }
}

/// RouteClassifier
///
/// Decides whether a request path needs an authenticated session, from a
/// static allow-list of public prefixes. Matching is case-insensitive, ignores
/// an optional `/en` or `/ko` leading segment, and ignores trailing slashes.
///
/// Anything under `/admin` requires staff roles; anything else that is not
/// allow-listed requires any signed-in user. Classification is total: an
/// unexpected path is never an error, only a `Protected` outcome.
#[derive(Debug, Clone)]
pub struct RouteClassifier {
    public_prefixes: Vec<String>,
}

impl Default for RouteClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_PUBLIC_PREFIXES.iter().copied())
    }
}

impl RouteClassifier {
    pub fn new<I, S>(public_prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let public_prefixes = public_prefixes
            .into_iter()
            .map(|prefix| normalize(prefix.as_ref()))
            .collect();
        Self { public_prefixes }
    }

    /// classify
    ///
    /// Expects a percent-decoded path without its query string.
    pub fn classify(&self, path: &str) -> RouteClass {
        let normalized = normalize(path);
        let stripped = match split_locale_prefix(&normalized) {
            Some((_, "")) => "/",
            Some((_, rest)) => rest,
            None => normalized.as_str(),
        };

        if stripped.starts_with("/admin") {
            return RouteClass::Protected {
                required: STAFF_ROLES,
            };
        }

        if self
            .public_prefixes
            .iter()
            .any(|prefix| matches_prefix(prefix, stripped))
        {
            RouteClass::Public
        } else {
            RouteClass::Protected {
                required: ANY_AUTHENTICATED,
            }
        }
    }
}

/// Lowercases, ensures a leading slash, and drops trailing slashes.
/// The empty string normalizes to the root.
fn normalize(path: &str) -> String {
    let lowered = path.trim().to_lowercase();
    let trimmed = lowered.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// Exact match, or a single extra segment below a non-root prefix.
fn matches_prefix(prefix: &str, path: &str) -> bool {
    if path == prefix {
        return true;
    }
    if prefix == "/" {
        return false;
    }
    path.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('/'))
        .is_some_and(|child| !child.is_empty() && !child.contains('/'))
}
