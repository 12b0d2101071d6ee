use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

/// Name of the cookie that remembers the visitor's last served locale.
pub const LOCALE_COOKIE: &str = "preferred_locale";

/// Locale
///
/// The language variant used to render user-facing text. Resolved once per
/// request by the `Negotiator` and never persisted server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Locale {
    En,
    Ko,
}

impl Locale {
    /// The locale served when no other signal is usable.
    pub const DEFAULT: Locale = Locale::Ko;

    /// Every supported locale, in catalog order.
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Ko];

    pub const fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ko => "ko",
        }
    }

    /// Parses an exact locale code (`en`, `ko`), ignoring ASCII case.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        if code.eq_ignore_ascii_case("en") {
            Some(Locale::En)
        } else if code.eq_ignore_ascii_case("ko") {
            Some(Locale::Ko)
        } else {
            None
        }
    }

    /// Parses a BCP 47 language tag by its primary subtag (`en-US` -> `En`).
    pub fn from_language_tag(tag: &str) -> Option<Self> {
        let primary = tag.trim().split(['-', '_']).next().unwrap_or_default();
        Self::from_code(primary)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Splits a recognized locale prefix off a path.
///
/// Returns the locale and the remainder (always starting with `/`, or empty
/// when the path was exactly `/en` / `/ko`). `/english` is not a prefix.
pub fn split_locale_prefix(path: &str) -> Option<(Locale, &str)> {
    let rest = path.strip_prefix('/')?;
    let (segment, remainder) = match rest.find('/') {
        Some(idx) => (&rest[..idx], &rest[idx..]),
        None => (rest, ""),
    };
    Locale::from_code(segment).map(|locale| (locale, remainder))
}

/// NegotiationAction
///
/// What the HTTP layer must do with the request after negotiation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NegotiationAction {
    /// Pass the request through; the path already encodes the locale.
    Serve,
    /// Redirect to the locale-prefixed equivalent of the requested path.
    RedirectTo(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Negotiation {
    pub locale: Locale,
    pub action: NegotiationAction,
}

/// negotiate
///
/// Resolves the effective locale for a request path. The fallback chain is:
/// path prefix, then the remembered preference, then the client's
/// `Accept-Language` list, then `Locale::DEFAULT`. Unsupported codes anywhere
/// in the input are skipped, so this never fails.
///
/// An unprefixed path always yields `RedirectTo`, so downstream rendering can
/// assume a locale-prefixed path. Negotiating the redirect target yields
/// `Serve` with the same locale.
pub fn negotiate(path: &str, cookie: Option<&str>, accept_language: Option<&str>) -> Negotiation {
    if let Some((locale, _)) = split_locale_prefix(path) {
        return Negotiation {
            locale,
            action: NegotiationAction::Serve,
        };
    }

    let locale = cookie
        .and_then(Locale::from_code)
        .or_else(|| accept_language.and_then(preferred_from_accept_language))
        .unwrap_or(Locale::DEFAULT);

    Negotiation {
        locale,
        action: NegotiationAction::RedirectTo(prefixed_path(locale, path)),
    }
}

/// Builds `/{locale}{path}`. The root maps to `/{locale}` rather than `/{locale}/`.
pub fn prefixed_path(locale: Locale, path: &str) -> String {
    match path {
        "" | "/" => format!("/{}", locale),
        p if p.starts_with('/') => format!("/{}{}", locale, p),
        p => format!("/{}/{}", locale, p),
    }
}

/// Picks the first supported locale from an `Accept-Language` header value.
///
/// Entries are ranked by q-value (stable for equal weights); `q=0` entries and
/// the `*` wildcard are ignored, as are malformed weights.
pub fn preferred_from_accept_language(header: &str) -> Option<Locale> {
    let mut ranked: Vec<(f32, &str)> = header
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';');
            let tag = parts.next()?.trim();
            if tag.is_empty() || tag == "*" {
                return None;
            }
            let mut weight = 1.0_f32;
            for param in parts {
                if let Some(q) = param.trim().strip_prefix("q=") {
                    weight = q.trim().parse().ok()?;
                }
            }
            (weight > 0.0).then_some((weight, tag))
        })
        .collect();

    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
    ranked
        .into_iter()
        .find_map(|(_, tag)| Locale::from_language_tag(tag))
}
