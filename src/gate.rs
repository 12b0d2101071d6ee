use std::borrow::Cow;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    AppState,
    auth::AuthUser,
    classifier::RouteClass,
    error::ApiError,
    locale::{LOCALE_COOKIE, Locale, NegotiationAction, negotiate, prefixed_path},
};

/// How long the locale cookie is remembered, in seconds (one year).
const LOCALE_COOKIE_MAX_AGE: u64 = 31_536_000;

/// Path prefixes that never go through the gate: the JSON API guards itself
/// with extractors, and tooling endpoints are locale-agnostic.
const BYPASS_PREFIXES: &[&str] = &["/api", "/health", "/swagger-ui", "/api-docs"];

/// Directories static files are served from.
const ASSET_PREFIXES: &[&str] = &["/images", "/static", "/fonts", "/_next"];

fn under_prefix(path: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|prefix| {
        path == *prefix
            || path
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

/// Static files: anything under an asset directory, and root-level files
/// such as `/favicon.ico` or `/robots.txt`.
pub fn is_static_asset(path: &str) -> bool {
    let root_file = path
        .strip_prefix('/')
        .is_some_and(|rest| !rest.contains('/') && rest.contains('.'));
    root_file || under_prefix(path, ASSET_PREFIXES)
}

/// Whether a request path is a page the gate and renderer handle. A dot in a
/// deeper segment (`/admin/report.pdf`, `/blog/v1.2-notes`) does not exempt a
/// path from authorization.
pub fn is_page_path(path: &str) -> bool {
    !under_prefix(path, BYPASS_PREFIXES) && !is_static_asset(path)
}

/// site_gate
///
/// Per-request routing decision for page paths:
/// 1. classify the decoded path as public or protected;
/// 2. protected paths need an `AuthUser` whose role the class permits
///    (anonymous staff-area visitors are sent to the sign-in page);
/// 3. staff-area paths are served as-is, everything else goes through locale
///    negotiation, which may redirect to the locale-prefixed path.
///
/// Served requests carry the resolved `Locale` in their extensions.
pub async fn site_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let raw_path = request.uri().path().to_string();
    if !is_page_path(&raw_path) {
        return next.run(request).await;
    }

    let path = decode_path(&raw_path);
    let class = state.classifier.classify(&path);
    let is_sign_in = path.trim_end_matches('/') == state.config.sign_in_path.trim_end_matches('/');

    if let RouteClass::Protected { required } = class {
        if !is_sign_in {
            let (parts, body) = request.into_parts();
            let user = AuthUser::resolve(&parts, &state.config);
            let staff_area = required.iter().all(|role| role.is_staff());

            match user {
                Ok(user) if class.permits(user.role) => {}
                Ok(user) => {
                    tracing::debug!(path = %path, role = user.role.as_str(), "gate: role not permitted");
                    return ApiError::Forbidden.into_response();
                }
                Err(_) if staff_area => {
                    tracing::debug!(path = %path, "gate: anonymous staff request, redirecting to sign-in");
                    let target = format!(
                        "{}?callbackUrl={}",
                        state.config.sign_in_path,
                        urlencoding::encode(&path)
                    );
                    return Redirect::temporary(&target).into_response();
                }
                Err(err) => return err.into_response(),
            }

            let request = Request::from_parts(parts, body);
            if staff_area {
                return next.run(request).await;
            }
            return negotiate_and_serve(request, &path, next).await;
        }
    }

    if is_sign_in {
        return next.run(request).await;
    }
    negotiate_and_serve(request, &path, next).await
}

/// Negotiates on the decoded `path`; a redirect re-prefixes the raw request
/// path so percent escapes survive into `Location`.
async fn negotiate_and_serve(mut request: Request, path: &str, next: Next) -> Response {
    let cookie = locale_cookie(request.headers());
    let accept_language = request
        .headers()
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok());

    let negotiation = negotiate(path, cookie.as_deref(), accept_language);

    match negotiation.action {
        NegotiationAction::RedirectTo(_) => {
            let target = prefixed_path(negotiation.locale, request.uri().path());
            let target = match request.uri().query() {
                Some(query) => format!("{}?{}", target, query),
                None => target,
            };
            tracing::debug!(from = %path, to = %target, "gate: locale redirect");
            Redirect::temporary(&target).into_response()
        }
        NegotiationAction::Serve => {
            let locale = negotiation.locale;
            request.extensions_mut().insert(locale);
            let mut response = next.run(request).await;
            if cookie.as_deref().and_then(Locale::from_code) != Some(locale) {
                remember_locale(&mut response, locale);
            }
            response
        }
    }
}

/// Percent-decodes the path; on invalid UTF-8 the raw path is used.
fn decode_path(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| raw.to_string())
}

/// Reads the remembered locale from the `Cookie` header(s).
fn locale_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == LOCALE_COOKIE)
        .map(|(_, value)| value.trim().to_string())
}

fn remember_locale(response: &mut Response, locale: Locale) {
    let cookie = format!(
        "{}={}; Path=/; Max-Age={}; SameSite=Lax",
        LOCALE_COOKIE, locale, LOCALE_COOKIE_MAX_AGE
    );
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
}
