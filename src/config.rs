use std::env;

/// AppConfig
///
/// Holds the service configuration. Immutable once loaded and shared through
/// `AppState` via `FromRef`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Controls the local auth bypass and log format.
    pub env: Env,
    // Socket address the HTTP server binds to.
    pub bind_addr: String,
    // Secret used to validate incoming session JWTs.
    pub jwt_secret: String,
    // Endpoint of the transactional mail provider.
    pub mail_api_url: String,
    // Bearer key for the mail provider.
    pub mail_api_key: String,
    // Upper bound on one mail provider call, in seconds.
    pub mail_timeout_secs: u64,
    // Sender address used for contact form notifications.
    pub mail_from: String,
    // Inbox receiving contact form submissions.
    pub contact_recipient: String,
    // Maximum contact submissions per sender within one window.
    pub contact_rate_limit: usize,
    // Length of the contact rate-limit window, in seconds.
    pub contact_rate_window_secs: u64,
    // Where unauthenticated visitors of staff pages are sent.
    pub sign_in_path: String,
}

/// Env
///
/// The runtime context: developer conveniences in `Local`, hardened auth and
/// JSON logs in `Production`.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

const LOCAL_JWT_SECRET: &str = "local-development-jwt-secret";
const DEFAULT_MAIL_API_URL: &str = "https://api.resend.com/emails";

impl Default for AppConfig {
    /// Non-panicking values for test scaffolding.
    fn default() -> Self {
        Self {
            env: Env::Local,
            bind_addr: "127.0.0.1:3000".to_string(),
            jwt_secret: LOCAL_JWT_SECRET.to_string(),
            mail_api_url: DEFAULT_MAIL_API_URL.to_string(),
            mail_api_key: "test-mail-key".to_string(),
            mail_timeout_secs: 10,
            mail_from: "noreply@localhost".to_string(),
            contact_recipient: "contact@localhost".to_string(),
            contact_rate_limit: 3,
            contact_rate_window_secs: 3600,
            sign_in_path: "/admin/login".to_string(),
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from the environment at startup.
    ///
    /// # Panics
    /// Panics in `Production` when `JWT_SECRET` or `MAIL_API_KEY` is missing,
    /// so the service never starts with an insecure or undeliverable setup.
    pub fn load() -> Self {
        let env = match env::var("APP_ENV").unwrap_or_default().as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let (jwt_secret, mail_api_key) = match env {
            Env::Production => (
                env::var("JWT_SECRET").expect("FATAL: JWT_SECRET must be set in production."),
                env::var("MAIL_API_KEY").expect("FATAL: MAIL_API_KEY must be set in production."),
            ),
            Env::Local => (
                env::var("JWT_SECRET").unwrap_or_else(|_| LOCAL_JWT_SECRET.to_string()),
                env::var("MAIL_API_KEY").unwrap_or_default(),
            ),
        };

        let defaults = Self::default();

        Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            jwt_secret,
            mail_api_url: env::var("MAIL_API_URL").unwrap_or(defaults.mail_api_url),
            mail_api_key,
            mail_timeout_secs: parse_var("MAIL_TIMEOUT_SECS", defaults.mail_timeout_secs),
            mail_from: env::var("MAIL_FROM").unwrap_or(defaults.mail_from),
            contact_recipient: env::var("CONTACT_RECIPIENT").unwrap_or(defaults.contact_recipient),
            contact_rate_limit: parse_var("CONTACT_RATE_LIMIT", defaults.contact_rate_limit),
            contact_rate_window_secs: parse_var(
                "CONTACT_RATE_WINDOW_SECS",
                defaults.contact_rate_window_secs,
            ),
            sign_in_path: env::var("SIGN_IN_PATH").unwrap_or(defaults.sign_in_path),
            env,
        }
    }

    /// Whether the unauthenticated `x-user-id`/`x-user-role` headers are
    /// honored. True whenever `APP_ENV` is not `production`.
    pub fn local_auth_bypass(&self) -> bool {
        self.env == Env::Local
    }
}

/// Numeric variables fall back to the default when unset or unparsable.
fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
