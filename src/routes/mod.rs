//! Router Module Index
//!
//! Splits the JSON API by access tier. Page paths are not routed here: they
//! fall through to the page handler behind the site gate.

/// Anonymous, read-only content API, the contact form and health checks.
pub mod public;

/// Routes behind the `auth_middleware` layer; any signed-in role.
pub mod authenticated;

/// Content administration, restricted to the `admin` and `editor` roles.
pub mod admin;
