//! Well-known role names and identity helpers.
//!
//! Role names must match the `chk_users_role` constraint in
//! `20260301000001_create_users.sql`.

pub const ROLE_USER: &str = "user";
pub const ROLE_ADMIN: &str = "admin";

/// Canonical form of an email address used for identity comparisons.
///
/// Identity checks across the platform are plain string matches on email, so
/// every email is trimmed and lowercased before it is stored or compared.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Whether two emails refer to the same identity.
pub fn same_identity(a: &str, b: &str) -> bool {
    normalize_email(a) == normalize_email(b)
}
