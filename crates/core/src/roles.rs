//! System role name constants carried in access tokens.
//!
//! These must match the `CHECK` constraint on `users.role` in
//! `20260301000001_create_users.sql`. Marketplace roles (sponsor/publisher)
//! are not stored here; they are resolved per request, see [`crate::identity`].

pub const ROLE_MEMBER: &str = "member";
pub const ROLE_ADMIN: &str = "admin";

/// All valid system role values.
pub const VALID_SYSTEM_ROLES: &[&str] = &[ROLE_MEMBER, ROLE_ADMIN];
