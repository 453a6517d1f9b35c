//! Request extractors for authentication, identity resolution and RBAC.
//!
//! - [`auth::Principal`] -- verified principal from a JWT Bearer token.
//! - [`context::Caller`] -- the per-request [`RequestContext`] (principal,
//!   system role, resolved marketplace role).
//! - [`rbac::RequireSponsor`], [`rbac::RequirePublisher`] -- marketplace
//!   role gates that reject before the handler runs. The admin gate lives in
//!   the booking engine, which receives the full context.
//!
//! [`RequestContext`]: slotbook_core::identity::RequestContext

pub mod auth;
pub mod context;
pub mod rbac;
