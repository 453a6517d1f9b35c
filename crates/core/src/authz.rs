//! Authorization guard.
//!
//! Role checks fail closed with `Forbidden`. Ownership checks come in two
//! flavours:
//!
//! - [`ensure_owner_hidden`] for private resources (campaigns, creatives,
//!   placements): a mismatch is reported as `NotFound` so callers cannot probe
//!   for another party's records.
//! - [`ensure_owner_public`] for resources whose existence is already public
//!   (ad slots are listed in the marketplace): a mismatch is `Forbidden`.

use crate::error::CoreError;
use crate::identity::{RequestContext, ResolvedRole, Role};
use crate::types::DbId;

/// Require one of `allowed` marketplace roles.
pub fn require_role(resolved: &ResolvedRole, allowed: &[Role]) -> Result<Role, CoreError> {
    match resolved.role {
        Some(role) if allowed.contains(&role) => Ok(role),
        _ => {
            let names: Vec<&str> = allowed.iter().map(|r| r.as_str()).collect();
            Err(CoreError::Forbidden(format!(
                "Requires role: {}",
                names.join(" or ")
            )))
        }
    }
}

/// Require the sponsor role and return the caller's sponsor id.
pub fn require_sponsor(resolved: &ResolvedRole) -> Result<DbId, CoreError> {
    require_role(resolved, &[Role::Sponsor])?;
    resolved
        .sponsor_id
        .ok_or_else(|| CoreError::Forbidden("Requires role: sponsor".into()))
}

/// Require the publisher role and return the caller's publisher id.
pub fn require_publisher(resolved: &ResolvedRole) -> Result<DbId, CoreError> {
    require_role(resolved, &[Role::Publisher])?;
    resolved
        .publisher_id
        .ok_or_else(|| CoreError::Forbidden("Requires role: publisher".into()))
}

/// Require the `admin` system role.
pub fn require_admin(ctx: &RequestContext) -> Result<(), CoreError> {
    if ctx.is_admin() {
        Ok(())
    } else {
        Err(CoreError::Forbidden("Admin role required".into()))
    }
}

/// Ownership check for private resources. Mismatch reads as missing.
pub fn ensure_owner_hidden(
    entity: &'static str,
    id: DbId,
    owner_id: DbId,
    caller_owner_id: DbId,
) -> Result<(), CoreError> {
    if owner_id == caller_owner_id {
        Ok(())
    } else {
        Err(CoreError::not_found(entity, id))
    }
}

/// Ownership check for publicly listed resources.
pub fn ensure_owner_public(
    entity: &'static str,
    owner_id: DbId,
    caller_owner_id: DbId,
) -> Result<(), CoreError> {
    if owner_id == caller_owner_id {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "{entity} belongs to another publisher"
        )))
    }
}
