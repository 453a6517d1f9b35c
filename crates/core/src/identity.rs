//! Marketplace identity: which side of the marketplace a principal acts for.
//!
//! A principal (a verified user id) is a sponsor if a `sponsors` row points at
//! it, a publisher if a `publishers` row does. The lookup itself lives in the
//! DB layer; this module owns the combining rule and the per-request context
//! handed to every core operation.

use serde::Serialize;

use crate::roles::ROLE_ADMIN;
use crate::types::DbId;

/// Marketplace role of a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Sponsor,
    Publisher,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Sponsor => "sponsor",
            Role::Publisher => "publisher",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of resolving a principal to its marketplace role.
///
/// Exactly one of `sponsor_id` / `publisher_id` is set when `role` is set,
/// matching the role. `role == None` is the unauthenticated-equivalent state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRole {
    pub role: Option<Role>,
    pub sponsor_id: Option<DbId>,
    pub publisher_id: Option<DbId>,
}

impl ResolvedRole {
    /// No marketplace role.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn sponsor(sponsor_id: DbId) -> Self {
        Self {
            role: Some(Role::Sponsor),
            sponsor_id: Some(sponsor_id),
            publisher_id: None,
        }
    }

    pub fn publisher(publisher_id: DbId) -> Self {
        Self {
            role: Some(Role::Publisher),
            sponsor_id: None,
            publisher_id: Some(publisher_id),
        }
    }

    /// Combine the owner ids found for a principal.
    ///
    /// Sponsor takes precedence when both records exist.
    pub fn from_owner_ids(sponsor_id: Option<DbId>, publisher_id: Option<DbId>) -> Self {
        match (sponsor_id, publisher_id) {
            (Some(sid), _) => Self::sponsor(sid),
            (None, Some(pid)) => Self::publisher(pid),
            (None, None) => Self::none(),
        }
    }

    /// Whether both owner ids were present, i.e. the tie-break was applied.
    pub fn is_ambiguous(sponsor_id: Option<DbId>, publisher_id: Option<DbId>) -> bool {
        sponsor_id.is_some() && publisher_id.is_some()
    }
}

/// Per-request context built once at the HTTP boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    /// Verified user id from the auth provider.
    pub principal_id: DbId,
    /// System role from the access token (`member` or `admin`).
    pub system_role: String,
    /// Marketplace role resolved from sponsor/publisher records.
    pub resolved: ResolvedRole,
}

impl RequestContext {
    pub fn new(principal_id: DbId, system_role: impl Into<String>, resolved: ResolvedRole) -> Self {
        Self {
            principal_id,
            system_role: system_role.into(),
            resolved,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.system_role == ROLE_ADMIN
    }

    pub fn role(&self) -> Option<Role> {
        self.resolved.role
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::ROLE_MEMBER;

    #[test]
    fn sponsor_only() {
        let r = ResolvedRole::from_owner_ids(Some(3), None);
        assert_eq!(r.role, Some(Role::Sponsor));
        assert_eq!(r.sponsor_id, Some(3));
        assert_eq!(r.publisher_id, None);
    }

    #[test]
    fn publisher_only() {
        let r = ResolvedRole::from_owner_ids(None, Some(9));
        assert_eq!(r.role, Some(Role::Publisher));
        assert_eq!(r.publisher_id, Some(9));
        assert_eq!(r.sponsor_id, None);
    }

    #[test]
    fn neither_resolves_to_none() {
        assert_eq!(ResolvedRole::from_owner_ids(None, None), ResolvedRole::none());
    }

    #[test]
    fn sponsor_wins_tie_break() {
        let r = ResolvedRole::from_owner_ids(Some(1), Some(2));
        assert_eq!(r, ResolvedRole::sponsor(1));
        assert!(ResolvedRole::is_ambiguous(Some(1), Some(2)));
        assert!(!ResolvedRole::is_ambiguous(Some(1), None));
    }

    #[test]
    fn admin_flag_comes_from_system_role() {
        let admin = RequestContext::new(1, ROLE_ADMIN, ResolvedRole::none());
        let member = RequestContext::new(2, ROLE_MEMBER, ResolvedRole::sponsor(4));
        assert!(admin.is_admin());
        assert!(!member.is_admin());
        assert_eq!(member.role(), Some(Role::Sponsor));
    }

    #[test]
    fn resolved_role_serializes_camel_case() {
        let json = serde_json::to_value(ResolvedRole::publisher(5)).unwrap();
        assert_eq!(json["role"], "publisher");
        assert_eq!(json["publisherId"], 5);
        assert!(json["sponsorId"].is_null());
    }
}
