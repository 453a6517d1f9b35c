//! Repository structs, one per table.
//!
//! Each repository is a zero-sized struct with async associated functions.
//! Functions that participate in a caller-owned transaction take
//! `&mut PgConnection` (pass `&mut *tx`); the rest take `&PgPool`.

pub mod ad_slot_repo;
pub mod campaign_repo;
pub mod creative_repo;
pub mod identity_repo;
pub mod placement_repo;
pub mod publisher_repo;
pub mod session_repo;
pub mod sponsor_repo;
pub mod user_repo;

pub use ad_slot_repo::AdSlotRepo;
pub use campaign_repo::CampaignRepo;
pub use creative_repo::CreativeRepo;
pub use identity_repo::IdentityRepo;
pub use placement_repo::PlacementRepo;
pub use publisher_repo::PublisherRepo;
pub use session_repo::SessionRepo;
pub use sponsor_repo::SponsorRepo;
pub use user_repo::UserRepo;
