pub mod ad_slot;
pub mod auth;
pub mod campaign;
pub mod creative;
pub mod placement;
pub mod publisher;
pub mod sponsor;
