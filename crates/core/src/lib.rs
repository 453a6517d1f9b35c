//! Domain rules for the sponsorship marketplace.
//!
//! Everything here is pure: no database, no HTTP. The DB and API crates call
//! into these modules for validation, state transitions and accrual math.

mod text_enum;

pub mod accrual;
pub mod ad_slot;
pub mod authz;
pub mod campaign;
pub mod creative;
pub mod error;
pub mod identity;
pub mod placement;
pub mod roles;
pub mod types;
