//! Transactional orchestration over the pure domain rules in `slotbook_core`.

pub mod booking;
