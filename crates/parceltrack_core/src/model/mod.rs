//! Domain model for parcel tracking.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Encode the delivery lifecycle as a closed state set.
//!
//! # Invariants
//! - Every parcel is identified by a store-assigned `ParcelNumber`.
//! - Lifecycle order is forward-only and defined next to the status type.

pub mod parcel;
