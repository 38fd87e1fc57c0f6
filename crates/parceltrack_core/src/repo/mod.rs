//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for parcels.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Guarded mutations are expressed as single conditional statements, not
//!   read-validate-write sequences.
//! - Repository APIs return semantic errors (`NotFound`, `InvalidTransition`,
//!   `InvalidState`) in addition to DB transport errors.

pub mod parcel_repo;
