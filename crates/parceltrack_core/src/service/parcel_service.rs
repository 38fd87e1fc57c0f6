//! Parcel use-case service.
//!
//! # Responsibility
//! - Provide stable lifecycle entry points for core callers.
//! - Validate untrusted status words before they reach typed APIs.
//!
//! # Invariants
//! - Service APIs never bypass repository lifecycle guards.
//! - Service layer remains storage-agnostic.

use crate::model::parcel::{Parcel, ParcelNumber, ParcelStatus};
use crate::repo::parcel_repo::{ParcelRepository, RepoResult};
use std::str::FromStr;

/// Use-case service wrapper for parcel tracking operations.
pub struct ParcelService<R: ParcelRepository> {
    repo: R,
}

impl<R: ParcelRepository> ParcelService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new parcel and returns its tracking number.
    ///
    /// # Contract
    /// - The parcel always starts in the `registered` state.
    /// - `created_at` is an RFC3339 timestamp supplied by the caller.
    pub fn register(
        &self,
        client: i64,
        address: impl Into<String>,
        created_at: impl Into<String>,
    ) -> RepoResult<ParcelNumber> {
        self.repo.add(&Parcel::new(client, address, created_at))
    }

    /// Fetches one parcel by tracking number.
    pub fn get(&self, number: ParcelNumber) -> RepoResult<Parcel> {
        self.repo.get(number)
    }

    /// Lists all parcels owned by a client.
    pub fn parcels_for_client(&self, client: i64) -> RepoResult<Vec<Parcel>> {
        self.repo.get_by_client(client)
    }

    /// Marks a registered parcel as handed to the carrier.
    pub fn mark_sent(&self, number: ParcelNumber) -> RepoResult<()> {
        self.repo.set_status(number, ParcelStatus::Sent)
    }

    /// Marks a sent parcel as delivered.
    pub fn mark_delivered(&self, number: ParcelNumber) -> RepoResult<()> {
        self.repo.set_status(number, ParcelStatus::Delivered)
    }

    /// Applies a status change requested as free text.
    ///
    /// Boundary entry point: parses the status word first, so unknown values
    /// fail with `UnrecognizedStatus` before any lookup happens.
    pub fn set_status_text(&self, number: ParcelNumber, status: &str) -> RepoResult<()> {
        let target = ParcelStatus::from_str(status)?;
        self.repo.set_status(number, target)
    }

    /// Changes the delivery address of a still-registered parcel.
    pub fn change_address(&self, number: ParcelNumber, address: &str) -> RepoResult<()> {
        self.repo.set_address(number, address)
    }

    /// Cancels (removes) a still-registered parcel.
    pub fn cancel(&self, number: ParcelNumber) -> RepoResult<()> {
        self.repo.delete(number)
    }
}
