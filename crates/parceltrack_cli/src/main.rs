//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `parceltrack_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use parceltrack_core::db::open_db_in_memory;
use parceltrack_core::{ParcelService, SqliteParcelRepository};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let conn = open_db_in_memory()?;
    let service = ParcelService::new(SqliteParcelRepository::new(&conn));

    let number = service.register(1, "smoke test address", "2026-01-01T00:00:00Z")?;
    service.mark_sent(number)?;
    let parcel = service.get(number)?;

    println!("parceltrack_core version={}", parceltrack_core::core_version());
    println!("parcel number={} status={}", parcel.number, parcel.status);
    Ok(())
}
