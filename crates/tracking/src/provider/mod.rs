//! Stop catalog and vehicle position providers.

pub mod static_provider;
pub mod traits;

pub use static_provider::{StaticStopCatalog, StaticVehicleFeed};
pub use traits::{StopCatalog, StopRef, VehiclePositions};
