//! Modelos de dominio
//!
//! Structs que mapean a las tablas de PostgreSQL.

pub mod driver;
pub mod fine;
pub mod maintenance;
pub mod trip;
pub mod vehicle;

pub use driver::Driver;
pub use fine::{Fine, FineWithRefs, VIOLATION_TYPES};
pub use maintenance::{MaintenanceRecord, MaintenanceWithVehicle, SERVICE_TYPES};
pub use trip::{Trip, TripWithRefs};
pub use vehicle::Vehicle;
