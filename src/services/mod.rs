//! Servicios de negocio
//!
//! El núcleo de conciliación de kilometraje, el asesor de mantenimiento,
//! la importación de planillas y el estado de licencias.

pub mod license_status;
pub mod maintenance_advisor;
pub mod mileage;
pub mod trip_import;
