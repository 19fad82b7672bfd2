//! Repositorios de acceso a datos
//!
//! Un repositorio concreto por entidad sobre el pool de PostgreSQL.
//! Las escrituras que tocan el contador de kilometraje exponen métodos
//! sobre la transacción en curso.

pub mod driver_repository;
pub mod fine_repository;
pub mod maintenance_repository;
pub mod report_repository;
pub mod trip_repository;
pub mod vehicle_repository;
