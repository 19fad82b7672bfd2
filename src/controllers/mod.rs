//! Controllers de negocio
//!
//! Un controller por entidad: validación de campos, reglas de dominio y
//! orquestación de repositorios. Los mensajes de éxito y error que ve el
//! usuario se arman acá.

pub mod driver_controller;
pub mod fine_controller;
pub mod maintenance_controller;
pub mod report_controller;
pub mod trip_controller;
pub mod vehicle_controller;
