//! Backend de gestión de flota y multas de tránsito
//!
//! API REST para motoristas, vehículos, viajes, mantenimientos y multas,
//! con conciliación diferencial del kilometraje de cada vehículo y
//! alertas de mantenimiento derivadas del contador.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
