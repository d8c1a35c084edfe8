//! Servicios de dominio
//!
//! Wizard de creación de espacios, inserción best-effort de espacios y
//! cliente del almacenamiento de imágenes.

pub mod espacio_service;
pub mod storage_service;
pub mod wizard;
