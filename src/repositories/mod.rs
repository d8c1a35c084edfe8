pub mod contacto_repository;
pub mod espacio_repository;
pub mod estadisticas_repository;
pub mod incidencia_repository;
pub mod reserva_repository;
pub mod user_repository;
