pub mod admin_controller;
pub mod auth_controller;
pub mod contacto_controller;
pub mod espacio_controller;
pub mod estadisticas_controller;
pub mod incidencia_controller;
pub mod propietario_controller;
pub mod reserva_controller;
pub mod user_controller;
