pub mod admin_dto;
pub mod api_response;
pub mod auth_dto;
pub mod contacto_dto;
pub mod espacio_dto;
pub mod incidencia_dto;
pub mod reserva_dto;
pub mod user_dto;
