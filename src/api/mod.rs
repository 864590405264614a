pub mod config_dto;
pub mod model_dto;
pub mod session_dto;
