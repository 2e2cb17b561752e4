mod log_record_dto;

pub use log_record_dto::*;
