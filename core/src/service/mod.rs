pub mod category_service;
pub mod dto;
pub mod task_service;
