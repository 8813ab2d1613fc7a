pub mod existence;
pub mod file_system;
pub mod share_service;
pub mod storage;
pub mod upload_service;
