pub mod file_repository;
pub mod memory_file_repository;

pub use file_repository::{FileService, FileServiceError, SeaOrmFileService};
pub use memory_file_repository::InMemoryFileService;
