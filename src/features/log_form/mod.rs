pub mod directory;
pub mod dtos;
pub mod model;

pub use directory::EmployeeDirectory;
pub use model::LogFormModel;
