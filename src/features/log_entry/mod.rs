pub mod handlers;
pub mod services;

pub use handlers::run_console;
pub use services::LogEntrySession;
