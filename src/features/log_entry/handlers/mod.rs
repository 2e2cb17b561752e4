mod console_handler;

pub use console_handler::run_console;
