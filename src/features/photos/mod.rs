pub mod picker;
pub mod services;

pub use picker::PhotoPicker;
pub use services::PhotoSelectionService;
