mod photo_selection_service;

pub use photo_selection_service::PhotoSelectionService;
