use async_trait::async_trait;

use crate::features::log_form::dtos::PhotoRef;

/// Device capability for choosing images from the photo library
#[async_trait]
pub trait PhotoPicker: Send {
    /// Ask for library access; false means access was refused
    async fn request_permission(&mut self) -> bool;

    /// Let the user choose up to `max_count` images; `None` when cancelled
    async fn pick_images(&mut self, max_count: usize) -> Option<Vec<PhotoRef>>;
}
