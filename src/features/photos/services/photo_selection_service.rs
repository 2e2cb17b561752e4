use tracing::{debug, info, warn};

use crate::core::error::{AppError, Collection, Result};
use crate::features::log_form::LogFormModel;
use crate::features::photos::picker::PhotoPicker;
use crate::shared::constants::MAX_PHOTOS;

/// Drives the photo picker against the form's remaining photo capacity
pub struct PhotoSelectionService<P> {
    picker: P,
}

impl<P: PhotoPicker> PhotoSelectionService<P> {
    pub fn new(picker: P) -> Self {
        Self { picker }
    }

    pub fn picker_mut(&mut self) -> &mut P {
        &mut self.picker
    }

    /// Pick photos and attach them to the form
    ///
    /// The picker is never opened when the form already holds the maximum.
    /// A cancelled pick attaches nothing and returns `Ok(0)`.
    pub async fn select_photos(&mut self, model: &mut LogFormModel) -> Result<usize> {
        let remaining = model.remaining_photo_capacity();
        if remaining == 0 {
            warn!("Photo picker not opened: {} photos attached", MAX_PHOTOS);
            return Err(AppError::CapacityExceeded {
                collection: Collection::Photos,
                limit: MAX_PHOTOS,
            });
        }

        if !self.picker.request_permission().await {
            warn!("Photo library permission denied");
            return Err(AppError::PermissionDenied);
        }

        debug!("Opening photo picker with selection limit {}", remaining);
        let Some(picked) = self.picker.pick_images(remaining).await else {
            debug!("Photo picker cancelled");
            return Ok(0);
        };

        let added = model.add_photos(picked)?;
        info!("Attached {} photos", added);
        Ok(added)
    }
}
