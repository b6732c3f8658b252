//! Image classifier port — cat detection on camera frames.

use catpoint_domain::error::CatpointError;
use catpoint_domain::image::Image;

/// Decides whether a frame contains a cat.
pub trait ImageClassifier {
    /// Return `true` when the classifier is at least `confidence_threshold`
    /// sure (`0.0..=1.0`) that `image` shows a cat.
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::Classifier`] when the frame cannot be analysed.
    fn contains_cat(&self, image: &Image, confidence_threshold: f32)
    -> Result<bool, CatpointError>;
}

impl<T: ImageClassifier + ?Sized> ImageClassifier for std::sync::Arc<T> {
    fn contains_cat(
        &self,
        image: &Image,
        confidence_threshold: f32,
    ) -> Result<bool, CatpointError> {
        (**self).contains_cat(image, confidence_threshold)
    }
}
