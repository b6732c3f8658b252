//! Scripted cat classifier.

use std::collections::VecDeque;
use std::sync::Mutex;

use catpoint_app::ports::ImageClassifier;
use catpoint_domain::error::{CatpointError, ValidationError};
use catpoint_domain::image::Image;

/// Errors raised by the virtual classifier itself.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    /// A previous caller panicked while holding the script lock.
    #[error("classifier script lock poisoned")]
    LockPoisoned,
}

impl From<ClassifierError> for CatpointError {
    fn from(err: ClassifierError) -> Self {
        Self::Classifier(Box::new(err))
    }
}

/// Simulated classifier that replays queued confidence scores.
///
/// Each classified frame consumes the next scripted score; once the script
/// is exhausted every frame gets the fallback score. A frame contains a cat
/// when its score reaches the requested threshold.
pub struct VirtualCatClassifier {
    script: Mutex<VecDeque<f32>>,
    fallback: f32,
}

impl Default for VirtualCatClassifier {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl VirtualCatClassifier {
    /// A classifier with an empty script, answering `fallback` for every frame.
    #[must_use]
    pub fn new(fallback: f32) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback,
        }
    }

    /// Queue confidence scores for upcoming frames.
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::Classifier`] if the script lock is poisoned.
    pub fn push_scores(&self, scores: impl IntoIterator<Item = f32>) -> Result<(), CatpointError> {
        let mut script = self.script.lock().map_err(|_| ClassifierError::LockPoisoned)?;
        script.extend(scores);
        Ok(())
    }

    fn next_score(&self) -> Result<f32, ClassifierError> {
        let mut script = self.script.lock().map_err(|_| ClassifierError::LockPoisoned)?;
        Ok(script.pop_front().unwrap_or(self.fallback))
    }
}

impl ImageClassifier for VirtualCatClassifier {
    fn contains_cat(
        &self,
        image: &Image,
        confidence_threshold: f32,
    ) -> Result<bool, CatpointError> {
        if !(0.0..=1.0).contains(&confidence_threshold) {
            return Err(ValidationError::InvalidConfidenceThreshold(confidence_threshold).into());
        }
        let score = self.next_score()?;
        tracing::debug!(
            image_id = %image.id(),
            bytes = image.as_bytes().len(),
            score,
            confidence_threshold,
            "virtual classification"
        );
        Ok(score >= confidence_threshold)
    }
}
