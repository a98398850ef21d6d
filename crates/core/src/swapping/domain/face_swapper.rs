use crate::detection::domain::detected_face::DetectedFace;
use crate::shared::frame::Frame;

/// Domain interface for identity compositing.
///
/// Replaces one detected face region of `frame` in place with the identity
/// described by `source_embedding`. Multi-face targets are handled by the
/// caller invoking this once per face over the same working frame.
pub trait FaceSwapper: Send {
    fn swap(
        &mut self,
        frame: &mut Frame,
        target: &DetectedFace,
        source_embedding: &[f32],
    ) -> Result<(), Box<dyn std::error::Error>>;
}
