use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::detection::domain::detected_face::FaceSelector;
use crate::detection::domain::face_analyzer::FaceAnalyzer;
use crate::imaging::domain::image_reader::ImageReader;

#[derive(Error, Debug)]
pub enum SourceFaceError {
    #[error("failed to read source image {path}: {reason}")]
    Read { path: PathBuf, reason: String },
    #[error("face analysis failed on source image {path}: {reason}")]
    Analyze { path: PathBuf, reason: String },
    #[error("no face found in source image {0}")]
    NoFace(PathBuf),
}

/// The identity transplanted onto every target in a batch.
///
/// Extracted once at engine construction and immutable afterwards: later
/// changes to the file on disk do not affect a built `SourceFace`.
#[derive(Clone, Debug)]
pub struct SourceFace {
    path: PathBuf,
    embedding: Vec<f32>,
}

impl SourceFace {
    pub fn new(path: PathBuf, embedding: Vec<f32>) -> Self {
        Self { path, embedding }
    }

    /// Detects faces in the image at `path` and captures the embedding of
    /// the face chosen by `selector`. Zero detected faces is fatal.
    pub fn extract(
        path: &Path,
        reader: &dyn ImageReader,
        analyzer: &mut dyn FaceAnalyzer,
        selector: FaceSelector,
    ) -> Result<Self, SourceFaceError> {
        let frame = reader.read(path).map_err(|e| SourceFaceError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let faces = analyzer
            .analyze(&frame)
            .map_err(|e| SourceFaceError::Analyze {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        let chosen = selector(&faces).ok_or_else(|| SourceFaceError::NoFace(path.to_path_buf()))?;
        Ok(Self {
            path: path.to_path_buf(),
            embedding: faces[chosen].embedding.clone(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn embedding(&self) -> &[f32] {
        &self.embedding
    }
}
