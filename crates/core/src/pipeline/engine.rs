use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use crate::detection::domain::face_analyzer::FaceAnalyzer;
use crate::detection::domain::source_face::{SourceFace, SourceFaceError};
use crate::remote::domain::swap_service::SwapService;
use crate::remote::infrastructure::replicate_client::RemoteClientError;
use crate::shared::model_resolver::ModelResolveError;
use crate::swapping::domain::face_swapper::FaceSwapper;

/// Fatal construction-time failures. The caller must not proceed to batch
/// processing after any of these.
#[derive(Error, Debug)]
pub enum InitError {
    #[error("engine must be \"local\" or \"remote\", got {0:?}")]
    UnknownEngine(String),
    #[error(transparent)]
    SourceFace(#[from] SourceFaceError),
    #[error(transparent)]
    RemoteClient(#[from] RemoteClientError),
    #[error(transparent)]
    ModelResolve(#[from] ModelResolveError),
    #[error("failed to read source image {path}: {source}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to load {what}: {reason}")]
    Backend { what: &'static str, reason: String },
}

/// Engine selector. Parsing is case-insensitive; anything other than
/// `local` or `remote` is fatal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineKind {
    Local,
    Remote,
}

impl FromStr for EngineKind {
    type Err = InitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(EngineKind::Local),
            "remote" => Ok(EngineKind::Remote),
            _ => Err(InitError::UnknownEngine(s.to_string())),
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineKind::Local => write!(f, "local"),
            EngineKind::Remote => write!(f, "remote"),
        }
    }
}

/// Closed processing-engine variant: engine choice is explicit at
/// construction and binding for the processor's lifetime. Adding a third
/// engine means extending this enum and the per-item dispatch.
pub enum Engine {
    Local {
        analyzer: Box<dyn FaceAnalyzer>,
        swapper: Box<dyn FaceSwapper>,
        source: SourceFace,
    },
    Remote {
        service: Box<dyn SwapService>,
        source_bytes: Vec<u8>,
    },
}

impl Engine {
    pub fn local(
        analyzer: Box<dyn FaceAnalyzer>,
        swapper: Box<dyn FaceSwapper>,
        source: SourceFace,
    ) -> Self {
        Engine::Local {
            analyzer,
            swapper,
            source,
        }
    }

    /// Remote engine holds the raw source bytes, read once here: changing
    /// the file on disk afterwards does not affect the batch.
    pub fn remote(service: Box<dyn SwapService>, source_face_path: &Path) -> Result<Self, InitError> {
        let source_bytes =
            std::fs::read(source_face_path).map_err(|e| InitError::SourceRead {
                path: source_face_path.to_path_buf(),
                source: e,
            })?;
        Ok(Engine::Remote {
            service,
            source_bytes,
        })
    }

    pub fn kind(&self) -> EngineKind {
        match self {
            Engine::Local { .. } => EngineKind::Local,
            Engine::Remote { .. } => EngineKind::Remote,
        }
    }
}
