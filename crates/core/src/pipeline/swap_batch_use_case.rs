use std::fs;
use std::path::{Path, PathBuf};

use crate::detection::domain::face_analyzer::FaceAnalyzer;
use crate::detection::domain::source_face::SourceFace;
use crate::imaging::domain::image_reader::ImageReader;
use crate::imaging::domain::image_writer::ImageWriter;
use crate::pipeline::batch_logger::BatchLogger;
use crate::pipeline::engine::{Engine, InitError};
use crate::pipeline::output_namer::OutputNamer;
use crate::pipeline::target_scanner::scan_targets;
use crate::remote::domain::swap_service::SwapService;
use crate::swapping::domain::face_swapper::FaceSwapper;

/// Aggregate batch outcome. Invariant: `succeeded + failed == total`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Batch face-swap orchestration: one source identity composited onto
/// every image in a target directory.
///
/// Per-item failures are absorbed into the stats and logger; they never
/// abort the batch. Construction failures (no face in source, missing
/// credential, unknown engine) surface before any batch work. Processing
/// is strictly sequential.
pub struct SwapBatchUseCase {
    engine: Engine,
    reader: Box<dyn ImageReader>,
    writer: Box<dyn ImageWriter>,
    stats: BatchStats,
}

impl SwapBatchUseCase {
    /// Creates the output directory (and parents) if missing and zeroes
    /// the statistics.
    pub fn new(
        engine: Engine,
        reader: Box<dyn ImageReader>,
        writer: Box<dyn ImageWriter>,
        output_dir: &Path,
    ) -> Result<Self, InitError> {
        fs::create_dir_all(output_dir).map_err(|e| InitError::OutputDir {
            path: output_dir.to_path_buf(),
            source: e,
        })?;
        Ok(Self {
            engine,
            reader,
            writer,
            stats: BatchStats::default(),
        })
    }

    /// Statistics of the most recent `process_batch` call.
    pub fn stats(&self) -> BatchStats {
        self.stats
    }

    /// Process every accepted image in `target_dir`, writing one output
    /// per target into `output_dir` (created if missing — the operation is
    /// re-parameterizable per call). Returns the successfully written
    /// paths; per-item failure detail goes to the logger only.
    ///
    /// A partially failed batch is not an error. An empty target
    /// directory yields an empty result and stats `(0, 0, 0)`.
    pub fn process_batch(
        &mut self,
        target_dir: &Path,
        output_dir: &Path,
        naming: Option<&str>,
        logger: &mut dyn BatchLogger,
    ) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
        let targets = scan_targets(target_dir)?;
        fs::create_dir_all(output_dir)?;

        let namer = OutputNamer::new(naming);
        let total = targets.len();
        self.stats = BatchStats {
            total,
            succeeded: 0,
            failed: 0,
        };
        logger.batch_started(&self.engine.kind().to_string(), total);

        let mut results = Vec::new();
        for (i, target) in targets.iter().enumerate() {
            let index = i + 1;
            let name = target
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let stem = target
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            logger.item_started(index, total, &name);

            let out_path = output_dir.join(namer.name_for(index, &stem));
            let outcome = match &mut self.engine {
                Engine::Local {
                    analyzer,
                    swapper,
                    source,
                } => process_local(
                    analyzer.as_mut(),
                    swapper.as_mut(),
                    source,
                    self.reader.as_ref(),
                    self.writer.as_ref(),
                    target,
                    &out_path,
                ),
                Engine::Remote {
                    service,
                    source_bytes,
                } => process_remote(service.as_ref(), source_bytes, target, &out_path),
            };

            match outcome {
                Ok(()) => {
                    self.stats.succeeded += 1;
                    logger.item_finished(index, total, &name, Ok(&out_path));
                    results.push(out_path);
                }
                Err(e) => {
                    self.stats.failed += 1;
                    let reason = e.to_string();
                    logger.item_finished(index, total, &name, Err(&reason));
                }
            }
        }

        logger.summary(&self.stats);
        Ok(results)
    }
}

/// On-device path: read → detect → swap every detected face sequentially
/// over the same working frame → write.
fn process_local(
    analyzer: &mut dyn FaceAnalyzer,
    swapper: &mut dyn FaceSwapper,
    source: &SourceFace,
    reader: &dyn ImageReader,
    writer: &dyn ImageWriter,
    target: &Path,
    out_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut frame = reader.read(target)?;
    let faces = analyzer.analyze(&frame)?;
    if faces.is_empty() {
        return Err("no face detected in target".into());
    }
    for face in &faces {
        swapper.swap(&mut frame, face, source.embedding())?;
    }
    writer.write(out_path, &frame)?;
    Ok(())
}

/// Service-backed path: submit source + target bytes, take the first
/// returned URL, download, write the bytes verbatim.
fn process_remote(
    service: &dyn SwapService,
    source_bytes: &[u8],
    target: &Path,
    out_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let target_bytes = fs::read(target)?;
    let urls = service.submit(source_bytes, &target_bytes)?;
    let url = urls.first().ok_or("service returned no output URL")?;
    let bytes = service.fetch(url)?;
    fs::write(out_path, bytes)?;
    Ok(())
}
