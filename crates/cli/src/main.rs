use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use swapforge_core::detection::domain::detected_face::largest_face;
use swapforge_core::detection::domain::source_face::SourceFace;
use swapforge_core::detection::infrastructure::onnx_face_analyzer::OnnxFaceAnalyzer;
use swapforge_core::imaging::infrastructure::image_file_reader::ImageFileReader;
use swapforge_core::imaging::infrastructure::image_file_writer::ImageFileWriter;
use swapforge_core::pipeline::batch_logger::ConsoleBatchLogger;
use swapforge_core::pipeline::engine::{Engine, EngineKind};
use swapforge_core::pipeline::swap_batch_use_case::SwapBatchUseCase;
use swapforge_core::remote::infrastructure::replicate_client::ReplicateSwapClient;
use swapforge_core::shared::constants::{
    DETECTOR_MODEL_NAME, DETECTOR_MODEL_URL, EMBEDDING_MODEL_NAME, EMBEDDING_MODEL_URL,
    SWAPPER_MODEL_NAME, SWAPPER_MODEL_URL,
};
use swapforge_core::shared::model_resolver;
use swapforge_core::swapping::infrastructure::onnx_inswapper::OnnxInswapper;

/// Batch face swapping: one source identity onto a directory of images.
#[derive(Parser)]
#[command(name = "swapforge")]
struct Cli {
    /// Source face image (the identity to transplant).
    source: PathBuf,

    /// Directory of target images (.jpg/.jpeg/.png/.webp).
    target_dir: PathBuf,

    /// Output directory (created if missing).
    output_dir: PathBuf,

    /// Processing engine: local or remote.
    #[arg(long, default_value = "local")]
    engine: String,

    /// Output naming template with an {original} stem placeholder
    /// (default: swap_NNN_<stem>.png).
    #[arg(long)]
    naming: Option<String>,

    /// Face detection confidence threshold (0.0-1.0, local engine only).
    #[arg(long, default_value = "0.25")]
    confidence: f64,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let kind: EngineKind = cli.engine.parse()?;
    let engine = match kind {
        EngineKind::Local => build_local_engine(&cli.source, cli.confidence)?,
        EngineKind::Remote => build_remote_engine(&cli.source)?,
    };

    let mut use_case = SwapBatchUseCase::new(
        engine,
        Box::new(ImageFileReader::new()),
        Box::new(ImageFileWriter::new()),
        &cli.output_dir,
    )?;

    let results = use_case.process_batch(
        &cli.target_dir,
        &cli.output_dir,
        cli.naming.as_deref(),
        &mut ConsoleBatchLogger,
    )?;
    log::info!(
        "{} output file(s) written to {}",
        results.len(),
        cli.output_dir.display()
    );

    Ok(())
}

fn build_local_engine(source: &Path, confidence: f64) -> Result<Engine, Box<dyn std::error::Error>> {
    let detector_path = resolve_model(DETECTOR_MODEL_NAME, DETECTOR_MODEL_URL)?;
    let embedder_path = resolve_model(EMBEDDING_MODEL_NAME, EMBEDDING_MODEL_URL)?;
    let swapper_path = resolve_model(SWAPPER_MODEL_NAME, SWAPPER_MODEL_URL)?;

    let mut analyzer = OnnxFaceAnalyzer::new(&detector_path, &embedder_path, confidence)?;
    let swapper = OnnxInswapper::new(&swapper_path)?;

    let reader = ImageFileReader::new();
    let source_face = SourceFace::extract(source, &reader, &mut analyzer, largest_face)?;
    log::info!("Source identity extracted from {}", source.display());

    Ok(Engine::local(
        Box::new(analyzer),
        Box::new(swapper),
        source_face,
    ))
}

fn build_remote_engine(source: &Path) -> Result<Engine, Box<dyn std::error::Error>> {
    let client = ReplicateSwapClient::from_env()?;
    Ok(Engine::remote(Box::new(client), source)?)
}

fn resolve_model(name: &str, url: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    log::info!("Resolving model: {name}");
    let path = model_resolver::resolve(name, url, None, Some(Box::new(download_progress)))?;
    eprintln!();
    Ok(path)
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = downloaded as f64 / total as f64 * 100.0;
        eprint!("\rDownloading model: {pct:.0}%");
    } else {
        eprint!("\rDownloading model: {downloaded} bytes");
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.source.exists() {
        return Err(format!("Source image not found: {}", cli.source.display()).into());
    }
    if !cli.target_dir.is_dir() {
        return Err(format!("Target directory not found: {}", cli.target_dir.display()).into());
    }
    if !(0.0..=1.0).contains(&cli.confidence) {
        return Err("--confidence must be between 0.0 and 1.0".into());
    }
    Ok(())
}
