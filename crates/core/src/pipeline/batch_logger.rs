use std::path::Path;

use crate::pipeline::swap_batch_use_case::BatchStats;

/// Cross-cutting logger for batch orchestration events.
///
/// Decouples the batch loop from a specific output mechanism (stderr,
/// GUI signals, log crate) so callers can observe per-item progress
/// without the loop knowing who is listening.
pub trait BatchLogger: Send {
    /// Called once before the first item, after enumeration.
    fn batch_started(&mut self, engine: &str, total: usize);

    /// Called when work on one item begins (1-based index).
    fn item_started(&mut self, index: usize, total: usize, name: &str);

    /// Called once per item with the final outcome: the written path on
    /// success, the failure reason otherwise.
    fn item_finished(&mut self, index: usize, total: usize, name: &str, outcome: Result<&Path, &str>);

    /// Called once after the last item.
    fn summary(&mut self, stats: &BatchStats);
}

/// Silent logger that discards all events. Used by tests and by callers
/// with their own progress reporting.
pub struct NullBatchLogger;

impl BatchLogger for NullBatchLogger {
    fn batch_started(&mut self, _engine: &str, _total: usize) {}
    fn item_started(&mut self, _index: usize, _total: usize, _name: &str) {}
    fn item_finished(
        &mut self,
        _index: usize,
        _total: usize,
        _name: &str,
        _outcome: Result<&Path, &str>,
    ) {
    }
    fn summary(&mut self, _stats: &BatchStats) {}
}

/// CLI-oriented logger: an in-progress item overwrites its own line with
/// `\r`, then the outcome commits the line. Failure reasons also go to the
/// `log` facade so `RUST_LOG` captures the detail.
pub struct ConsoleBatchLogger;

impl BatchLogger for ConsoleBatchLogger {
    fn batch_started(&mut self, engine: &str, total: usize) {
        eprintln!("{}", "=".repeat(60));
        eprintln!("  BATCH PROCESSING - ENGINE: {}", engine.to_uppercase());
        eprintln!("{}", "=".repeat(60));
        log::info!("Batch started: {total} target image(s), engine {engine}");
    }

    fn item_started(&mut self, index: usize, total: usize, name: &str) {
        eprint!("\r[{index}/{total}] {name}...");
    }

    fn item_finished(
        &mut self,
        index: usize,
        total: usize,
        name: &str,
        outcome: Result<&Path, &str>,
    ) {
        match outcome {
            Ok(path) => {
                eprintln!("\r[{index}/{total}] {name} -> OK   ");
                log::info!("{name} -> {}", path.display());
            }
            Err(reason) => {
                eprintln!("\r[{index}/{total}] {name} -> FAIL ");
                log::error!("{name}: {reason}");
            }
        }
    }

    fn summary(&mut self, stats: &BatchStats) {
        eprintln!(
            "Done. Succeeded: {} | Failed: {}",
            stats.succeeded, stats.failed
        );
        log::info!(
            "Batch finished: total {}, succeeded {}, failed {}",
            stats.total,
            stats.succeeded,
            stats.failed
        );
    }
}
