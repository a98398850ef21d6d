pub mod batch_logger;
pub mod engine;
pub mod output_namer;
pub mod swap_batch_use_case;
pub mod target_scanner;
