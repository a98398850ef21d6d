pub mod replicate_client;
