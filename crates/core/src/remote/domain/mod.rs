pub mod swap_service;
