pub mod config;
pub mod engine;
pub mod export;
pub mod filter;
pub mod models;
pub mod receipts;
pub mod service;
pub mod stats;
pub mod storage;
pub mod types;
