//! quicklink - a small URL shortener service
//!
//! Short codes map to target URLs and carry a click counter. State lives in
//! memory and is written through to two JSON files on every change.
//!
//! # Features
//! - **server**: HTTP server mode (default)
//! - **cli**: offline commands against the data files
//!
//! # Architecture
//! - `utils`: code generation and input validation
//! - `storage`: the `LinkStore` trait and the JSON file store
//! - `services`: the `LinkRegistry`
//! - `api`: HTTP handlers and middleware
//! - `config`: configuration loading
//! - `runtime`: startup, shutdown and execution modes
//! - `system`: logging

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
