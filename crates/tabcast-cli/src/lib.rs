//! Shared CLI infrastructure.
//!
//! The binary lives in `main.rs`; this library exposes the logging
//! bootstrap so it can be reused and tested independently.

pub mod logging;
