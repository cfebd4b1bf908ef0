//! Platform abstraction layer
//!
//! Browser bindings for the UI shell. Native builds drive `Simulator`
//! directly (see the headless demo in `main.rs`).

#[cfg(target_arch = "wasm32")]
pub mod web;
