//! Filesystem utilities for quill.
//!
//! Artifacts are written with write-temp-then-rename so an interrupted stage
//! never leaves a half-written file for the next stage to pick up.

pub mod atomic;

pub use atomic::atomic_write_file;
