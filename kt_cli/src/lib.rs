//! Internal modules for the king-of-the-table terminal front-end.
//!
//! This library provides command parsing, configuration, rendering and the
//! session that ties the engine to its snapshot store. It is used by the
//! kt_cli binary.

pub mod commands;
pub mod config;
pub mod render;
pub mod session;
