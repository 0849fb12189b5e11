//! Adapters for external dependencies.

pub mod todos_sea;
