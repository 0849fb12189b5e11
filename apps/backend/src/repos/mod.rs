//! Repository layer: domain-typed persistence operations.

pub mod todos;
