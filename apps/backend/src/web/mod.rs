//! Web boundary helpers shared by middleware, extractors and views.

pub mod flash;
pub mod format;
pub mod trace_ctx;

pub use format::Format;
