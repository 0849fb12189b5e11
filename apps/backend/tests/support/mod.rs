#![allow(dead_code, unused_imports)]


// Re-export only what current tests actually import
pub use app_builder::create_test_app;
pub use test_state::{build_test_state, resolve_test_db_kind};
