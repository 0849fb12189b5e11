pub mod method_override;
pub mod request_trace;
pub mod structured_logger;
pub mod trace_span;
pub mod txn;

pub use method_override::MethodOverride;
pub use request_trace::{RequestTrace, TraceId};
pub use structured_logger::StructuredLogger;
pub use trace_span::TraceSpan;
pub use txn::TxnMiddleware;
