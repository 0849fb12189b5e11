pub mod form_body;
pub mod page_query;
pub mod request_txn;
pub mod todo_id;

pub use form_body::FormBody;
pub use page_query::PageQuery;
pub use request_txn::RequestTxn;
pub use todo_id::TodoId;
