//! Domain layer: the `Todo` record, form binding and validation rules, and
//! pagination math. Nothing here touches the database or HTTP.

pub mod pagination;
pub mod todo;
pub mod validation;


pub use pagination::{Page, PageParams, Pagination, Paginator};
pub use todo::{Rejected, Todo, TodoChanges, TodoForm, TodoParams};
pub use validation::ValidationErrors;
