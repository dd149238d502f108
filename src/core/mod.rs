pub mod entity;
pub mod error;
pub mod filter;
pub mod query;
pub mod repository;
pub mod session;
pub mod unit_of_work;

pub use entity::{Entity, Expand};
pub use error::{AppError, AppResult};
pub use filter::Filter;
pub use query::{PagedResponse, QueryResult, QuerySpec};
pub use repository::Repository;
pub use session::{DbSession, SqlValue};
pub use unit_of_work::UnitOfWork;
