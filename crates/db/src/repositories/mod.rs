//! Postgres implementations of the core repository contracts.

pub mod category_repo;
pub mod tag_repo;
pub mod todo_repo;
pub mod user_repo;

pub use category_repo::PgCategoryRepo;
pub use tag_repo::PgTagRepo;
pub use todo_repo::PgTodoRepo;
pub use user_repo::PgUserRepo;
