pub mod error;
#[cfg(test)]
pub mod memory_user_repo;
pub mod user_repo;

pub use user_repo::{PgUserStore, UserRow, UserStore};
