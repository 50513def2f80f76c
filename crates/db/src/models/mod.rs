//! Row types for each table and their conversions to domain entities.

pub mod category;
pub mod tag;
pub mod todo;
pub mod user;
