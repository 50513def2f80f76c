//! Domain core of the todo service: value objects, entities, repository
//! contracts, use cases and the auth primitives they rely on.
//!
//! Nothing here knows about HTTP or SQL. Storage is reached only through the
//! traits in [`repository`]; [`memory::MemoryStore`] is the in-process
//! implementation.

pub mod associations;
pub mod auth;
pub mod clock;
pub mod entities;
pub mod error;
pub mod ids;
pub mod memory;
pub mod ownership;
pub mod repository;
pub mod types;
pub mod usecases;
pub mod values;
