//! Link store implementations.
//!
//! - [`RedisLinkRepository`] - Redis (or Valkey) via `SET NX EX`
//! - [`MemoryLinkRepository`] - In-process map, used when no Redis is configured

mod memory_link_repository;
mod redis_link_repository;

pub use memory_link_repository::MemoryLinkRepository;
pub use redis_link_repository::RedisLinkRepository;
