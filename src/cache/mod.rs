//! Cache
//!
//! Este módulo contiene los sistemas de cache: Redis para producción y un
//! cache en proceso con la misma interfaz.

pub mod cache_config;
pub mod memory_cache;
pub mod redis_client;

use anyhow::Result;
use async_trait::async_trait;

pub use cache_config::CacheConfig;
pub use memory_cache::MemoryCache;
pub use redis_client::RedisClient;

/// Operaciones de cache sobre valores serializados
#[async_trait]
pub trait CacheOperations: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: String, ttl: u64) -> Result<()>;

    async fn delete(&self, key: &str) -> Result<()>;
}
