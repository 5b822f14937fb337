// Service exports
pub mod cache;
pub mod document_store;
pub mod gateway;
pub mod memory;

pub use cache::{CachedGateway, CacheKey};
pub use document_store::{DocumentStoreClient, StoreCollections};
pub use gateway::{GatewayError, LikeStore, ProfileGateway};
pub use memory::InMemoryStore;
