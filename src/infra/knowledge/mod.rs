#[cfg(test)]
pub mod in_memory;
pub mod postgres_store;

#[cfg(test)]
pub use in_memory::InMemoryKnowledgeStore;
pub use postgres_store::PgKnowledgeStore;
