pub mod postgres_log_store;

pub use postgres_log_store::PgMessageLogStore;
