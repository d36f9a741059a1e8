pub mod schema;
pub mod snapshot_repo;
pub mod contact_repo;
pub mod chat_repo;
