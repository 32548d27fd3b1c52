mod items;
mod schema;
mod types;

pub use schema::Database;
pub use types::DatabaseError;
