pub mod backends;
pub mod connection;
pub mod repository;
pub mod schema;
pub mod traits;

pub use backends::LibSqlBackend;
pub use connection::Database;
pub use traits::{
    ConversationStore, DatabaseBackend, HrDocumentStore, LeaveStore, UserStore,
};
