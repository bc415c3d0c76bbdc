pub mod chat;
pub mod conversations;
pub mod documents;
pub mod health;
pub mod leave;
pub mod users;

pub use health::health_check;
