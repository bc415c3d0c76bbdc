//! Wire-format types for the v1 API. Field names serialize as camelCase;
//! enum values stay snake_case (e.g. `"on_leave"`).

pub mod chat;
pub mod conversations;
pub mod documents;
pub mod leave;
pub mod users;
