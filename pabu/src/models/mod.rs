mod common;
mod conversation;
mod document;
mod leave;
mod user;

pub use common::*;
pub use conversation::*;
pub use document::*;
pub use leave::*;
pub use user::*;
