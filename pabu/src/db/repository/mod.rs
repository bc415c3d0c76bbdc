pub mod conversations;
pub mod documents;
pub mod leave;
pub mod users;

pub use conversations::ConversationRepository;
pub use documents::HrDocumentRepository;
pub use leave::LeaveRepository;
pub use users::UserRepository;
