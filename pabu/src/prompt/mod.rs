pub mod builder;

pub use builder::PromptBuilder;
