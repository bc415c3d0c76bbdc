pub mod assembler;

pub use assembler::{ContextAssembler, ContextBundle, CurrentLeave, TeamMember};
