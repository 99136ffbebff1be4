/// Program module - shader sources, the program builder and linked programs

pub mod shader_source;
pub mod diagnostic;
pub mod uniform;
pub mod builder;
pub mod linked_program;

pub use shader_source::*;
pub use diagnostic::*;
pub use uniform::*;
pub use builder::*;
pub use linked_program::*;
