/// Backend module - the graphics API collaborator the program builder drives

pub mod shader_backend;

pub use shader_backend::*;

// Mock backend for tests (no GPU required)
#[cfg(test)]
pub mod mock_backend;
