/*!
# ShaderKit

Backend-agnostic shader program building.

This crate turns shader-stage sources into linked programs through a
[`ShaderBackend`](backend::ShaderBackend) trait, reporting every compile or
link failure as a structured diagnostic. Backend implementations (OpenGL,
...) live in their own crates and are handed to the builder explicitly: there
is no ambient "current context".

## Architecture

- **ShaderBackend**: stage/program primitives of a graphics API
- **ShaderSource**: one stage's source text
- **ShaderProgramBuilder**: compile, link, diagnose, clean up
- **LinkedProgram**: caller-owned handle to a linked program
- **Diagnostic / BuildError**: itemized failure reports
*/

pub mod error;
pub mod log;
pub mod backend;
pub mod program;

// Main shaderkit namespace module
pub mod shaderkit {
    // Error types
    pub use crate::error::{ShaderKitError, ShaderKitResult};

    // Backend trait
    pub use crate::backend::ShaderBackend;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{DefaultLogger, Log, LogEntry, LogSeverity, Logger};
    }

    // Program sub-module with sources, builder and diagnostics
    pub mod program {
        pub use crate::program::*;
    }
}

// Re-export math library at crate root
pub use glam;
