/// Compile and link diagnostics produced by the program builder

use std::fmt;

use crate::program::shader_source::{ShaderStage, StageMask};

/// Default bound on a diagnostic's log text, in characters
pub const DEFAULT_MAX_LOG_LEN: usize = 512;

/// A structured compile/link failure report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A required stage was absent from the input; nothing was compiled
    MissingStage {
        /// Every required stage that was absent
        missing: StageMask,
    },

    /// One stage failed to compile
    CompileFailed {
        stage: ShaderStage,
        /// Label of the offending source, if it had one
        label: Option<String>,
        /// Backend info log, truncated
        log: String,
    },

    /// Every stage compiled but the program failed to link
    LinkFailed {
        /// Backend info log, truncated
        log: String,
    },
}

impl Diagnostic {
    /// Stage the diagnostic is about (compile failures only)
    pub fn stage(&self) -> Option<ShaderStage> {
        match self {
            Diagnostic::CompileFailed { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Backend log text, if any
    pub fn log(&self) -> Option<&str> {
        match self {
            Diagnostic::CompileFailed { log, .. } | Diagnostic::LinkFailed { log } => Some(log),
            Diagnostic::MissingStage { .. } => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingStage { missing } => {
                write!(f, "ERROR::SHADER::PROGRAM::MISSING_STAGE\nmissing: {}", missing)
            }
            Diagnostic::CompileFailed { stage, label: Some(label), log } => {
                write!(f, "ERROR::SHADER::{}::COMPILATION_FAILED ({})\n{}", stage, label, log)
            }
            Diagnostic::CompileFailed { stage, label: None, log } => {
                write!(f, "ERROR::SHADER::{}::COMPILATION_FAILED\n{}", stage, log)
            }
            Diagnostic::LinkFailed { log } => {
                write!(f, "ERROR::SHADER::PROGRAM::LINKING_FAILED\n{}", log)
            }
        }
    }
}

/// Normalize a backend info log
///
/// Strips the trailing NULs and whitespace GL drivers leave in info logs, then
/// keeps at most `max_chars` characters (never splitting a UTF-8 sequence).
pub fn truncate_log(log: &str, max_chars: usize) -> String {
    let trimmed = log.trim_end_matches(|c: char| c == '\0' || c.is_whitespace());
    match trimmed.char_indices().nth(max_chars) {
        Some((end, _)) => trimmed[..end].to_string(),
        None => trimmed.to_string(),
    }
}

/// Failure value of [`ShaderProgramBuilder::build`](crate::program::ShaderProgramBuilder::build)
///
/// Always holds at least one diagnostic. When it is returned, no backend
/// object created during the build is still alive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildError {
    diagnostics: Vec<Diagnostic>,
}

impl BuildError {
    pub(crate) fn new(diagnostics: Vec<Diagnostic>) -> Self {
        debug_assert!(!diagnostics.is_empty());
        Self { diagnostics }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shader program build failed ({} diagnostic(s))", self.diagnostics.len())?;
        for diagnostic in &self.diagnostics {
            write!(f, "\n{}", diagnostic)?;
        }
        Ok(())
    }
}

impl std::error::Error for BuildError {}

#[cfg(test)]
#[path = "diagnostic_tests.rs"]
mod tests;
