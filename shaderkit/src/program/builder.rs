/// ShaderProgramBuilder - compiles shader stages and links them into a program

use crate::backend::ShaderBackend;
use crate::program::diagnostic::{truncate_log, BuildError, Diagnostic, DEFAULT_MAX_LOG_LEN};
use crate::program::linked_program::LinkedProgram;
use crate::program::shader_source::{ShaderSource, StageMask};
use crate::{shaderkit_debug, shaderkit_error};

const LOG_SOURCE: &str = "shaderkit::builder";

/// Builder configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderConfig {
    /// Maximum length, in characters, of the log carried by a diagnostic
    pub max_log_len: usize,
    /// Stages every build must include
    pub required_stages: StageMask,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            max_log_len: DEFAULT_MAX_LOG_LEN,
            required_stages: StageMask::GRAPHICS,
        }
    }
}

/// Backend objects created during one build
///
/// Dropping the set deletes every stage, then the program if a failed link
/// handed it back, so nothing created during a failed build outlives it.
struct PendingObjects<'a, B: ShaderBackend> {
    backend: &'a mut B,
    stages: Vec<B::Stage>,
    program: Option<B::Program>,
}

impl<'a, B: ShaderBackend> PendingObjects<'a, B> {
    fn new(backend: &'a mut B) -> Self {
        Self {
            backend,
            stages: Vec::new(),
            program: None,
        }
    }

    /// Hold `program` so it is deleted, after the stages, when `self` drops
    fn discard_program(&mut self, program: B::Program) {
        self.program = Some(program);
    }

    /// Detach the stages from the linked program and hand the program back
    ///
    /// The stages themselves are deleted when `self` drops.
    fn finish(mut self, program: B::Program) -> B::Program {
        for stage in &self.stages {
            self.backend.detach_stage(&program, stage);
        }
        program
    }
}

impl<B: ShaderBackend> Drop for PendingObjects<'_, B> {
    fn drop(&mut self) {
        for stage in self.stages.drain(..) {
            self.backend.delete_stage(stage);
        }
        if let Some(program) = self.program.take() {
            self.backend.delete_program(program);
        }
    }
}

/// Turns shader sources into one linked program, or itemized diagnostics
///
/// The builder holds no backend state: the same builder can be used against
/// any number of contexts, one call at a time per context.
///
/// # Example
///
/// ```no_run
/// use shaderkit::shaderkit::program::{ShaderProgramBuilder, ShaderSource};
/// # fn demo<B: shaderkit::shaderkit::ShaderBackend>(backend: &mut B) {
/// let sources = [
///     ShaderSource::vertex("#version 330 core\nvoid main() { gl_Position = vec4(0.0); }"),
///     ShaderSource::fragment("#version 330 core\nout vec4 c;\nvoid main() { c = vec4(1.0); }"),
/// ];
///
/// match ShaderProgramBuilder::new().build(backend, &sources) {
///     Ok(program) => {
///         program.bind(backend);
///         // ... draw ...
///         program.release(backend);
///     }
///     Err(err) => eprintln!("{}", err),
/// }
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ShaderProgramBuilder {
    config: BuilderConfig,
}

impl ShaderProgramBuilder {
    /// Builder requiring a vertex and a fragment stage, with 512-character logs
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BuilderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Compile every source, link them in input order and return the program
    ///
    /// All compile errors of a batch are reported together; linking is only
    /// attempted when every stage compiled. On failure no object created by
    /// this call is left alive in `backend`.
    ///
    /// # Errors
    ///
    /// - one `MissingStage` diagnostic, before any backend call, when a
    ///   required stage is absent or `sources` is empty
    /// - one `CompileFailed` diagnostic per stage that failed to compile
    /// - one `LinkFailed` diagnostic when linking failed
    pub fn build<B: ShaderBackend>(
        &self,
        backend: &mut B,
        sources: &[ShaderSource],
    ) -> Result<LinkedProgram<B>, BuildError> {
        let present = StageMask::of_sources(sources);
        let missing = self.config.required_stages.difference(present);
        if sources.is_empty() || !missing.is_empty() {
            return Err(self.fail(vec![Diagnostic::MissingStage { missing }]));
        }

        shaderkit_debug!(LOG_SOURCE, "Building program from {} stage(s) ({})", sources.len(), present);

        let mut pending = PendingObjects::new(backend);
        let mut diagnostics = Vec::new();

        for source in sources {
            let stage = match pending.backend.create_stage(source.stage()) {
                Ok(stage) => stage,
                Err(err) => {
                    diagnostics.push(self.compile_failed(source, &err.to_string()));
                    continue;
                }
            };

            pending.backend.compile_stage(&stage, source.source());
            if !pending.backend.compile_status(&stage) {
                let log = pending.backend.compile_log(&stage);
                diagnostics.push(self.compile_failed(source, &log));
            }
            pending.stages.push(stage);
        }

        if !diagnostics.is_empty() {
            return Err(self.fail(diagnostics));
        }

        let program = match pending.backend.create_program() {
            Ok(program) => program,
            Err(err) => return Err(self.fail(vec![self.link_failed(&err.to_string())])),
        };

        for stage in &pending.stages {
            pending.backend.attach_stage(&program, stage);
        }
        pending.backend.link_program(&program);

        if !pending.backend.link_status(&program) {
            let log = pending.backend.link_log(&program);
            pending.discard_program(program);
            return Err(self.fail(vec![self.link_failed(&log)]));
        }

        let handle = pending.finish(program);
        shaderkit_debug!(LOG_SOURCE, "Program linked ({})", present);
        Ok(LinkedProgram::new(handle, present, program_label(sources)))
    }

    fn compile_failed(&self, source: &ShaderSource, log: &str) -> Diagnostic {
        Diagnostic::CompileFailed {
            stage: source.stage(),
            label: source.label().map(str::to_string),
            log: truncate_log(log, self.config.max_log_len),
        }
    }

    fn link_failed(&self, log: &str) -> Diagnostic {
        Diagnostic::LinkFailed {
            log: truncate_log(log, self.config.max_log_len),
        }
    }

    fn fail(&self, diagnostics: Vec<Diagnostic>) -> BuildError {
        for diagnostic in &diagnostics {
            shaderkit_error!(LOG_SOURCE, "{}", diagnostic);
        }
        BuildError::new(diagnostics)
    }
}

/// Labels of the labelled sources joined with `+`
fn program_label(sources: &[ShaderSource]) -> Option<String> {
    let labels: Vec<&str> = sources.iter().filter_map(ShaderSource::label).collect();
    if labels.is_empty() {
        None
    } else {
        Some(labels.join("+"))
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
