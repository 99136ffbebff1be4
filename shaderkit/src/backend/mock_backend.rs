/// Mock ShaderBackend for unit tests (no GPU required)
///
/// Hands out slot-map keys as handles, records every call in order and
/// tracks which objects are still alive, so tests can check the builder's
/// cleanup guarantees by counting.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

use crate::backend::ShaderBackend;
use crate::error::{ShaderKitError, ShaderKitResult};
use crate::program::{ShaderStage, UniformValue};

new_key_type! {
    pub struct MockStageKey;
    pub struct MockProgramKey;
}

/// Default source marker that makes a compile fail
pub const MOCK_SYNTAX_ERROR: &str = "syntax-error";

/// One recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    CreateStage(ShaderStage),
    CompileStage(ShaderStage),
    CreateProgram,
    AttachStage(ShaderStage),
    DetachStage(ShaderStage),
    LinkProgram,
    DeleteStage(ShaderStage),
    DeleteProgram,
    UseProgram(Option<MockProgramKey>),
    SetUniform(String),
}

// ============================================================================
// Mock objects
// ============================================================================

#[derive(Debug)]
struct MockStage {
    stage: ShaderStage,
    source: String,
    compiled: bool,
    log: String,
}

#[derive(Debug, Default)]
struct MockProgram {
    attached: Vec<MockStageKey>,
    linked: bool,
    log: String,
    uniforms: Vec<String>,
}

/// Location of a uniform in a mock program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockUniformLocation {
    pub program: MockProgramKey,
    pub name: String,
}

// ============================================================================
// Mock Backend
// ============================================================================

/// Mock backend that tracks created objects without a GPU
#[derive(Debug)]
pub struct MockBackend {
    stages: SlotMap<MockStageKey, MockStage>,
    programs: SlotMap<MockProgramKey, MockProgram>,
    calls: Vec<BackendCall>,
    bound: Option<MockProgramKey>,
    uniforms: FxHashMap<(MockProgramKey, String), UniformValue>,
    error_marker: String,
    compile_log: Option<String>,
    link_failure: Option<String>,
    fail_create_stage: bool,
    fail_create_program: bool,
    invalid_deletes: usize,
}

impl MockBackend {
    /// Create a mock backend where every source compiles unless it contains
    /// [`MOCK_SYNTAX_ERROR`], and every program links
    pub fn new() -> Self {
        Self {
            stages: SlotMap::with_key(),
            programs: SlotMap::with_key(),
            calls: Vec::new(),
            bound: None,
            uniforms: FxHashMap::default(),
            error_marker: MOCK_SYNTAX_ERROR.to_string(),
            compile_log: None,
            link_failure: None,
            fail_create_stage: false,
            fail_create_program: false,
            invalid_deletes: 0,
        }
    }

    /// Fail compiles of sources containing `marker` instead of `MOCK_SYNTAX_ERROR`
    pub fn with_error_marker(mut self, marker: impl Into<String>) -> Self {
        self.error_marker = marker.into();
        self
    }

    /// Replace the info log reported for failed compiles
    pub fn with_compile_log(mut self, log: impl Into<String>) -> Self {
        self.compile_log = Some(log.into());
        self
    }

    /// Make every link fail with `log`
    pub fn fail_link(mut self, log: impl Into<String>) -> Self {
        self.link_failure = Some(log.into());
        self
    }

    /// Make `create_stage` return an error
    pub fn fail_create_stage(mut self) -> Self {
        self.fail_create_stage = true;
        self
    }

    /// Make `create_program` return an error
    pub fn fail_create_program(mut self) -> Self {
        self.fail_create_program = true;
        self
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// Number of recorded calls matching `pred`
    pub fn count_calls(&self, pred: impl Fn(&BackendCall) -> bool) -> usize {
        self.calls.iter().filter(|call| pred(call)).count()
    }

    pub fn live_stages(&self) -> usize {
        self.stages.len()
    }

    pub fn live_programs(&self) -> usize {
        self.programs.len()
    }

    /// Deletes of handles that were unknown or already deleted
    pub fn invalid_deletes(&self) -> usize {
        self.invalid_deletes
    }

    pub fn bound_program(&self) -> Option<MockProgramKey> {
        self.bound
    }

    /// Last value written to `name` in `program`
    pub fn uniform_value(&self, program: MockProgramKey, name: &str) -> Option<UniformValue> {
        self.uniforms.get(&(program, name.to_string())).copied()
    }

    fn stage_kind(&self, key: MockStageKey) -> ShaderStage {
        self.stages
            .get(key)
            .map(|stage| stage.stage)
            .unwrap_or(ShaderStage::Vertex)
    }
}

/// Names declared by `uniform <type> <name>;` lines
fn declared_uniforms(source: &str) -> impl Iterator<Item = String> + '_ {
    source.lines().filter_map(|line| {
        let mut words = line.trim().trim_end_matches(';').split_whitespace();
        match (words.next(), words.next(), words.next()) {
            (Some("uniform"), Some(_), Some(name)) => Some(name.to_string()),
            _ => None,
        }
    })
}

impl ShaderBackend for MockBackend {
    type Stage = MockStageKey;
    type Program = MockProgramKey;
    type UniformLocation = MockUniformLocation;

    fn create_stage(&mut self, stage: ShaderStage) -> ShaderKitResult<MockStageKey> {
        self.calls.push(BackendCall::CreateStage(stage));
        if self.fail_create_stage {
            return Err(ShaderKitError::BackendError(format!("cannot create {} stage", stage)));
        }
        Ok(self.stages.insert(MockStage {
            stage,
            source: String::new(),
            compiled: false,
            log: String::new(),
        }))
    }

    fn compile_stage(&mut self, stage: &MockStageKey, source: &str) {
        let kind = self.stage_kind(*stage);
        self.calls.push(BackendCall::CompileStage(kind));
        let failed = source.contains(self.error_marker.as_str());
        let log = match (&self.compile_log, failed) {
            (_, false) => String::new(),
            (Some(log), true) => log.clone(),
            (None, true) => format!("0:1(1): error: syntax error, unexpected {}\n\0", self.error_marker),
        };
        if let Some(entry) = self.stages.get_mut(*stage) {
            entry.source = source.to_string();
            entry.compiled = !failed;
            entry.log = log;
        }
    }

    fn compile_status(&mut self, stage: &MockStageKey) -> bool {
        self.stages.get(*stage).map_or(false, |entry| entry.compiled)
    }

    fn compile_log(&mut self, stage: &MockStageKey) -> String {
        self.stages
            .get(*stage)
            .map(|entry| entry.log.clone())
            .unwrap_or_default()
    }

    fn create_program(&mut self) -> ShaderKitResult<MockProgramKey> {
        self.calls.push(BackendCall::CreateProgram);
        if self.fail_create_program {
            return Err(ShaderKitError::BackendError("cannot create program".to_string()));
        }
        Ok(self.programs.insert(MockProgram::default()))
    }

    fn attach_stage(&mut self, program: &MockProgramKey, stage: &MockStageKey) {
        let kind = self.stage_kind(*stage);
        self.calls.push(BackendCall::AttachStage(kind));
        if let Some(entry) = self.programs.get_mut(*program) {
            entry.attached.push(*stage);
        }
    }

    fn detach_stage(&mut self, program: &MockProgramKey, stage: &MockStageKey) {
        let kind = self.stage_kind(*stage);
        self.calls.push(BackendCall::DetachStage(kind));
        if let Some(entry) = self.programs.get_mut(*program) {
            entry.attached.retain(|key| key != stage);
        }
    }

    fn link_program(&mut self, program: &MockProgramKey) {
        self.calls.push(BackendCall::LinkProgram);
        let Some(entry) = self.programs.get_mut(*program) else {
            return;
        };

        match &self.link_failure {
            Some(log) => {
                entry.linked = false;
                entry.log = log.clone();
                entry.uniforms.clear();
            }
            None => {
                entry.linked = true;
                entry.log.clear();
                entry.uniforms = entry
                    .attached
                    .iter()
                    .filter_map(|key| self.stages.get(*key))
                    .flat_map(|stage| declared_uniforms(&stage.source).collect::<Vec<_>>())
                    .collect();
            }
        }
    }

    fn link_status(&mut self, program: &MockProgramKey) -> bool {
        self.programs.get(*program).map_or(false, |entry| entry.linked)
    }

    fn link_log(&mut self, program: &MockProgramKey) -> String {
        self.programs
            .get(*program)
            .map(|entry| entry.log.clone())
            .unwrap_or_default()
    }

    fn delete_stage(&mut self, stage: MockStageKey) {
        let kind = self.stage_kind(stage);
        self.calls.push(BackendCall::DeleteStage(kind));
        if self.stages.remove(stage).is_none() {
            self.invalid_deletes += 1;
        }
    }

    fn delete_program(&mut self, program: MockProgramKey) {
        self.calls.push(BackendCall::DeleteProgram);
        if self.programs.remove(program).is_none() {
            self.invalid_deletes += 1;
        }
        if self.bound == Some(program) {
            self.bound = None;
        }
        self.uniforms.retain(|(key, _), _| *key != program);
    }

    fn use_program(&mut self, program: Option<&MockProgramKey>) {
        self.calls.push(BackendCall::UseProgram(program.copied()));
        self.bound = program.copied();
    }

    fn uniform_location(&mut self, program: &MockProgramKey, name: &str) -> Option<MockUniformLocation> {
        let entry = self.programs.get(*program)?;
        if entry.linked && entry.uniforms.iter().any(|uniform| uniform == name) {
            Some(MockUniformLocation {
                program: *program,
                name: name.to_string(),
            })
        } else {
            None
        }
    }

    fn set_uniform(&mut self, location: &MockUniformLocation, value: &UniformValue) {
        self.calls.push(BackendCall::SetUniform(location.name.clone()));
        // Like GL, writes only land in the program currently in use
        if self.bound == Some(location.program) {
            self.uniforms.insert((location.program, location.name.clone()), *value);
        }
    }
}

#[cfg(test)]
#[path = "mock_backend_tests.rs"]
mod tests;
