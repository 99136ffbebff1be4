/// ShaderBackend trait - stage/program primitives of a graphics API

use std::fmt::Debug;

use crate::error::ShaderKitResult;
use crate::program::{ShaderStage, UniformValue};

/// Stage and program primitives exposed by a graphics backend
///
/// A backend value stands for one rendering context. Every method takes
/// `&mut self`, so calls against a context are serialized by the borrow
/// checker; backends are not required to be `Send` because GL contexts are
/// bound to the thread that made them current.
///
/// Handles are opaque. The builder and [`LinkedProgram`](crate::program::LinkedProgram)
/// own them and hand each one back to `delete_stage`/`delete_program` exactly once.
pub trait ShaderBackend {
    /// Handle to one shader stage object
    type Stage: Debug;
    /// Handle to one program object
    type Program: Debug;
    /// Location of a uniform inside a linked program
    type UniformLocation: Debug;

    /// Create an empty stage object
    fn create_stage(&mut self, stage: ShaderStage) -> ShaderKitResult<Self::Stage>;

    /// Upload `source` to the stage object and compile it
    fn compile_stage(&mut self, stage: &Self::Stage, source: &str);

    /// Whether the last compile of `stage` succeeded
    fn compile_status(&mut self, stage: &Self::Stage) -> bool;

    /// Info log of the last compile of `stage`
    fn compile_log(&mut self, stage: &Self::Stage) -> String;

    /// Create an empty program object
    fn create_program(&mut self) -> ShaderKitResult<Self::Program>;

    fn attach_stage(&mut self, program: &Self::Program, stage: &Self::Stage);

    fn detach_stage(&mut self, program: &Self::Program, stage: &Self::Stage);

    /// Link every attached stage
    fn link_program(&mut self, program: &Self::Program);

    /// Whether the last link of `program` succeeded
    fn link_status(&mut self, program: &Self::Program) -> bool;

    /// Info log of the last link of `program`
    fn link_log(&mut self, program: &Self::Program) -> String;

    fn delete_stage(&mut self, stage: Self::Stage);

    fn delete_program(&mut self, program: Self::Program);

    /// Use `program` for subsequent draw calls (`None` unbinds)
    fn use_program(&mut self, program: Option<&Self::Program>);

    /// Location of an active uniform, or `None` if the program has no such uniform
    fn uniform_location(&mut self, program: &Self::Program, name: &str) -> Option<Self::UniformLocation>;

    /// Write a uniform of the currently used program
    fn set_uniform(&mut self, location: &Self::UniformLocation, value: &UniformValue);
}
