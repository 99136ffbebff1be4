/// LinkedProgram - caller-owned handle to a successfully linked program

use std::fmt;

use glam::{Mat4, Vec4};

use crate::backend::ShaderBackend;
use crate::error::{ShaderKitError, ShaderKitResult};
use crate::program::shader_source::StageMask;
use crate::program::uniform::UniformValue;

/// A complete, linked program
///
/// Returned by [`ShaderProgramBuilder::build`](crate::program::ShaderProgramBuilder::build).
/// The compiled stages it was made from are already released. The program
/// itself belongs to the caller and must be handed back with
/// [`release`](LinkedProgram::release); the handle does not know its backend,
/// so dropping it leaks the backend object.
#[must_use = "a LinkedProgram must be released with `LinkedProgram::release`"]
pub struct LinkedProgram<B: ShaderBackend> {
    handle: B::Program,
    stages: StageMask,
    label: Option<String>,
}

impl<B: ShaderBackend> LinkedProgram<B> {
    pub(crate) fn new(handle: B::Program, stages: StageMask, label: Option<String>) -> Self {
        Self { handle, stages, label }
    }

    /// Raw backend handle
    pub fn handle(&self) -> &B::Program {
        &self.handle
    }

    /// Stages the program was linked from
    pub fn stages(&self) -> StageMask {
        self.stages
    }

    /// Labels of the sources it was built from, joined with `+`
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Use this program for subsequent draw calls
    pub fn bind(&self, backend: &mut B) {
        backend.use_program(Some(&self.handle));
    }

    /// Stop using any program
    pub fn unbind(backend: &mut B) {
        backend.use_program(None);
    }

    /// Location of the active uniform `name`
    ///
    /// # Errors
    ///
    /// Returns `ShaderKitError::InvalidResource` if the program has no active uniform
    /// with that name (misspelled, or optimized out by the driver).
    pub fn uniform_location(&self, backend: &mut B, name: &str) -> ShaderKitResult<B::UniformLocation> {
        backend.uniform_location(&self.handle, name).ok_or_else(|| {
            ShaderKitError::InvalidResource(format!(
                "uniform '{}' is not active in program {}",
                name,
                self.label.as_deref().unwrap_or("<unlabelled>")
            ))
        })
    }

    /// Bind the program and write one uniform
    pub fn set_uniform(&self, backend: &mut B, name: &str, value: impl Into<UniformValue>) -> ShaderKitResult<()> {
        let location = self.uniform_location(backend, name)?;
        self.bind(backend);
        backend.set_uniform(&location, &value.into());
        Ok(())
    }

    pub fn set_bool(&self, backend: &mut B, name: &str, value: bool) -> ShaderKitResult<()> {
        self.set_uniform(backend, name, value)
    }

    /// Also used to assign a texture unit to a sampler
    pub fn set_int(&self, backend: &mut B, name: &str, value: i32) -> ShaderKitResult<()> {
        self.set_uniform(backend, name, value)
    }

    pub fn set_float(&self, backend: &mut B, name: &str, value: f32) -> ShaderKitResult<()> {
        self.set_uniform(backend, name, value)
    }

    pub fn set_vec4(&self, backend: &mut B, name: &str, value: Vec4) -> ShaderKitResult<()> {
        self.set_uniform(backend, name, value)
    }

    pub fn set_mat4(&self, backend: &mut B, name: &str, value: Mat4) -> ShaderKitResult<()> {
        self.set_uniform(backend, name, value)
    }

    /// Delete the program
    pub fn release(self, backend: &mut B) {
        backend.delete_program(self.handle);
    }
}

impl<B: ShaderBackend> fmt::Debug for LinkedProgram<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedProgram")
            .field("handle", &self.handle)
            .field("stages", &self.stages)
            .field("label", &self.label)
            .finish()
    }
}

#[cfg(test)]
#[path = "linked_program_tests.rs"]
mod tests;
