/// GlBackend - OpenGL implementation of ShaderBackend

use std::ffi::c_void;
use std::rc::Rc;

use glow::HasContext;
use shaderkit::shaderkit::program::{ShaderStage, UniformValue};
use shaderkit::shaderkit::{ShaderBackend, ShaderKitResult};
use shaderkit::{shaderkit_err, shaderkit_info};

const LOG_SOURCE: &str = "shaderkit::gl";

/// GL shader object type for a stage
pub fn gl_shader_type(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        ShaderStage::Geometry => glow::GEOMETRY_SHADER,
        ShaderStage::Compute => glow::COMPUTE_SHADER,
    }
}

/// OpenGL backend
///
/// Every call goes to the wrapped context, which must be current on the
/// calling thread. The context is shared with the render loop through
/// [`context`](GlBackend::context).
pub struct GlBackend {
    gl: Rc<glow::Context>,
}

impl GlBackend {
    /// Wrap an existing context
    pub fn new(gl: Rc<glow::Context>) -> Self {
        let backend = Self { gl };
        shaderkit_info!(LOG_SOURCE, "OpenGL backend ready ({})", backend.version());
        backend
    }

    /// Load GL function pointers with `loader` and wrap the resulting context
    ///
    /// # Safety
    ///
    /// A GL context must be current on the calling thread, and `loader` must
    /// return function pointers valid for that context.
    pub unsafe fn from_loader_function<F>(loader: F) -> Self
    where
        F: FnMut(&str) -> *const c_void,
    {
        let gl = unsafe { glow::Context::from_loader_function(loader) };
        Self::new(Rc::new(gl))
    }

    /// Shared handle to the GL context
    pub fn context(&self) -> &Rc<glow::Context> {
        &self.gl
    }

    /// Driver version string (`GL_VERSION`)
    pub fn version(&self) -> String {
        unsafe { self.gl.get_parameter_string(glow::VERSION) }
    }
}

impl ShaderBackend for GlBackend {
    type Stage = glow::Shader;
    type Program = glow::Program;
    type UniformLocation = glow::UniformLocation;

    fn create_stage(&mut self, stage: ShaderStage) -> ShaderKitResult<glow::Shader> {
        let shader = unsafe { self.gl.create_shader(gl_shader_type(stage)) };
        shader.map_err(|e| shaderkit_err!(LOG_SOURCE, "glCreateShader({}) failed: {}", stage, e))
    }

    fn compile_stage(&mut self, stage: &glow::Shader, source: &str) {
        unsafe {
            self.gl.shader_source(*stage, source);
            self.gl.compile_shader(*stage);
        }
    }

    fn compile_status(&mut self, stage: &glow::Shader) -> bool {
        unsafe { self.gl.get_shader_compile_status(*stage) }
    }

    fn compile_log(&mut self, stage: &glow::Shader) -> String {
        unsafe { self.gl.get_shader_info_log(*stage) }
    }

    fn create_program(&mut self) -> ShaderKitResult<glow::Program> {
        let program = unsafe { self.gl.create_program() };
        program.map_err(|e| shaderkit_err!(LOG_SOURCE, "glCreateProgram failed: {}", e))
    }

    fn attach_stage(&mut self, program: &glow::Program, stage: &glow::Shader) {
        unsafe { self.gl.attach_shader(*program, *stage) }
    }

    fn detach_stage(&mut self, program: &glow::Program, stage: &glow::Shader) {
        unsafe { self.gl.detach_shader(*program, *stage) }
    }

    fn link_program(&mut self, program: &glow::Program) {
        unsafe { self.gl.link_program(*program) }
    }

    fn link_status(&mut self, program: &glow::Program) -> bool {
        unsafe { self.gl.get_program_link_status(*program) }
    }

    fn link_log(&mut self, program: &glow::Program) -> String {
        unsafe { self.gl.get_program_info_log(*program) }
    }

    fn delete_stage(&mut self, stage: glow::Shader) {
        unsafe { self.gl.delete_shader(stage) }
    }

    fn delete_program(&mut self, program: glow::Program) {
        unsafe { self.gl.delete_program(program) }
    }

    fn use_program(&mut self, program: Option<&glow::Program>) {
        unsafe { self.gl.use_program(program.copied()) }
    }

    fn uniform_location(&mut self, program: &glow::Program, name: &str) -> Option<glow::UniformLocation> {
        unsafe { self.gl.get_uniform_location(*program, name) }
    }

    fn set_uniform(&mut self, location: &glow::UniformLocation, value: &UniformValue) {
        let location = Some(location);
        unsafe {
            match value {
                UniformValue::Bool(v) => self.gl.uniform_1_i32(location, i32::from(*v)),
                UniformValue::Int(v) => self.gl.uniform_1_i32(location, *v),
                UniformValue::Float(v) => self.gl.uniform_1_f32(location, *v),
                UniformValue::Vec2(v) => self.gl.uniform_2_f32(location, v.x, v.y),
                UniformValue::Vec3(v) => self.gl.uniform_3_f32(location, v.x, v.y, v.z),
                UniformValue::Vec4(v) => self.gl.uniform_4_f32(location, v.x, v.y, v.z, v.w),
                UniformValue::Mat4(m) => {
                    self.gl.uniform_matrix_4_f32_slice(location, false, &m.to_cols_array())
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "gl_backend_tests.rs"]
mod tests;
