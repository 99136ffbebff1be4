/*!
# ShaderKit - OpenGL Backend

OpenGL implementation of the ShaderKit [`ShaderBackend`](::shaderkit::shaderkit::ShaderBackend) trait.

This crate drives shader and program objects through the `glow` bindings.
The GL context is passed in explicitly; making it current on the calling
thread is the windowing layer's job.
*/

mod gl_backend;

// Main shaderkit namespace module
pub mod shaderkit {
    pub use crate::gl_backend::{gl_shader_type, GlBackend};
}
