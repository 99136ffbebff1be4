/// Shader stages and the sources handed to the program builder

use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use bitflags::bitflags;

use crate::error::{ShaderKitError, ShaderKitResult};

/// Shader stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Fragment/Pixel shader
    Fragment,
    /// Geometry shader
    Geometry,
    /// Compute shader
    Compute,
}

impl ShaderStage {
    /// Every stage, in pipeline order
    pub const ALL: [ShaderStage; 4] = [
        ShaderStage::Vertex,
        ShaderStage::Fragment,
        ShaderStage::Geometry,
        ShaderStage::Compute,
    ];

    /// Upper-case label used in diagnostics (`VERTEX`, `FRAGMENT`, ...)
    pub fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "VERTEX",
            ShaderStage::Fragment => "FRAGMENT",
            ShaderStage::Geometry => "GEOMETRY",
            ShaderStage::Compute => "COMPUTE",
        }
    }

    /// Single-bit mask for this stage
    pub fn mask(self) -> StageMask {
        match self {
            ShaderStage::Vertex => StageMask::VERTEX,
            ShaderStage::Fragment => StageMask::FRAGMENT,
            ShaderStage::Geometry => StageMask::GEOMETRY,
            ShaderStage::Compute => StageMask::COMPUTE,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// Set of shader stages
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StageMask: u8 {
        const VERTEX = 1 << 0;
        const FRAGMENT = 1 << 1;
        const GEOMETRY = 1 << 2;
        const COMPUTE = 1 << 3;
    }
}

impl StageMask {
    /// The stages a classic rasterization program cannot link without
    pub const GRAPHICS: StageMask = StageMask::VERTEX.union(StageMask::FRAGMENT);

    /// Stages contained in the mask, in pipeline order
    pub fn stages(self) -> impl Iterator<Item = ShaderStage> {
        ShaderStage::ALL
            .into_iter()
            .filter(move |stage| self.contains(stage.mask()))
    }

    /// Mask covering every stage in `sources`
    pub fn of_sources(sources: &[ShaderSource]) -> StageMask {
        sources
            .iter()
            .fold(StageMask::empty(), |mask, source| mask | source.stage.mask())
    }
}

impl fmt::Display for StageMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.stages().map(ShaderStage::name).collect();
        if names.is_empty() {
            f.write_str("NONE")
        } else {
            f.write_str(&names.join("|"))
        }
    }
}

/// One shader stage's source text
///
/// The text is immutable and shared: cloning a source never copies the GLSL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    stage: ShaderStage,
    source: Arc<str>,
    label: Option<String>,
}

impl ShaderSource {
    /// Create a source for `stage`
    pub fn new(stage: ShaderStage, source: impl Into<Arc<str>>) -> Self {
        Self {
            stage,
            source: source.into(),
            label: None,
        }
    }

    pub fn vertex(source: impl Into<Arc<str>>) -> Self {
        Self::new(ShaderStage::Vertex, source)
    }

    pub fn fragment(source: impl Into<Arc<str>>) -> Self {
        Self::new(ShaderStage::Fragment, source)
    }

    pub fn geometry(source: impl Into<Arc<str>>) -> Self {
        Self::new(ShaderStage::Geometry, source)
    }

    pub fn compute(source: impl Into<Arc<str>>) -> Self {
        Self::new(ShaderStage::Compute, source)
    }

    /// Load a source from a GLSL file
    ///
    /// The file path becomes the source label, so diagnostics name the file.
    ///
    /// # Errors
    ///
    /// Returns `ShaderKitError::Io` if the file cannot be read as UTF-8 text.
    pub fn from_file(stage: ShaderStage, path: impl AsRef<Path>) -> ShaderKitResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| ShaderKitError::Io(format!("{}: {}", path.display(), e)))?;

        Ok(Self::new(stage, text).with_label(path.display().to_string()))
    }

    /// Attach a human-readable name (file path, material name, ...)
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

#[cfg(test)]
#[path = "shader_source_tests.rs"]
mod tests;
