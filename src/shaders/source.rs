// SPDX-License-Identifier: GPL-3.0-only

//! GLSL source loading and preprocessor define injection

use crate::constants::sources;
use crate::errors::{ShaderError, ShaderResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolves a shader source identifier to GLSL text
pub trait ShaderSourceLoader {
    fn load(&self, name: &str) -> ShaderResult<String>;
}

/// Sources compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSources;

impl ShaderSourceLoader for EmbeddedSources {
    fn load(&self, name: &str) -> ShaderResult<String> {
        let source = match name {
            sources::VERTEX => include_str!("glsl/gl_yuv2rgb_vertex.glsl"),
            sources::PIXEL_BASIC => include_str!("glsl/gl_yuv2rgb_basic.glsl"),
            sources::PIXEL_FILTER4 => include_str!("glsl/gl_yuv2rgb_filter4.glsl"),
            sources::OUTPUT => include_str!("glsl/gl_output.glsl"),
            _ => return Err(ShaderError::SourceNotFound(name.to_string())),
        };
        Ok(source.to_string())
    }
}

/// Sources read from a directory, for shader development without rebuilding
#[derive(Debug, Clone)]
pub struct DirectorySources {
    root: PathBuf,
}

impl DirectorySources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ShaderSourceLoader for DirectorySources {
    fn load(&self, name: &str) -> ShaderResult<String> {
        let path = self.root.join(name);
        if !path.is_file() {
            return Err(ShaderError::SourceNotFound(path.display().to_string()));
        }
        debug!(path = %path.display(), "Loading shader source");
        Ok(std::fs::read_to_string(&path)?)
    }
}

/// One shader stage's assembled source text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShaderStage {
    source: String,
}

impl ShaderStage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stage source with `name`, injecting `defines`
    ///
    /// The defines go right after a leading `#version` directive, since GLSL
    /// requires that to be the first statement.
    pub fn load_source(
        &mut self,
        loader: &dyn ShaderSourceLoader,
        name: &str,
        defines: &str,
    ) -> ShaderResult<()> {
        let text = loader.load(name)?;
        self.source = inject_defines(&text, defines);
        Ok(())
    }

    /// Append another source after the current one
    pub fn append_source(&mut self, loader: &dyn ShaderSourceLoader, name: &str) -> ShaderResult<()> {
        let text = loader.load(name)?;
        if !self.source.is_empty() && !self.source.ends_with('\n') {
            self.source.push('\n');
        }
        self.source.push_str(&text);
        Ok(())
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

fn inject_defines(text: &str, defines: &str) -> String {
    let mut out = String::with_capacity(text.len() + defines.len() + 1);
    match version_line_end(text) {
        Some(end) => {
            out.push_str(&text[..end]);
            if !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(defines);
            out.push_str(&text[end..]);
        }
        None => {
            out.push_str(defines);
            out.push_str(text);
        }
    }
    out
}

/// Byte offset just past the `#version` line, if it is the first directive
///
/// Blank lines and `//` comments may precede it.
fn version_line_end(text: &str) -> Option<usize> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let trimmed = line.trim();
        offset += line.len();
        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }
        return trimmed.starts_with("#version").then_some(offset);
    }
    None
}
