use std::ffi::{c_void, CStr};
use thiserror::Error;

pub mod geometry;
pub mod program;
pub mod renderer;
pub mod texture;

/// Entry points this crate calls. Checked after loading so a broken
/// loader fails at startup instead of on the first draw.
const REQUIRED: &[(&str, fn() -> bool)] = &[
    ("glActiveTexture", gl::ActiveTexture::is_loaded),
    ("glAttachShader", gl::AttachShader::is_loaded),
    ("glBindBuffer", gl::BindBuffer::is_loaded),
    ("glBindTexture", gl::BindTexture::is_loaded),
    ("glBindVertexArray", gl::BindVertexArray::is_loaded),
    ("glBufferData", gl::BufferData::is_loaded),
    ("glClear", gl::Clear::is_loaded),
    ("glClearColor", gl::ClearColor::is_loaded),
    ("glCompileShader", gl::CompileShader::is_loaded),
    ("glCreateProgram", gl::CreateProgram::is_loaded),
    ("glCreateShader", gl::CreateShader::is_loaded),
    ("glDeleteBuffers", gl::DeleteBuffers::is_loaded),
    ("glDeleteProgram", gl::DeleteProgram::is_loaded),
    ("glDeleteShader", gl::DeleteShader::is_loaded),
    ("glDeleteTextures", gl::DeleteTextures::is_loaded),
    ("glDeleteVertexArrays", gl::DeleteVertexArrays::is_loaded),
    ("glDrawArrays", gl::DrawArrays::is_loaded),
    ("glDrawElements", gl::DrawElements::is_loaded),
    ("glEnableVertexAttribArray", gl::EnableVertexAttribArray::is_loaded),
    ("glGenBuffers", gl::GenBuffers::is_loaded),
    ("glGenTextures", gl::GenTextures::is_loaded),
    ("glGenVertexArrays", gl::GenVertexArrays::is_loaded),
    ("glGenerateMipmap", gl::GenerateMipmap::is_loaded),
    ("glGetProgramInfoLog", gl::GetProgramInfoLog::is_loaded),
    ("glGetProgramiv", gl::GetProgramiv::is_loaded),
    ("glGetShaderInfoLog", gl::GetShaderInfoLog::is_loaded),
    ("glGetShaderiv", gl::GetShaderiv::is_loaded),
    ("glGetString", gl::GetString::is_loaded),
    ("glGetUniformLocation", gl::GetUniformLocation::is_loaded),
    ("glLinkProgram", gl::LinkProgram::is_loaded),
    ("glPixelStorei", gl::PixelStorei::is_loaded),
    ("glShaderSource", gl::ShaderSource::is_loaded),
    ("glTexImage2D", gl::TexImage2D::is_loaded),
    ("glTexParameteri", gl::TexParameteri::is_loaded),
    ("glUniform1f", gl::Uniform1f::is_loaded),
    ("glUniform1i", gl::Uniform1i::is_loaded),
    ("glUniformMatrix4fv", gl::UniformMatrix4fv::is_loaded),
    ("glUseProgram", gl::UseProgram::is_loaded),
    ("glVertexAttribPointer", gl::VertexAttribPointer::is_loaded),
    ("glViewport", gl::Viewport::is_loaded),
];

/// Loads the global GL function table and checks that everything the
/// wrappers need resolved.
pub fn load_with<F>(loader: F) -> Result<(), LoadError>
where
    F: FnMut(&'static str) -> *const c_void,
{
    gl::load_with(loader);

    let missing = REQUIRED
        .iter()
        .filter(|(_, loaded)| !loaded())
        .map(|(name, _)| *name)
        .collect::<Vec<_>>();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(LoadError::MissingFunctions(missing.join(", ")))
    }
}

/// Returns the `GL_VERSION` string of the current context.
pub fn version_string() -> Option<String> {
    unsafe {
        let ptr = gl::GetString(gl::VERSION);
        if ptr.is_null() {
            return None;
        }

        Some(
            CStr::from_ptr(ptr as *const _)
                .to_string_lossy()
                .into_owned(),
        )
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("OpenGL functions failed to load: {0}")]
    MissingFunctions(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_loader_test() {
        let res = load_with(|_| std::ptr::null());

        match res {
            Err(LoadError::MissingFunctions(names)) => {
                assert!(names.contains("glClear"));
                assert!(names.contains("glDrawElements"));
            }
            Ok(_) => panic!("null loader must not succeed"),
        }
    }
}
