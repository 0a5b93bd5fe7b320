use gl::types::{GLenum, GLint, GLuint};
use std::ffi::{c_char, CString};
use std::fmt::{Display, Formatter};
use thiserror::Error;

const INFO_LOG_LEN: usize = 1024;

pub struct ProgramBuilder<'a> {
    vert: &'a str,
    frag: &'a str,
}

impl<'a> ProgramBuilder<'a> {
    pub fn new(vert_src: &'a str, frag_src: &'a str) -> Self {
        Self {
            vert: vert_src,
            frag: frag_src,
        }
    }

    pub fn build(self) -> Result<Program, PBError> {
        let vert_src =
            CString::new(self.vert).map_err(|_| PBError::InvalidSource(Stage::Vertex))?;
        let frag_src =
            CString::new(self.frag).map_err(|_| PBError::InvalidSource(Stage::Fragment))?;

        let vert = compile(Stage::Vertex, &vert_src)?;
        let frag = match compile(Stage::Fragment, &frag_src) {
            Ok(frag) => frag,
            Err(e) => {
                unsafe { gl::DeleteShader(vert) };
                return Err(e);
            }
        };

        let mut success: GLint = 0;

        unsafe {
            let program = gl::CreateProgram();
            gl::AttachShader(program, vert);
            gl::AttachShader(program, frag);
            gl::LinkProgram(program);

            // the program keeps the attached stages alive until it is deleted
            gl::DeleteShader(vert);
            gl::DeleteShader(frag);

            gl::GetProgramiv(program, gl::LINK_STATUS, (&mut success) as *mut GLint);
            if success != 1 {
                let mut buf = [0_u8; INFO_LOG_LEN];

                gl::GetProgramInfoLog(
                    program,
                    INFO_LOG_LEN as i32,
                    std::ptr::null_mut(),
                    buf.as_mut_ptr() as *mut c_char,
                );
                gl::DeleteProgram(program);

                return Err(PBError::Linking(info_log_to_string(&buf)));
            }

            Ok(Program { id: program })
        }
    }
}

fn compile(stage: Stage, src: &CString) -> Result<GLuint, PBError> {
    let mut success: GLint = 0;

    unsafe {
        let shader = gl::CreateShader(stage.gl_kind());

        gl::ShaderSource(
            shader,
            1,
            (&src.as_ptr()) as *const *const c_char,
            std::ptr::null(),
        );

        gl::CompileShader(shader);
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, (&mut success) as *mut GLint);
        if success != 1 {
            let mut buf = [0_u8; INFO_LOG_LEN];

            gl::GetShaderInfoLog(
                shader,
                INFO_LOG_LEN as i32,
                std::ptr::null_mut(),
                buf.as_mut_ptr() as *mut c_char,
            );
            gl::DeleteShader(shader);

            return Err(PBError::Compilation(stage, info_log_to_string(&buf)));
        }

        Ok(shader)
    }
}

/// Driver info logs are NUL terminated inside a fixed buffer.
fn info_log_to_string(buf: &[u8]) -> String {
    let end = buf.iter().position(|b| *b == 0).unwrap_or(buf.len());

    String::from_utf8_lossy(&buf[..end]).trim_end().to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl Stage {
    fn gl_kind(&self) -> GLenum {
        match self {
            Stage::Vertex => gl::VERTEX_SHADER,
            Stage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Vertex => write!(f, "vertex"),
            Stage::Fragment => write!(f, "fragment"),
        }
    }
}

#[derive(Debug, Error)]
pub enum PBError {
    #[error("{0} shader source contains a NUL byte")]
    InvalidSource(Stage),
    #[error("{0} shader compilation failed:\n{1}")]
    Compilation(Stage, String),
    #[error("shader program linking failed:\n{0}")]
    Linking(String),
}

pub struct Program {
    id: GLuint,
}

impl Program {
    pub fn get_id(&self) -> GLuint {
        self.id
    }

    /// Looks up a uniform by name. Unused or misspelled uniforms are `None`.
    pub fn uniform_location(&self, name: &str) -> Option<UniformLocation> {
        let name = CString::new(name).ok()?;

        let raw = unsafe { gl::GetUniformLocation(self.id, name.as_ptr()) };

        UniformLocation::new(raw)
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.id) }
    }
}

/// A resolved uniform slot. GL reports unresolved names as `-1`, which
/// can't be represented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformLocation(GLint);

impl UniformLocation {
    pub fn new(raw: GLint) -> Option<Self> {
        if raw < 0 {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn raw(&self) -> GLint {
        self.0
    }

    /// Writes to the currently bound program.
    pub fn set(&self, value: &UniformValue) {
        unsafe {
            match value {
                UniformValue::Float(v) => gl::Uniform1f(self.0, *v),
                UniformValue::Int(v) => gl::Uniform1i(self.0, *v),
                UniformValue::Mat4(m) => gl::UniformMatrix4fv(self.0, 1, gl::FALSE, m.as_ptr()),
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Float(f32),
    /// Also used for sampler units.
    Int(i32),
    /// Column major.
    Mat4([f32; 16]),
}
