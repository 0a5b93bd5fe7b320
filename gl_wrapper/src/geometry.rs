use std::ffi::c_void;
use thiserror::Error;

pub struct GeometryBuilder<'a> {
    attributes: Vec<VertexAttribute>,
    data: &'a [f32],
    indices: Option<&'a [u32]>,
}

impl<'a> GeometryBuilder<'a> {
    pub fn new(data: &'a [f32]) -> Self {
        Self {
            data,
            attributes: Vec::new(),
            indices: None,
        }
    }

    pub fn with_attribute(mut self, attr: VertexAttribute) -> Self {
        self.attributes.push(attr);
        self
    }

    pub fn with_indices(mut self, indices: &'a [u32]) -> Self {
        self.indices = Some(indices);
        self
    }

    /// Validates the vertex layout without touching GL.
    pub fn layout(&self) -> Result<Layout, GBError> {
        let stride: usize = self.attributes.iter().map(|a| a.size()).sum();

        if stride == 0 {
            return Err(GBError::NoAttributes);
        }

        if self.data.len() % stride != 0 {
            return Err(GBError::InvalidDataLength);
        }

        let vertices = self.data.len() / stride;

        if let Some(indices) = self.indices {
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertices) {
                return Err(GBError::IndexOutOfRange { index, vertices });
            }
        }

        Ok(Layout {
            stride,
            vertices,
            indices: self.indices.map(|i| i.len()),
        })
    }

    pub fn build(self) -> Result<Geometry, GBError> {
        let layout = self.layout()?;

        let mut vao = 0;
        let mut vbo = 0;
        let mut ebo = 0;

        unsafe {
            gl::GenVertexArrays(1, (&mut vao) as *mut u32);
            gl::GenBuffers(1, (&mut vbo) as *mut u32);

            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);

            gl::BufferData(
                gl::ARRAY_BUFFER,
                std::mem::size_of_val(self.data) as isize,
                self.data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );

            // the element buffer binding is VAO state, so it stays bound
            if let Some(indices) = self.indices {
                gl::GenBuffers(1, (&mut ebo) as *mut u32);
                gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ebo);
                gl::BufferData(
                    gl::ELEMENT_ARRAY_BUFFER,
                    std::mem::size_of_val(indices) as isize,
                    indices.as_ptr() as *const c_void,
                    gl::STATIC_DRAW,
                );
            }

            let mut offset = 0;

            for (i, attr) in self.attributes.iter().enumerate() {
                gl::VertexAttribPointer(
                    i as u32,
                    attr.size() as i32,
                    gl::FLOAT,
                    gl::FALSE,
                    (layout.stride * std::mem::size_of::<f32>()) as i32,
                    (offset * std::mem::size_of::<f32>()) as *const c_void,
                );
                offset += attr.size();
                gl::EnableVertexAttribArray(i as u32);
            }

            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
            gl::BindVertexArray(0);
        }

        Ok(Geometry {
            vao,
            vbo,
            ebo: layout.indices.map(|count| (ebo, count)),
            vertices: layout.vertices,
        })
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum GBError {
    #[error("No vertex attributes given")]
    NoAttributes,
    #[error("Invalid data length for given attributes")]
    InvalidDataLength,
    #[error("Index {index} out of range for {vertices} vertices")]
    IndexOutOfRange { index: u32, vertices: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Floats per vertex.
    pub stride: usize,
    pub vertices: usize,
    pub indices: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
pub enum VertexAttribute {
    Float,
    Vec2,
    Vec3,
}

impl VertexAttribute {
    pub fn size(&self) -> usize {
        match self {
            VertexAttribute::Float => 1,
            VertexAttribute::Vec2 => 2,
            VertexAttribute::Vec3 => 3,
        }
    }
}

pub struct Geometry {
    vao: u32,
    vbo: u32,
    /// Element buffer and index count.
    ebo: Option<(u32, usize)>,
    vertices: usize,
}

impl Geometry {
    pub fn vao(&self) -> u32 {
        self.vao
    }

    pub fn vertices(&self) -> usize {
        self.vertices
    }

    pub fn indices(&self) -> Option<usize> {
        self.ebo.map(|(_, count)| count)
    }
}

impl Drop for Geometry {
    fn drop(&mut self) {
        unsafe {
            if let Some((ebo, _)) = self.ebo {
                gl::DeleteBuffers(1, (&ebo) as *const u32);
            }
            gl::DeleteBuffers(1, (&self.vbo) as *const u32);
            gl::DeleteVertexArrays(1, (&self.vao) as *const u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rustfmt::skip]
    const TRIANGLE: [f32; 15] = [
        -0.5, -0.5, 1.0, 0.0, 0.0,
        0.5, -0.5, 0.0, 1.0, 0.0,
        0.0, 0.5, 0.0, 0.0, 1.0,
    ];

    #[test]
    fn layout_test() {
        let layout = GeometryBuilder::new(&TRIANGLE)
            .with_attribute(VertexAttribute::Vec2)
            .with_attribute(VertexAttribute::Vec3)
            .layout()
            .unwrap();

        assert_eq!(layout.stride, 5);
        assert_eq!(layout.vertices, 3);
        assert_eq!(layout.indices, None);
    }

    #[test]
    fn layout_indexed_test() {
        let layout = GeometryBuilder::new(&TRIANGLE)
            .with_attribute(VertexAttribute::Vec2)
            .with_attribute(VertexAttribute::Vec3)
            .with_indices(&[0, 1, 2, 2, 1, 0])
            .layout()
            .unwrap();

        assert_eq!(layout.indices, Some(6));
    }

    #[test]
    fn layout_errors_test() {
        assert_eq!(
            GeometryBuilder::new(&TRIANGLE).layout(),
            Err(GBError::NoAttributes)
        );

        assert_eq!(
            GeometryBuilder::new(&TRIANGLE)
                .with_attribute(VertexAttribute::Vec2)
                .layout(),
            Err(GBError::InvalidDataLength)
        );

        assert_eq!(
            GeometryBuilder::new(&TRIANGLE)
                .with_attribute(VertexAttribute::Vec2)
                .with_attribute(VertexAttribute::Vec3)
                .with_indices(&[0, 1, 3])
                .layout(),
            Err(GBError::IndexOutOfRange {
                index: 3,
                vertices: 3
            })
        );
    }
}
