use gl_wrapper::geometry::{GeometryBuilder, VertexAttribute};

pub const VERTEX_SHADER: &str = include_str!("gl_shaders/textured_vert.glsl");
pub const FRAGMENT_SHADER: &str = include_str!("gl_shaders/textured_frag.glsl");

/// Position, color and texture coordinate per vertex.
#[rustfmt::skip]
pub const QUAD_VERTICES: [f32; 32] = [
    // x     y    z    r    g    b    u    v
    -0.5, -0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.5, -0.5, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0,
    0.5, 0.5, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0,
    -0.5, 0.5, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0,
];

#[rustfmt::skip]
pub const QUAD_INDICES: [u32; 6] = [
    0, 1, 2,
    0, 2, 3,
];

pub fn quad_builder() -> GeometryBuilder<'static> {
    GeometryBuilder::new(&QUAD_VERTICES)
        .with_attribute(VertexAttribute::Vec3)
        .with_attribute(VertexAttribute::Vec3)
        .with_attribute(VertexAttribute::Vec2)
        .with_indices(&QUAD_INDICES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_layout_test() {
        let layout = quad_builder().layout().unwrap();

        assert_eq!(layout.stride, 8);
        assert_eq!(layout.vertices, 4);
        assert_eq!(layout.indices, Some(6));
    }

    #[test]
    fn shader_uniforms_test() {
        assert!(VERTEX_SHADER.contains("uniform mat4 uModel;"));
        assert!(FRAGMENT_SHADER.contains("uniform float uTime;"));
        assert!(FRAGMENT_SHADER.contains("uniform sampler2D uTexture;"));
    }
}
