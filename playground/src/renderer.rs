use cgmath::{Matrix4, Rad};
use thiserror::Error;

use gl_wrapper::geometry::{GBError, Geometry};
use gl_wrapper::program::{Program, ProgramBuilder, UniformLocation, UniformValue};
use gl_wrapper::renderer::GlRenderer;
use gl_wrapper::texture::{Texture2D, TextureError, TextureFilter};

use crate::assets::TextureImage;
use crate::mesh::{quad_builder, FRAGMENT_SHADER, VERTEX_SHADER};

const CLEAR_COLOR: (f32, f32, f32) = (0.1, 0.2, 0.3);
const TEXTURE_UNIT: u8 = 0;

/// Uniform values for one frame, derived only from elapsed time.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameUniforms {
    /// Seconds since start, the fragment stage pulses brightness with it.
    pub time: f32,
    /// Rotation about +Z by `time` radians.
    pub model: Matrix4<f32>,
}

impl FrameUniforms {
    pub fn at(elapsed: f32) -> Self {
        Self {
            time: elapsed,
            model: Matrix4::from_angle_z(Rad(elapsed)),
        }
    }
}

/// Uniform slots of the quad program, `None` where the name didn't resolve.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UniformSlots {
    pub time: Option<UniformLocation>,
    pub model: Option<UniformLocation>,
    pub texture: Option<UniformLocation>,
}

impl UniformSlots {
    pub fn resolve(program: &Program) -> Self {
        let lookup = |name: &str| {
            let location = program.uniform_location(name);
            if location.is_none() {
                log::warn!("Failed to get uniform location for {name}");
            }
            location
        };

        Self {
            time: lookup("uTime"),
            model: lookup("uModel"),
            texture: lookup("uTexture"),
        }
    }

    /// Writes for the per-frame uniforms. Unresolved slots are skipped.
    pub fn frame_writes(&self, frame: &FrameUniforms) -> Vec<(UniformLocation, UniformValue)> {
        let model: &[f32; 16] = frame.model.as_ref();

        [
            self.time.map(|l| (l, UniformValue::Float(frame.time))),
            self.model.map(|l| (l, UniformValue::Mat4(*model))),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub fn sampler_write(&self, unit: u8) -> Option<(UniformLocation, UniformValue)> {
        self.texture.map(|l| (l, UniformValue::Int(unit as i32)))
    }
}

pub struct FrameRenderer {
    quad: Geometry,
    program: Option<Program>,
    uniforms: UniformSlots,
    texture: Texture2D,
}

impl FrameRenderer {
    /// Uploads the quad and texture and builds the program. A shader that
    /// fails to build is logged and leaves the renderer drawing only the
    /// clear color.
    pub fn setup_resources(
        gl_renderer: &mut GlRenderer,
        image: &TextureImage,
    ) -> Result<Self, RendererError> {
        let quad = quad_builder().build()?;

        let program = match ProgramBuilder::new(VERTEX_SHADER, FRAGMENT_SHADER).build() {
            Ok(p) => Some(p),
            Err(e) => {
                log::error!("{e}");
                None
            }
        };

        let uniforms = program
            .as_ref()
            .map(UniformSlots::resolve)
            .unwrap_or_default();

        let texture = Texture2D::new(
            image.width,
            image.height,
            &image.data,
            image.format,
            TextureFilter::LinearMipmap,
        )?;

        if let (Some(program), Some((location, value))) =
            (&program, uniforms.sampler_write(TEXTURE_UNIT))
        {
            gl_renderer.use_program(program);
            location.set(&value);
            gl_renderer.unbind();
        }

        log::debug!(
            "frame renderer ready, {} vertices, uniforms {:?}",
            quad.vertices(),
            uniforms
        );

        Ok(Self {
            quad,
            program,
            uniforms,
            texture,
        })
    }

    pub fn render_frame(&self, gl_renderer: &mut GlRenderer, elapsed: f32) {
        let (r, g, b) = CLEAR_COLOR;
        gl_renderer.clear_color(r, g, b);

        let Some(program) = &self.program else {
            return;
        };

        gl_renderer.use_program(program);

        for (location, value) in self.uniforms.frame_writes(&FrameUniforms::at(elapsed)) {
            location.set(&value);
        }

        self.texture.bind(TEXTURE_UNIT);
        gl_renderer.draw(&self.quad, program);
        gl_renderer.unbind();
    }
}

#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Failed to build quad geometry: {0}")]
    Geometry(#[from] GBError),
    #[error("Failed to upload texture: {0}")]
    Texture(#[from] TextureError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Vector4, Zero};

    fn all_slots() -> UniformSlots {
        UniformSlots {
            time: UniformLocation::new(0),
            model: UniformLocation::new(1),
            texture: UniformLocation::new(2),
        }
    }

    #[test]
    fn frame_uniforms_test() {
        let start = FrameUniforms::at(0.0);
        assert_eq!(start.time, 0.0);
        assert_eq!(start.model, Matrix4::from_angle_z(Rad(0.0)));

        assert_eq!(FrameUniforms::at(1.25), FrameUniforms::at(1.25));
        assert_ne!(FrameUniforms::at(1.0).model, FrameUniforms::at(2.0).model);
    }

    #[test]
    fn rotation_test() {
        let quarter = FrameUniforms::at(std::f32::consts::FRAC_PI_2);
        let rotated = quarter.model * Vector4::new(1.0, 0.0, 0.0, 1.0);

        assert!((rotated.x - 0.0).abs() < 1e-6);
        assert!((rotated.y - 1.0).abs() < 1e-6);
        assert_eq!(rotated.w, 1.0);
    }

    #[test]
    fn frame_writes_test() {
        let frame = FrameUniforms::at(0.5);
        let writes = all_slots().frame_writes(&frame);

        assert_eq!(writes.len(), 2);
        assert_eq!(writes[0], (UniformLocation::new(0).unwrap(), UniformValue::Float(0.5)));
        match &writes[1] {
            (location, UniformValue::Mat4(m)) => {
                assert_eq!(location.raw(), 1);
                let expected: &[f32; 16] = frame.model.as_ref();
                assert_eq!(m, expected);
            }
            other => panic!("unexpected write {other:?}"),
        }
    }

    #[test]
    fn unresolved_writes_test() {
        let none = UniformSlots::default();
        assert!(none.frame_writes(&FrameUniforms::at(3.0)).is_empty());
        assert_eq!(none.sampler_write(0), None);

        let only_model = UniformSlots {
            model: UniformLocation::new(4),
            ..Default::default()
        };
        let writes = only_model.frame_writes(&FrameUniforms::at(3.0));
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0.raw(), 4);
    }

    #[test]
    fn sampler_write_test() {
        assert_eq!(
            all_slots().sampler_write(0),
            Some((UniformLocation::new(2).unwrap(), UniformValue::Int(0)))
        );
    }

    #[test]
    fn model_is_rotation_only_test() {
        let model = FrameUniforms::at(10.0).model;

        assert_eq!(model.w, Vector4::new(0.0, 0.0, 0.0, 1.0));
        assert!(!model.x.is_zero());
    }
}
