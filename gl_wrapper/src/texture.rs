use gl::types::GLenum;
use std::ffi::c_void;
use thiserror::Error;

pub struct Texture2D {
    id: u32,
}

impl Texture2D {
    pub fn new(
        width: u32,
        height: u32,
        data: &[u8],
        format: TextureFormats,
        filter: TextureFilter,
    ) -> Result<Self, TextureError> {
        check_len(width, height, data, format)?;

        let mut id = 0;

        unsafe {
            gl::GenTextures(1, (&mut id) as *mut u32);
            gl::BindTexture(gl::TEXTURE_2D, id);

            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::REPEAT as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::REPEAT as i32);
            gl::TexParameteri(
                gl::TEXTURE_2D,
                gl::TEXTURE_MIN_FILTER,
                filter.min_filter() as i32,
            );
            gl::TexParameteri(
                gl::TEXTURE_2D,
                gl::TEXTURE_MAG_FILTER,
                filter.mag_filter() as i32,
            );

            // rows are tightly packed, RGB and RED widths are rarely 4 byte aligned
            gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);

            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                format.gl_format() as i32,
                width as i32,
                height as i32,
                0,
                format.gl_format(),
                gl::UNSIGNED_BYTE,
                data.as_ptr() as *const c_void,
            );

            gl::PixelStorei(gl::UNPACK_ALIGNMENT, 4);

            if let TextureFilter::LinearMipmap = filter {
                gl::GenerateMipmap(gl::TEXTURE_2D);
            }

            gl::BindTexture(gl::TEXTURE_2D, 0);
        }

        Ok(Self { id })
    }

    pub fn bind(&self, unit: u8) {
        unsafe {
            gl::ActiveTexture(gl::TEXTURE0 + unit as u32);
            gl::BindTexture(gl::TEXTURE_2D, self.id)
        }
    }
}

impl Drop for Texture2D {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteTextures(1, (&self.id) as *const u32);
        }
    }
}

fn check_len(
    width: u32,
    height: u32,
    data: &[u8],
    format: TextureFormats,
) -> Result<(), TextureError> {
    if width == 0 || height == 0 {
        return Err(TextureError::EmptySize);
    }

    if (width as usize * height as usize * format.channels() as usize) != data.len() {
        return Err(TextureError::InvalidSrcLength);
    }

    Ok(())
}

#[derive(Debug, Error, PartialEq)]
pub enum TextureError {
    #[error("Invalid source data length")]
    InvalidSrcLength,
    #[error("Texture has zero width or height")]
    EmptySize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormats {
    Red,
    Rgb,
    Rgba,
}

impl TextureFormats {
    pub fn channels(&self) -> u8 {
        match self {
            TextureFormats::Red => 1,
            TextureFormats::Rgb => 3,
            TextureFormats::Rgba => 4,
        }
    }

    fn gl_format(&self) -> GLenum {
        match self {
            TextureFormats::Red => gl::RED,
            TextureFormats::Rgb => gl::RGB,
            TextureFormats::Rgba => gl::RGBA,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFilter {
    Nearest,
    Linear,
    /// Trilinear, generates the mip chain on upload.
    LinearMipmap,
}

impl TextureFilter {
    fn min_filter(&self) -> GLenum {
        match self {
            TextureFilter::Nearest => gl::NEAREST,
            TextureFilter::Linear => gl::LINEAR,
            TextureFilter::LinearMipmap => gl::LINEAR_MIPMAP_LINEAR,
        }
    }

    fn mag_filter(&self) -> GLenum {
        match self {
            TextureFilter::Nearest => gl::NEAREST,
            TextureFilter::Linear | TextureFilter::LinearMipmap => gl::LINEAR,
        }
    }
}
