use image::{Rgb32FImage, RgbaImage};
use std::path::Path;

/// Pixel encoding of a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    /// 8 bit per channel, ordered as Red, Green, Blue, Alpha.
    Rgba,
    /// 32 bit float per channel, ordered as Red, Green, Blue. Used for high dynamic range images.
    RgbFloat,
}

impl TextureFormat {
    /// Guesses the format from the extension of a texture path: `.hdr` files are float.
    pub fn from_path(path: &str) -> Self {
        let hdr = Path::new(path)
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("hdr"))
            .unwrap_or(false);
        if hdr {
            TextureFormat::RgbFloat
        } else {
            TextureFormat::Rgba
        }
    }
}

/// Decoded pixels of a texture.
#[derive(Debug, Clone, PartialEq)]
pub enum TextureData {
    Rgba(RgbaImage),
    RgbFloat(Rgb32FImage),
}

impl TextureData {
    pub fn format(&self) -> TextureFormat {
        match self {
            TextureData::Rgba(_) => TextureFormat::Rgba,
            TextureData::RgbFloat(_) => TextureFormat::RgbFloat,
        }
    }

    /// Returns the size of the image in form `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            TextureData::Rgba(img) => img.dimensions(),
            TextureData::RgbFloat(img) => img.dimensions(),
        }
    }
}

/// A texture referenced by path. Pixels are present only when the texture was generated in
/// memory; otherwise the path is expected to resolve next to the written scene.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Texture {
    pub data: Option<TextureData>,
}

impl Texture {
    pub fn with_data(data: TextureData) -> Self {
        Texture { data: Some(data) }
    }
}

#[cfg(test)]
mod tests {
    use super::{Texture, TextureData, TextureFormat};
    use image::RgbaImage;

    #[test]
    fn format_from_path() {
        assert_eq!(TextureFormat::from_path("env.hdr"), TextureFormat::RgbFloat);
        assert_eq!(TextureFormat::from_path("dir/env.HDR"), TextureFormat::RgbFloat);
        assert_eq!(TextureFormat::from_path("grid.png"), TextureFormat::Rgba);
        assert_eq!(TextureFormat::from_path("noext"), TextureFormat::Rgba);
    }

    #[test]
    fn data_dimensions() {
        let texture = Texture::with_data(TextureData::Rgba(RgbaImage::new(4, 2)));
        let data = texture.data.as_ref().unwrap();
        assert_eq!(data.dimensions(), (4, 2));
        assert_eq!(data.format(), TextureFormat::Rgba);
        assert!(Texture::default().data.is_none());
    }
}
