use crate::error::Result;
use crate::materials::TextureData;
use image::codecs::hdr::HdrEncoder;
use image::ImageFormat;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Writes 8-bit textures as PNG and float textures as Radiance HDR.
pub fn write_texture(path: &Path, data: &TextureData) -> Result<()> {
    match data {
        TextureData::Rgba(img) => img.save_with_format(path, ImageFormat::Png)?,
        TextureData::RgbFloat(img) => {
            let (width, height) = img.dimensions();
            let pixels = img.pixels().copied().collect::<Vec<_>>();
            let writer = BufWriter::new(File::create(path)?);
            HdrEncoder::new(writer).encode(&pixels, width as usize, height as usize)?;
        }
    }
    Ok(())
}
