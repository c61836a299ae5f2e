//! Writing heightmaps to disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};
use relief_config::{OutputConfig, OutputFormat};
use relief_image::{Image, ImageError};
use thiserror::Error;

/// Errors that can occur while exporting a heightmap.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("PNG encoding error: {0}")]
    Encode(#[from] image::ImageError),
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error("{width}x{height} is too large for a PNG")]
    TooLarge { width: usize, height: usize },
}

/// Write band 0 of `image` in the format chosen by `output`.
pub fn export(image: &Image, output: &OutputConfig) -> Result<(), ExportError> {
    match output.format {
        OutputFormat::Png16 => write_png16(image, &output.path),
        OutputFormat::RawF32 if output.normalize => {
            write_raw_f32(&normalized(image)?, &output.path)
        }
        OutputFormat::RawF32 => write_raw_f32(image, &output.path),
    }
}

/// Band 0 remapped linearly from `[min, max]` to `[0, 1]`.
///
/// A flat image maps to all zeros.
pub fn normalized(image: &Image) -> Result<Image, ExportError> {
    let (min, max) = image.min_max(0)?;
    let range = max - min;
    let nbands = image.nbands();
    let data = image
        .data()
        .iter()
        .step_by(nbands)
        .map(|&v| if range > 0.0 { (v - min) / range } else { 0.0 })
        .collect();
    Ok(Image::from_vec(image.width(), image.height(), 1, data)?)
}

/// Band 0 as 16-bit samples spanning the image's own value range.
pub fn to_u16_samples(image: &Image) -> Result<Vec<u16>, ExportError> {
    Ok(normalized(image)?
        .data()
        .iter()
        .map(|&v| (v.clamp(0.0, 1.0) * 65535.0).round() as u16)
        .collect())
}

/// 16-bit grayscale PNG.
pub fn write_png16(image: &Image, path: &Path) -> Result<(), ExportError> {
    let too_large = || ExportError::TooLarge {
        width: image.width(),
        height: image.height(),
    };
    let width = u32::try_from(image.width()).map_err(|_| too_large())?;
    let height = u32::try_from(image.height()).map_err(|_| too_large())?;

    let samples = to_u16_samples(image)?;
    let writer = BufWriter::new(create(path)?);
    let encoder =
        PngEncoder::new_with_quality(writer, CompressionType::Default, FilterType::Adaptive);
    encoder.write_image(
        bytemuck::cast_slice(&samples),
        width,
        height,
        ExtendedColorType::L16,
    )?;
    Ok(())
}

/// Headerless little-endian `f32` texels of band 0, row-major.
pub fn write_raw_f32(image: &Image, path: &Path) -> Result<(), ExportError> {
    let bits: Vec<u32> = image
        .data()
        .iter()
        .step_by(image.nbands())
        .map(|v| v.to_bits().to_le())
        .collect();

    let mut writer = BufWriter::new(create(path)?);
    writer
        .write_all(bytemuck::cast_slice(&bits))
        .and_then(|()| writer.flush())
        .map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })
}

fn create(path: &Path) -> Result<File, ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| ExportError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
