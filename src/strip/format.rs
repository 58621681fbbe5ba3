use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::error::{EncodingError, ImageFormatHint, LimitError, LimitErrorKind};
use image::{DynamicImage, ImageError, ImageFormat, ImageResult, RgbImage};
use std::io::{Seek, Write};
use std::path::Path;

/// The formats a cleaned image can be written as.
///
/// Every variant maps to exactly one [`EncodeProfile`], so choosing a format
/// also fixes how pixels are conformed and which encoder knobs apply.
///
/// # Example
///
/// ```rust
/// use exif_strip::strip::OutputFormat;
/// use std::path::Path;
///
/// assert_eq!(OutputFormat::from_path(Path::new("photo.JPG")), Some(OutputFormat::Jpeg));
/// assert_eq!(OutputFormat::from_path(Path::new("notes.txt")), None);
/// assert!(OutputFormat::Jpeg.profile().uses_quality);
/// assert!(!OutputFormat::Png.profile().uses_quality);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
    Tiff,
    Bmp,
    WebP,
}

/// Pixel layouts an encoder accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeConstraint {
    /// 8-bit RGB only; alpha is dropped.
    Rgb8,
    /// Any integer layout (8 or 16 bit, luma or color, with or without alpha).
    Integer,
    /// Integer layouts without a luma+alpha pair.
    IntegerNoLumaAlpha,
    /// 8-bit luma or color, alpha kept.
    EightBit,
}

/// How a given [`OutputFormat`] gets written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeProfile {
    pub mode: ModeConstraint,
    /// Whether the quality setting changes the output.
    pub uses_quality: bool,
    /// Whether the encoder runs at its smallest-output settings.
    pub optimize: bool,
}

impl OutputFormat {
    /// Map a decoded source format onto an output format, if it is one we write.
    pub fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Jpeg => Some(Self::Jpeg),
            ImageFormat::Png => Some(Self::Png),
            ImageFormat::Tiff => Some(Self::Tiff),
            ImageFormat::Bmp => Some(Self::Bmp),
            ImageFormat::WebP => Some(Self::WebP),
            _ => None,
        }
    }

    /// Determine the output format from a file path extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "tif" | "tiff" => Some(Self::Tiff),
            "bmp" => Some(Self::Bmp),
            "webp" => Some(Self::WebP),
            _ => None,
        }
    }

    pub fn image_format(self) -> ImageFormat {
        match self {
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Png => ImageFormat::Png,
            Self::Tiff => ImageFormat::Tiff,
            Self::Bmp => ImageFormat::Bmp,
            Self::WebP => ImageFormat::WebP,
        }
    }

    pub fn profile(self) -> EncodeProfile {
        match self {
            Self::Jpeg => EncodeProfile {
                mode: ModeConstraint::Rgb8,
                uses_quality: true,
                optimize: true,
            },
            Self::Png => EncodeProfile {
                mode: ModeConstraint::Integer,
                uses_quality: false,
                optimize: true,
            },
            Self::Tiff => EncodeProfile {
                mode: ModeConstraint::IntegerNoLumaAlpha,
                uses_quality: false,
                optimize: false,
            },
            Self::Bmp | Self::WebP => EncodeProfile {
                mode: ModeConstraint::EightBit,
                uses_quality: false,
                optimize: false,
            },
        }
    }

    /// Conform `img` to this format's mode constraint and encode it into `writer`.
    ///
    /// `quality` is only consulted when [`EncodeProfile::uses_quality`] is set.
    pub fn encode<W: Write + Seek>(
        self,
        img: DynamicImage,
        writer: &mut W,
        quality: u8,
    ) -> ImageResult<()> {
        let profile = self.profile();
        let img = profile.mode.conform(img);
        log::debug!("Encoding {self:?} as {:?} ({profile:?})", img.color());

        match self {
            Self::Jpeg => encode_jpeg(&img.into_rgb8(), writer, quality, profile.optimize),
            Self::Png => {
                let compression = if profile.optimize {
                    CompressionType::Best
                } else {
                    CompressionType::Default
                };
                img.write_with_encoder(PngEncoder::new_with_quality(
                    writer,
                    compression,
                    FilterType::Adaptive,
                ))
            }
            other => img.write_to(writer, other.image_format()),
        }
    }
}

impl ModeConstraint {
    /// Convert `img` into a layout the encoder accepts. Already-conforming
    /// images are returned untouched.
    pub fn conform(self, img: DynamicImage) -> DynamicImage {
        match self {
            Self::Rgb8 => match img {
                DynamicImage::ImageRgb8(_) => img,
                other => DynamicImage::ImageRgb8(other.to_rgb8()),
            },
            Self::Integer => without_float(img),
            Self::IntegerNoLumaAlpha => match without_float(img) {
                DynamicImage::ImageLumaA8(buf) => {
                    DynamicImage::ImageRgba8(DynamicImage::ImageLumaA8(buf).to_rgba8())
                }
                DynamicImage::ImageLumaA16(buf) => {
                    DynamicImage::ImageRgba16(DynamicImage::ImageLumaA16(buf).to_rgba16())
                }
                other => other,
            },
            Self::EightBit => match img {
                DynamicImage::ImageLuma16(_) => DynamicImage::ImageLuma8(img.to_luma8()),
                DynamicImage::ImageLumaA16(_) => DynamicImage::ImageLumaA8(img.to_luma_alpha8()),
                DynamicImage::ImageRgb16(_) | DynamicImage::ImageRgb32F(_) => {
                    DynamicImage::ImageRgb8(img.to_rgb8())
                }
                DynamicImage::ImageRgba16(_) | DynamicImage::ImageRgba32F(_) => {
                    DynamicImage::ImageRgba8(img.to_rgba8())
                }
                other => other,
            },
        }
    }
}

/// Baseline JPEG; `optimize` builds Huffman tables from the image's own
/// statistics instead of the standard ones.
fn encode_jpeg<W: Write>(
    img: &RgbImage,
    writer: &mut W,
    quality: u8,
    optimize: bool,
) -> ImageResult<()> {
    let (Ok(width), Ok(height)) = (u16::try_from(img.width()), u16::try_from(img.height())) else {
        return Err(ImageError::Limits(LimitError::from_kind(
            LimitErrorKind::DimensionError,
        )));
    };

    let mut encoder = jpeg_encoder::Encoder::new(writer, quality);
    encoder.set_optimized_huffman_tables(optimize);
    encoder
        .encode(img.as_raw(), width, height, jpeg_encoder::ColorType::Rgb)
        .map_err(|e| {
            ImageError::Encoding(EncodingError::new(
                ImageFormatHint::Exact(ImageFormat::Jpeg),
                e,
            ))
        })
}

fn without_float(img: DynamicImage) -> DynamicImage {
    match img {
        DynamicImage::ImageRgb32F(_) => DynamicImage::ImageRgb16(img.to_rgb16()),
        DynamicImage::ImageRgba32F(_) => DynamicImage::ImageRgba16(img.to_rgba16()),
        other => other,
    }
}
