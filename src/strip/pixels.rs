use image::metadata::Orientation;
use image::{DynamicImage, ImageBuffer, Pixel};

/// Channel layout of a decoded image, independent of bit depth.
///
/// Palette images never show up here: decoders expand them to `Rgb`, or to
/// `Rgba` when the palette carries transparency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelMode {
    Luma,
    LumaAlpha,
    Rgb,
    Rgba,
}

impl PixelMode {
    pub fn of(img: &DynamicImage) -> Self {
        let color = img.color();
        match (color.has_color(), color.has_alpha()) {
            (false, false) => Self::Luma,
            (false, true) => Self::LumaAlpha,
            (true, false) => Self::Rgb,
            (true, true) => Self::Rgba,
        }
    }
}

/// Rotate/flip pixel data so it displays upright without an orientation tag.
pub fn apply_orientation(mut img: DynamicImage, orientation: Orientation) -> DynamicImage {
    if orientation != Orientation::NoTransforms {
        log::debug!("Applying orientation {orientation:?}");
        img.apply_orientation(orientation);
    }
    img
}

/// Copy every sample of `img` into a freshly allocated buffer of the same
/// layout and dimensions. Nothing but the pixels survives.
pub fn rebuild(img: &DynamicImage) -> DynamicImage {
    match img {
        DynamicImage::ImageLuma8(buf) => DynamicImage::ImageLuma8(copy_buffer(buf)),
        DynamicImage::ImageLumaA8(buf) => DynamicImage::ImageLumaA8(copy_buffer(buf)),
        DynamicImage::ImageRgb8(buf) => DynamicImage::ImageRgb8(copy_buffer(buf)),
        DynamicImage::ImageRgba8(buf) => DynamicImage::ImageRgba8(copy_buffer(buf)),
        DynamicImage::ImageLuma16(buf) => DynamicImage::ImageLuma16(copy_buffer(buf)),
        DynamicImage::ImageLumaA16(buf) => DynamicImage::ImageLumaA16(copy_buffer(buf)),
        DynamicImage::ImageRgb16(buf) => DynamicImage::ImageRgb16(copy_buffer(buf)),
        DynamicImage::ImageRgba16(buf) => DynamicImage::ImageRgba16(copy_buffer(buf)),
        DynamicImage::ImageRgb32F(buf) => DynamicImage::ImageRgb32F(copy_buffer(buf)),
        DynamicImage::ImageRgba32F(buf) => DynamicImage::ImageRgba32F(copy_buffer(buf)),
        // Layouts added to `image` later: fall back to 8-bit RGBA.
        other => DynamicImage::ImageRgba8(copy_buffer(&other.to_rgba8())),
    }
}

fn copy_buffer<P: Pixel>(src: &ImageBuffer<P, Vec<P::Subpixel>>) -> ImageBuffer<P, Vec<P::Subpixel>> {
    let mut dst = ImageBuffer::new(src.width(), src.height());
    dst.copy_from_slice(src.as_raw());
    dst
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage, RgbaImage, Rgba};

    #[test]
    fn pixel_mode_from_color_type() {
        assert_eq!(PixelMode::of(&DynamicImage::new_luma8(1, 1)), PixelMode::Luma);
        assert_eq!(PixelMode::of(&DynamicImage::new_luma_a8(1, 1)), PixelMode::LumaAlpha);
        assert_eq!(PixelMode::of(&DynamicImage::new_rgb8(1, 1)), PixelMode::Rgb);
        assert_eq!(PixelMode::of(&DynamicImage::new_rgba16(1, 1)), PixelMode::Rgba);
    }

    #[test]
    fn rebuild_copies_pixels_and_layout() {
        let src = DynamicImage::ImageRgba8(RgbaImage::from_fn(3, 2, |x, y| {
            Rgba([x as u8, y as u8, (x * y) as u8, 255 - x as u8])
        }));
        let out = rebuild(&src);
        assert_eq!(out.color(), src.color());
        assert_eq!(out.as_bytes(), src.as_bytes());
    }

    #[test]
    fn rebuild_keeps_sixteen_bit() {
        let gray = GrayImage::from_fn(2, 2, |x, _| Luma([x as u8 * 100]));
        let src = DynamicImage::ImageLuma16(DynamicImage::ImageLuma8(gray).to_luma16());
        let out = rebuild(&src);
        assert_eq!(out.color(), image::ColorType::L16);
        assert_eq!(out.as_bytes(), src.as_bytes());
    }

    #[test]
    fn orientation_rotates_dimensions() {
        let src = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 2, Rgb([1, 2, 3])));
        let out = apply_orientation(src, Orientation::Rotate90);
        assert_eq!((out.width(), out.height()), (2, 4));
    }

    #[test]
    fn orientation_moves_pixels() {
        let mut src = RgbImage::new(2, 1);
        src.put_pixel(0, 0, Rgb([255, 0, 0]));
        src.put_pixel(1, 0, Rgb([0, 0, 255]));

        let out = apply_orientation(DynamicImage::ImageRgb8(src), Orientation::FlipHorizontal);
        let out = out.to_rgb8();
        assert_eq!(out.get_pixel(0, 0).0, [0, 0, 255]);
        assert_eq!(out.get_pixel(1, 0).0, [255, 0, 0]);
    }

    #[test]
    fn no_transform_is_identity() {
        let src = DynamicImage::ImageRgb8(RgbImage::from_fn(3, 3, |x, y| Rgb([x as u8, y as u8, 0])));
        let out = apply_orientation(src.clone(), Orientation::NoTransforms);
        assert_eq!(out, src);
    }
}
