#![allow(dead_code)]

use image::codecs::jpeg::JpegEncoder;
use image::{ImageEncoder, RgbImage};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

pub const TAG_MAKE: u16 = 0x010F;
pub const TAG_ORIENTATION: u16 = 0x0112;
pub const TAG_GPS_LATITUDE_REF: u16 = 0x0001;

/// A little-endian TIFF/EXIF block with Make, Orientation and a GPS IFD
/// holding a latitude.
pub fn exif_block(orientation: u16) -> Vec<u8> {
    fn entry(out: &mut Vec<u8>, tag: u16, kind: u16, count: u32, value: u32) {
        out.extend_from_slice(&tag.to_le_bytes());
        out.extend_from_slice(&kind.to_le_bytes());
        out.extend_from_slice(&count.to_le_bytes());
        out.extend_from_slice(&value.to_le_bytes());
    }

    const ASCII: u16 = 2;
    const SHORT: u16 = 3;
    const LONG: u16 = 4;
    const RATIONAL: u16 = 5;

    let make = b"TestCam\0";
    let ifd0_len = 2 + 3 * 12 + 4;
    let make_offset = 8 + ifd0_len;
    let gps_offset = make_offset + make.len();
    let gps_len = 2 + 2 * 12 + 4;
    let latitude_offset = gps_offset + gps_len;

    let mut t = Vec::new();
    t.extend_from_slice(b"II*\0");
    t.extend_from_slice(&8u32.to_le_bytes());

    // IFD0
    t.extend_from_slice(&3u16.to_le_bytes());
    entry(&mut t, TAG_MAKE, ASCII, make.len() as u32, make_offset as u32);
    entry(&mut t, TAG_ORIENTATION, SHORT, 1, u32::from(orientation));
    entry(&mut t, 0x8825, LONG, 1, gps_offset as u32);
    t.extend_from_slice(&0u32.to_le_bytes());
    t.extend_from_slice(make);

    // GPS IFD
    t.extend_from_slice(&2u16.to_le_bytes());
    entry(&mut t, TAG_GPS_LATITUDE_REF, ASCII, 2, u32::from_le_bytes(*b"N\0\0\0"));
    entry(&mut t, 0x0002, RATIONAL, 3, latitude_offset as u32);
    t.extend_from_slice(&0u32.to_le_bytes());
    for (num, den) in [(48u32, 1u32), (51, 1), (30, 1)] {
        t.extend_from_slice(&num.to_le_bytes());
        t.extend_from_slice(&den.to_le_bytes());
    }
    t
}

/// Encode `img` as JPEG and splice an APP1 EXIF segment right after SOI.
pub fn jpeg_with_exif(img: &RgbImage, orientation: u16) -> Vec<u8> {
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, 95)
        .write_image(img.as_raw(), img.width(), img.height(), image::ExtendedColorType::Rgb8)
        .unwrap();

    let tiff = exif_block(orientation);
    let mut app1 = vec![0xFF, 0xE1];
    app1.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
    app1.extend_from_slice(b"Exif\0\0");
    app1.extend_from_slice(&tiff);

    let mut out = jpeg[..2].to_vec();
    out.extend_from_slice(&app1);
    out.extend_from_slice(&jpeg[2..]);
    out
}

pub fn write_jpeg_with_exif(path: &Path, img: &RgbImage, orientation: u16) {
    fs::write(path, jpeg_with_exif(img, orientation)).unwrap();
}

/// Write a 2x2 palette PNG; `with_alpha` adds a tRNS chunk making index 1 transparent.
pub fn write_palette_png(path: &Path, with_alpha: bool) {
    let writer = BufWriter::new(File::create(path).unwrap());
    let mut encoder = png::Encoder::new(writer, 2, 2);
    encoder.set_color(png::ColorType::Indexed);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_palette(vec![255, 0, 0, 0, 0, 255]);
    if with_alpha {
        encoder.set_trns(vec![255, 0]);
    }
    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(&[0, 1, 1, 0]).unwrap();
}

/// Left half red, right half blue.
pub fn two_tone(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            image::Rgb([255, 0, 0])
        } else {
            image::Rgb([0, 0, 255])
        }
    })
}

pub fn is_reddish(p: image::Rgb<u8>) -> bool {
    p.0[0] > 200 && p.0[2] < 60
}

pub fn is_bluish(p: image::Rgb<u8>) -> bool {
    p.0[2] > 200 && p.0[0] < 60
}

/// A 4x4 RGB PNG carrying an embedded ICC profile (`iCCP`) and a `tEXt` comment.
pub fn write_png_with_profile(path: &Path) {
    let writer = BufWriter::new(File::create(path).unwrap());
    let mut encoder = png::Encoder::new(writer, 4, 4);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().unwrap();

    let mut iccp = b"Test Profile\0\0".to_vec();
    iccp.extend_from_slice(&zlib_stored(ICC_PROFILE));
    writer
        .write_chunk(png::chunk::ChunkType(*b"iCCP"), &iccp)
        .unwrap();
    writer
        .write_chunk(png::chunk::ChunkType(*b"tEXt"), b"Comment\0shot at home")
        .unwrap();
    writer.write_image_data(&[120; 4 * 4 * 3]).unwrap();
}

const ICC_PROFILE: &[u8] = b"not a real profile, just recognizable bytes";

/// Wrap `data` in a zlib stream made of one uncompressed deflate block.
fn zlib_stored(data: &[u8]) -> Vec<u8> {
    let len = data.len() as u16;
    let mut out = vec![0x78, 0x01, 0x01];
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(&(!len).to_le_bytes());
    out.extend_from_slice(data);

    let (mut a, mut b) = (1u32, 0u32);
    for &byte in data {
        a = (a + u32::from(byte)) % 65521;
        b = (b + a) % 65521;
    }
    out.extend_from_slice(&((b << 16) | a).to_be_bytes());
    out
}

/// Chunk type names of a PNG file, in order.
pub fn png_chunk_types(bytes: &[u8]) -> Vec<String> {
    let mut types = Vec::new();
    let mut pos = 8;
    while pos + 8 <= bytes.len() {
        let len = u32::from_be_bytes(bytes[pos..pos + 4].try_into().unwrap()) as usize;
        types.push(String::from_utf8_lossy(&bytes[pos + 4..pos + 8]).into_owned());
        pos += 12 + len;
    }
    types
}
