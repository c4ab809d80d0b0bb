use std::io::Cursor;

use super::*;

fn png_bytes(width: u32, height: u32, px: image::Rgba<u8>) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, px);
    let mut out = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut out, image::ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

#[test]
fn decode_opaque_png() {
    let bytes = png_bytes(3, 2, image::Rgba([10, 20, 30, 255]));
    let img = decode_image(&bytes).unwrap();
    assert_eq!((img.width, img.height), (3, 2));
    assert_eq!(img.rgba8_premul.len(), 3 * 2 * 4);
    assert_eq!(&img.rgba8_premul[0..4], &[10, 20, 30, 255]);
}

#[test]
fn decode_premultiplies_translucent_pixels() {
    let bytes = png_bytes(1, 1, image::Rgba([200, 100, 50, 128]));
    let img = decode_image(&bytes).unwrap();
    assert_eq!(&img.rgba8_premul[..], &[100, 50, 25, 128]);
}

#[test]
fn fully_transparent_pixels_zero_color_channels() {
    let bytes = png_bytes(1, 1, image::Rgba([200, 100, 50, 0]));
    let img = decode_image(&bytes).unwrap();
    assert_eq!(&img.rgba8_premul[..], &[0, 0, 0, 0]);
}

#[test]
fn garbage_bytes_error() {
    assert!(decode_image(b"not an image").is_err());
}
