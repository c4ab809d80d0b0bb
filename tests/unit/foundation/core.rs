use super::*;

#[test]
fn canvas_default_is_preview_size() {
    let canvas = Canvas::default();
    assert_eq!(canvas.width, 270);
    assert_eq!(canvas.height, 480);
    assert!(!canvas.is_empty());
}

#[test]
fn canvas_zero_dimension_is_empty() {
    assert!(
        Canvas {
            width: 0,
            height: 480
        }
        .is_empty()
    );
    assert!(
        Canvas {
            width: 270,
            height: 0
        }
        .is_empty()
    );
}

#[test]
fn premultiply_straight_rgba() {
    let px = Rgba8Premul::from_straight_rgba(255, 128, 0, 255);
    assert_eq!(px.to_array(), [255, 128, 0, 255]);

    let px = Rgba8Premul::from_straight_rgba(255, 255, 255, 0);
    assert_eq!(px.to_array(), [0, 0, 0, 0]);

    let px = Rgba8Premul::from_straight_rgba(200, 100, 50, 128);
    assert_eq!(px.to_array(), [100, 50, 25, 128]);
}

#[test]
fn frame_pixel_lookup_and_bounds() {
    let frame = FrameRgba {
        width: 2,
        height: 2,
        data: vec![
            1, 2, 3, 4, 5, 6, 7, 8, //
            9, 10, 11, 12, 13, 14, 15, 16,
        ],
    };
    assert_eq!(frame.pixel(0, 0), Some([1, 2, 3, 4]));
    assert_eq!(frame.pixel(1, 1), Some([13, 14, 15, 16]));
    assert_eq!(frame.pixel(2, 0), None);
    assert_eq!(frame.pixel(0, 2), None);
}

#[test]
fn encode_png_round_trips_opaque_pixels() {
    let frame = FrameRgba {
        width: 2,
        height: 1,
        data: vec![255, 0, 0, 255, 0, 0, 255, 255],
    };
    let png = frame.encode_png().unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (2, 1));
    assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(decoded.get_pixel(1, 0).0, [0, 0, 255, 255]);
}

#[test]
fn encode_png_unpremultiplies() {
    let frame = FrameRgba {
        width: 1,
        height: 1,
        data: vec![100, 50, 25, 128],
    };
    let png = frame.encode_png().unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    let [r, g, b, a] = decoded.get_pixel(0, 0).0;
    assert_eq!(a, 128);
    assert!((i32::from(r) - 199).abs() <= 1);
    assert!((i32::from(g) - 100).abs() <= 1);
    assert!((i32::from(b) - 50).abs() <= 1);
}

#[test]
fn encode_png_rejects_mismatched_data() {
    let frame = FrameRgba {
        width: 4,
        height: 4,
        data: vec![0; 8],
    };
    assert!(frame.encode_png().is_err());
}
