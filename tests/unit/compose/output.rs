use super::*;

fn frame_2x1() -> StripFrame {
    StripFrame {
        width: 2,
        height: 1,
        data: vec![255, 0, 0, 255, 64, 0, 0, 128],
        premultiplied: true,
    }
}

#[test]
fn pixel_bounds() {
    let f = frame_2x1();
    assert_eq!(f.pixel(1, 0), Some([64, 0, 0, 128]));
    assert_eq!(f.pixel(2, 0), None);
    assert_eq!(f.pixel(0, 1), None);
}

#[test]
fn to_rgba_image_unpremultiplies() {
    let img = frame_2x1().to_rgba_image().unwrap();
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
    let p = img.get_pixel(1, 0).0;
    assert_eq!(p[3], 128);
    assert!((i16::from(p[0]) - 128).abs() <= 1);
}

#[test]
fn encode_png_decodes_back() {
    let bytes = frame_2x1().encode_png().unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    let back = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(back.dimensions(), (2, 1));
    assert_eq!(back.get_pixel(0, 0).0, [255, 0, 0, 255]);
}

#[test]
fn mismatched_buffer_is_an_encode_error() {
    let f = StripFrame {
        width: 3,
        height: 3,
        data: vec![0; 4],
        premultiplied: false,
    };
    assert!(matches!(f.encode_png(), Err(BoothError::Encode(_))));
}

#[test]
fn write_png_creates_parent_dirs() {
    let dir = std::path::PathBuf::from("target")
        .join("unit_output")
        .join("nested");
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("strip.png");
    frame_2x1().write_png(&path).unwrap();
    assert!(path.is_file());
}
