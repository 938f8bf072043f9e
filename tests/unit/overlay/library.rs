use std::io::Cursor;

use super::*;

fn png(rgba: [u8; 4]) -> Arc<[u8]> {
    let img = image::RgbaImage::from_pixel(3, 9, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf.into()
}

fn encoded(name: &str, rgba: [u8; 4]) -> OverlayResource {
    OverlayResource::Encoded {
        name: name.to_string(),
        bytes: png(rgba),
    }
}

fn three() -> OverlayLibrary {
    OverlayLibrary::new(vec![
        encoded("a", [255, 0, 0, 255]),
        encoded("b", [0, 255, 0, 255]),
        encoded("c", [0, 0, 255, 255]),
    ])
    .unwrap()
}

#[test]
fn empty_library_is_rejected() {
    assert!(OverlayLibrary::new(Vec::new()).is_err());
}

#[test]
fn index_math_wraps_both_ways() {
    let lib = three();
    assert_eq!(lib.index(), 0);
    assert_eq!(lib.next_index(), 1);
    assert_eq!(lib.previous_index(), 2);
    assert!(lib.current().is_none());
    assert!(!lib.is_empty());
}

#[test]
fn next_and_previous_cycle_and_load() {
    let mut lib = three();
    let img = pollster::block_on(lib.next()).unwrap();
    assert_eq!(img.pixel(0, 0).unwrap(), [0, 255, 0, 255]);
    assert_eq!(lib.index(), 1);

    pollster::block_on(lib.next()).unwrap();
    pollster::block_on(lib.next()).unwrap();
    assert_eq!(lib.index(), 0);

    let img = pollster::block_on(lib.previous()).unwrap();
    assert_eq!(img.pixel(0, 0).unwrap(), [0, 0, 255, 255]);
    assert_eq!(lib.index(), 2);
}

#[test]
fn failed_load_keeps_prior_overlay() {
    let mut lib = OverlayLibrary::new(vec![
        encoded("good", [9, 9, 9, 255]),
        OverlayResource::Encoded {
            name: "corrupt".to_string(),
            bytes: Arc::from(&b"not a png"[..]),
        },
        OverlayResource::File(PathBuf::from("target/definitely/missing.png")),
    ])
    .unwrap();
    pollster::block_on(lib.ensure_loaded()).unwrap();

    let err = pollster::block_on(lib.next()).unwrap_err();
    assert!(err.is_load());
    assert!(err.to_string().contains("corrupt"));
    assert_eq!(lib.index(), 0);
    assert_eq!(lib.current().unwrap().pixel(0, 0).unwrap(), [9, 9, 9, 255]);

    let err = pollster::block_on(lib.previous()).unwrap_err();
    assert!(err.is_load());
    assert!(err.to_string().contains("missing.png"));
    assert_eq!(lib.index(), 0);
}

#[test]
fn load_out_of_range_is_a_load_error() {
    let lib = three();
    assert!(pollster::block_on(lib.load(3)).unwrap_err().is_load());
}

#[test]
fn from_config_resolves_against_assets_root() {
    let cfg = BoothConfig::default();
    let lib = OverlayLibrary::from_config(&cfg, Path::new("booth")).unwrap();
    assert_eq!(lib.len(), 3);
    assert_eq!(
        lib.resource(1),
        Some(&OverlayResource::File(PathBuf::from(
            "booth/assets/template2.png"
        )))
    );
}

#[test]
fn file_resources_load_from_disk() {
    let dir = PathBuf::from("target").join("unit_overlay");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("frame.png");
    std::fs::write(&path, png([1, 2, 3, 255])).unwrap();

    let mut lib = OverlayLibrary::new(vec![OverlayResource::File(path)]).unwrap();
    let img = pollster::block_on(lib.ensure_loaded()).unwrap();
    assert_eq!((img.width(), img.height()), (3, 9));
    // Single-entry library wraps onto itself.
    assert_eq!(lib.next_index(), 0);
    assert_eq!(lib.previous_index(), 0);
}
