use super::*;

use image::{Rgba, RgbaImage};
use tempfile::TempDir;

#[test]
fn test_allowed_extensions() {
    assert_eq!(check_extension("page1.png").unwrap(), ImageKind::Png);
    assert_eq!(check_extension("page1.jpg").unwrap(), ImageKind::Jpg);
    assert_eq!(check_extension("scan.v2.jpg").unwrap(), ImageKind::Jpg);
}

#[test]
fn test_unsupported_extension_carries_extension() {
    let err = check_extension("letter.gif").unwrap_err();
    assert!(matches!(&err, FormatError::Unsupported { extension } if extension == "gif"));
    assert!(err.to_string().contains("gif"));
}

#[test]
fn test_extension_match_is_case_sensitive() {
    assert!(matches!(
        check_extension("PAGE.PNG"),
        Err(FormatError::Unsupported { extension }) if extension == "PNG"
    ));
}

#[test]
fn test_name_without_dot_is_its_own_extension() {
    assert_eq!(extension_of("README"), "README");
    assert!(check_extension("README").is_err());
    assert_eq!(extension_of("archive."), "");
}

#[test]
fn test_only_png_needs_conversion() {
    assert!(ImageKind::Png.needs_conversion());
    assert!(!ImageKind::Jpg.needs_conversion());
}

#[test]
fn test_converted_path_is_sibling() {
    assert_eq!(
        converted_path(Path::new("/tmp/sigdetect/page.v1.png")),
        PathBuf::from("/tmp/sigdetect/page.v1.jpg")
    );
}

#[test]
fn test_jpg_passes_through_unchanged() {
    let path = Path::new("/tmp/sigdetect/page.jpg");
    let normalized = normalize(path, ImageKind::Jpg, 1_000).unwrap();
    assert_eq!(normalized, path);
}

#[test]
fn test_png_with_alpha_converted_to_rgb_jpg() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("page.png");
    RgbaImage::from_pixel(6, 4, Rgba([10, 20, 30, 128]))
        .save(&source)
        .unwrap();

    let converted = normalize(&source, ImageKind::Png, 1_000).unwrap();
    assert_eq!(converted, temp.path().join("page.jpg"));

    let decoded = image::open(&converted).unwrap();
    assert_eq!(decoded.color(), image::ColorType::Rgb8);
    assert_eq!((decoded.width(), decoded.height()), (6, 4));
    assert!(source.exists());
}

#[test]
fn test_conversion_of_corrupt_png_fails() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("broken.png");
    std::fs::write(&source, b"not a png").unwrap();

    let result = normalize(&source, ImageKind::Png, 1_000);
    assert!(matches!(result, Err(FormatError::Conversion { .. })));
}

#[test]
fn test_conversion_respects_pixel_limit() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("huge.png");
    RgbaImage::new(40, 40).save(&source).unwrap();

    let result = convert_to_native(&source, 100);
    assert!(matches!(result, Err(FormatError::Conversion { .. })));
}
