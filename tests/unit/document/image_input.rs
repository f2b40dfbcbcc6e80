use super::*;

const MIB: usize = 1024 * 1024;

fn tiny_png() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

#[test]
fn png_becomes_data_url() {
    let png = tiny_png();
    let pic = ProfilePicture::from_bytes(&png, MIB).unwrap();
    assert_eq!(pic.format(), PictureFormat::Png);
    assert!(pic.data_url().starts_with("data:image/png;base64,"));

    let back = parse_data_url(pic.data_url()).unwrap();
    assert_eq!(back.format, PictureFormat::Png);
    assert_eq!(back.bytes, png);
}

#[test]
fn oversized_input_is_rejected_with_message() {
    let mut big = tiny_png();
    big.resize(MIB + 1, 0);
    let err = ProfilePicture::from_bytes(&big, MIB).unwrap_err();
    assert_eq!(err.user_message(), "Image must be smaller than 1MB");
}

#[test]
fn exactly_at_ceiling_is_accepted() {
    let mut png = tiny_png();
    png.resize(1024, 0);
    assert!(ProfilePicture::from_bytes(&png, 1024).is_ok());
}

#[test]
fn svg_is_sniffed() {
    let svg = br#"<?xml version="1.0"?><svg xmlns="http://www.w3.org/2000/svg" width="4" height="4"></svg>"#;
    let pic = ProfilePicture::from_bytes(svg, MIB).unwrap();
    assert_eq!(pic.format(), PictureFormat::Svg);
    assert!(pic.data_url().starts_with("data:image/svg+xml;base64,"));
}

#[test]
fn unknown_bytes_are_rejected() {
    let err = ProfilePicture::from_bytes(b"hello world", MIB).unwrap_err();
    assert!(matches!(err, VitaeError::Validation(_)));
}

#[test]
fn malformed_data_urls_are_rejected() {
    assert!(parse_data_url("http://example.com/a.png").is_err());
    assert!(parse_data_url("data:image/png,rawbytes").is_err());
    assert!(parse_data_url("data:image/png;base64,@@@").is_err());
}
