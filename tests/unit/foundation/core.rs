use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(60, 0).is_err());
    let fps = Fps::new(60, 1).unwrap();
    assert_eq!(fps.secs_to_frames_floor(1.5), 90);
    assert!((fps.frame_duration_secs() - 1.0 / 60.0).abs() < 1e-12);
}

#[test]
fn hex_colors_parse() {
    assert_eq!(Rgba8::from_hex("#3b82f6").unwrap(), Rgba8::rgb(0x3b, 0x82, 0xf6));
    assert_eq!(Rgba8::from_hex("#fff").unwrap(), Rgba8::rgb(255, 255, 255));
    assert_eq!(Rgba8::from_hex("#00000080").unwrap().a, 0x80);
    assert!(Rgba8::from_hex("3b82f6").is_err());
    assert!(Rgba8::from_hex("#12345").is_err());
    assert!(Rgba8::from_hex("#zzzzzz").is_err());
}

#[test]
fn property_defaults_are_neutral() {
    assert_eq!(Property::Opacity.default_value(), PropertyValue::Number(1.0));
    assert_eq!(Property::Scale.default_value(), PropertyValue::Number(1.0));
    assert_eq!(Property::Blur.default_value(), PropertyValue::Number(0.0));
    assert_eq!(Property::Text.default_value(), PropertyValue::Text(String::new()));
}

#[test]
fn element_box_bottom() {
    let b = ElementBox::new(100.0, 50.0);
    assert_eq!(b.bottom(), 150.0);
    assert_eq!(ElementBox::new(0.0, -3.0).height, 0.0);
}
