use super::*;

#[test]
fn resolution_presets_are_bit_exact() {
    let c = Resolution::TwoK.canvas(AspectRatio::Landscape);
    assert_eq!((c.width, c.height), (1920, 1080));
    let c = Resolution::TwoK.canvas(AspectRatio::Portrait);
    assert_eq!((c.width, c.height), (1080, 1920));
    let c = Resolution::FourK.canvas(AspectRatio::Landscape);
    assert_eq!((c.width, c.height), (3840, 2160));
    let c = Resolution::FourK.canvas(AspectRatio::Portrait);
    assert_eq!((c.width, c.height), (2160, 3840));
}

#[test]
fn labels_parse_back() {
    for aspect in [AspectRatio::Landscape, AspectRatio::Portrait] {
        assert_eq!(aspect.label().parse::<AspectRatio>().unwrap(), aspect);
    }
    for res in Resolution::ALL {
        assert_eq!(res.label().parse::<Resolution>().unwrap(), res);
    }
    assert_eq!("4k".parse::<Resolution>().unwrap(), Resolution::FourK);
    assert_eq!(
        "portrait".parse::<AspectRatio>().unwrap(),
        AspectRatio::Portrait
    );
    assert!("1:1".parse::<AspectRatio>().is_err());
    assert!("8K".parse::<Resolution>().is_err());
}

#[test]
fn serde_uses_display_labels() {
    let json = serde_json::to_string(&(AspectRatio::Portrait, Resolution::FourK)).unwrap();
    assert_eq!(json, r#"["9:16","4K"]"#);
    let back: (AspectRatio, Resolution) = serde_json::from_str(r#"["landscape","2k"]"#).unwrap();
    assert_eq!(back, (AspectRatio::Landscape, Resolution::TwoK));
}

#[test]
fn inset_shrinks_symmetrically_and_keeps_a_pixel() {
    let r = PixelRect::new(10, 20, 200, 100).inset(0.05);
    assert_eq!(r, PixelRect::new(20, 25, 180, 90));

    let tiny = PixelRect::new(0, 0, 3, 1).inset(0.5);
    assert_eq!(tiny, PixelRect::new(1, 0, 1, 1));

    assert_eq!(PixelRect::new(5, 5, 40, 40).inset(0.0), PixelRect::new(5, 5, 40, 40));
}

#[test]
fn rect_edges_and_offset() {
    let r = PixelRect::new(3, 4, 10, 20);
    assert_eq!(r.right(), 13);
    assert_eq!(r.bottom(), 24);
    assert_eq!(r.offset(2, 1), PixelRect::new(5, 5, 10, 20));
    assert!(PixelRect::new(0, 0, 0, 5).is_empty());
}
