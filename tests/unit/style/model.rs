use super::*;

#[test]
fn decode_main_sub_shape() {
    let raw = r##"{
        "title": {
            "position": "top",
            "spacing": 20,
            "alignment": "center",
            "mainTitle": { "text": "A", "fontSize": 64, "color": "#ffffff" },
            "subTitle": { "fontSize": 0 }
        },
        "subtitle": { "color": "#ffffff", "position": "bottom", "fontSize": 60 }
    }"##;
    let config = StyleConfig::from_json_str(raw).unwrap();

    assert_eq!(config.title.position, Position::Top);
    assert_eq!(config.title.alignment, Alignment::Center);
    assert_eq!(config.title.spacing, Some(20.0));
    assert_eq!(config.subtitle.position, Some(Position::Bottom));
    assert_eq!(config.subtitle.font_size, Some(60.0));

    match config.title.content() {
        TitleContent::MainSub { main, sub } => {
            let main = main.unwrap();
            assert_eq!(main.text.as_deref(), Some("A"));
            assert_eq!(main.font_size, Some(64.0));
            assert_eq!(sub.unwrap().font_size, Some(0.0));
        }
        other => panic!("expected MainSub, got {other:?}"),
    }
}

#[test]
fn decode_legacy_shape() {
    let raw = r##"{
        "title": {
            "position": "bottom",
            "fontSize": 48,
            "color": "#112233",
            "bold": true,
            "strokeColor": "#000000",
            "strokeWidth": 2
        },
        "subtitle": { "fontSize": 40 }
    }"##;
    let config = StyleConfig::from_json_str(raw).unwrap();

    match config.title.content() {
        TitleContent::Legacy(style) => {
            assert_eq!(style.font_size, Some(48.0));
            assert_eq!(style.color.as_deref(), Some("#112233"));
            assert_eq!(style.position, Some(Position::Bottom));
            assert!(style.bold);
            assert_eq!(style.stroke_width, Some(2.0));
        }
        other => panic!("expected Legacy, got {other:?}"),
    }
}

#[test]
fn empty_title_without_size_or_pair() {
    let config = StyleConfig::from_json_str(r#"{"title": {}, "subtitle": {}}"#).unwrap();
    assert!(matches!(config.title.content(), TitleContent::Empty));

    // An explicit zero size stays empty too.
    let config =
        StyleConfig::from_json_str(r#"{"title": {"fontSize": 0}, "subtitle": {}}"#).unwrap();
    assert!(matches!(config.title.content(), TitleContent::Empty));
}

#[test]
fn container_defaults() {
    let config = TitleConfig::default();
    assert_eq!(config.position, Position::Top);
    assert_eq!(config.alignment, Alignment::Center);
    assert_eq!(PlaceholderMode::default(), PlaceholderMode::Preview);
}

#[test]
fn fill_color_falls_back_per_element() {
    let style = FontStyle {
        color: Some("#102030".into()),
        ..FontStyle::default()
    };
    let c = style.fill_color_or("#ffffff");
    assert_eq!((c.r, c.g, c.b), (0x10, 0x20, 0x30));

    let unset = FontStyle::default().fill_color_or("#ffff00");
    assert_eq!((unset.r, unset.g, unset.b), (255, 255, 0));

    let malformed = FontStyle {
        color: Some("not-a-color".into()),
        ..FontStyle::default()
    };
    let c = malformed.fill_color_or("#000000");
    assert_eq!((c.r, c.g, c.b), (0, 0, 0));
}

#[test]
fn background_fields_resolve_with_nested_priority() {
    let raw = r##"{
        "fontSize": 30,
        "background": { "background_color": "#010203", "background_opacity": "50%" },
        "background_color": "#ffffff",
        "opacity": 1.0
    }"##;
    let style: FontStyle = serde_json::from_str(raw).unwrap();
    let bg = style.background_rgba().unwrap();
    assert_eq!((bg.r, bg.g, bg.b), (1, 2, 3));
    assert!((bg.a - 0.5).abs() < 1e-9);
}

#[test]
fn flat_background_fields_alone_resolve() {
    let raw = r##"{ "fontSize": 30, "backgroundColor": "#0a0b0c", "opacity": 200 }"##;
    let style: FontStyle = serde_json::from_str(raw).unwrap();
    let bg = style.background_rgba().unwrap();
    assert_eq!((bg.r, bg.g, bg.b), (10, 11, 12));
    assert!((bg.a - 200.0 / 255.0).abs() < 1e-9);

    assert!(FontStyle::default().background_rgba().is_none());
}

#[test]
fn invalid_json_is_a_validation_error() {
    let err = StyleConfig::from_json_str("{nope").unwrap_err();
    assert!(err.to_string().contains("invalid style config"));
}

#[test]
fn legacy_style_carries_container_fields() {
    let config = TitleConfig {
        font_size: Some(32.0),
        color: Some("#445566".into()),
        position: Position::Template1,
        italic: true,
        letter_spacing: Some(2.0),
        ..TitleConfig::default()
    };
    let style = config.legacy_style();
    assert_eq!(style.font_size, Some(32.0));
    assert_eq!(style.position, Some(Position::Template1));
    assert!(style.italic);
    assert_eq!(style.letter_spacing, Some(2.0));
}
