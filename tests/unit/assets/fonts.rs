use std::borrow::Cow;

use super::*;

fn spec(size: f32) -> TextShapeSpec<'static> {
    TextShapeSpec {
        stack: Cow::Borrowed(FALLBACK_FONT_STACK),
        size_px: size,
        brush: TextBrushRgba8 {
            r: 255,
            g: 255,
            b: 255,
            a: 255,
        },
        bold: false,
        italic: false,
        letter_spacing: None,
    }
}

#[test]
fn stack_resolution_rules() {
    let registry = FontRegistry::new();

    // No family at all falls back.
    assert_eq!(registry.resolved_stack(None, false), FALLBACK_FONT_STACK);
    assert_eq!(registry.resolved_stack(Some(""), true), FALLBACK_FONT_STACK);

    // A family without a source passes through with the fallback appended.
    assert_eq!(
        registry.resolved_stack(Some("CustomFont"), false),
        format!("CustomFont, {FALLBACK_FONT_STACK}")
    );

    // A sourced family not yet loaded resolves to the fallback only.
    assert_eq!(
        registry.resolved_stack(Some("CustomFont"), true),
        FALLBACK_FONT_STACK
    );
}

#[test]
fn load_without_source_is_a_noop() {
    let mut registry = FontRegistry::new();
    registry.load(std::env::temp_dir().as_path(), "SomeFamily", None);
    assert!(!registry.is_loaded("SomeFamily"));
    assert_eq!(registry.generation(), 0);
}

#[test]
fn failed_load_records_family_with_fallback_stack() {
    let mut registry = FontRegistry::new();
    let root = std::env::temp_dir().join("mixpreview-fonts-test");
    std::fs::create_dir_all(&root).unwrap();

    registry.load(&root, "GhostFamily", Some("missing/font.ttf"));

    // Family recorded so later renders do not retry, resolving to fallback.
    assert!(registry.is_loaded("GhostFamily"));
    assert_eq!(registry.generation(), 1);
    assert_eq!(
        registry.resolved_stack(Some("GhostFamily"), true),
        FALLBACK_FONT_STACK
    );

    // Re-loading the same family does not bump the generation again.
    registry.load(&root, "GhostFamily", Some("missing/font.ttf"));
    assert_eq!(registry.generation(), 1);
}

#[test]
fn layout_rejects_non_positive_size() {
    let mut registry = FontRegistry::new();
    assert!(registry.layout("字幕", &spec(0.0)).is_err());
    assert!(registry.layout("字幕", &spec(-3.0)).is_err());
    assert!(registry.layout("字幕", &spec(f32::NAN)).is_err());
}

#[test]
fn layout_of_plain_text_succeeds() {
    let mut registry = FontRegistry::new();
    let layout = registry.layout("hello", &spec(16.0)).unwrap();
    assert!(layout.width() >= 0.0);
}
