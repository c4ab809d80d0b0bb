use super::*;

use crate::style::model::Position;

fn style_with_size(size: Option<f64>) -> FontStyle {
    FontStyle {
        font_size: size,
        ..FontStyle::default()
    }
}

#[test]
fn stacked_lines_advance_by_scaled_height_and_spacing() {
    // A 1200x1215 region clamps the video width to exactly 1080, so the
    // canonical scale is 1 and sizes pass through unscaled.
    let config = TitleConfig {
        main_title: Some(style_with_size(Some(64.0))),
        sub_title: Some(style_with_size(Some(48.0))),
        position: Position::Top,
        spacing: Some(20.0),
        ..TitleConfig::default()
    };
    let plan = layout_title_lines(&config, 1215.0, 0.0, 1.0).unwrap();
    assert_eq!(plan.main_y, Some(20.0));
    assert_eq!(plan.sub_y, Some(20.0 + 64.0 + 20.0));
}

#[test]
fn spacing_and_height_shrink_with_the_scale() {
    let config = TitleConfig {
        main_title: Some(style_with_size(Some(64.0))),
        sub_title: Some(style_with_size(Some(48.0))),
        position: Position::Top,
        spacing: Some(20.0),
        ..TitleConfig::default()
    };
    let scale = 0.205;
    let plan = layout_title_lines(&config, 416.0, 32.0, scale).unwrap();
    assert_eq!(plan.main_y, Some(52.0));
    let expected = 52.0 + (64.0 * scale).round().max(6.0) + 20.0 * scale;
    assert!((plan.sub_y.unwrap() - expected).abs() < 1e-9);
}

#[test]
fn absent_main_puts_the_sub_line_on_the_anchor() {
    let config = TitleConfig {
        sub_title: Some(style_with_size(Some(48.0))),
        position: Position::Bottom,
        ..TitleConfig::default()
    };
    let plan = layout_title_lines(&config, 400.0, 0.0, 1.0).unwrap();
    assert_eq!(plan.main_y, None);
    assert_eq!(plan.sub_y, Some(300.0));
}

#[test]
fn zero_sized_lines_are_skipped() {
    let config = TitleConfig {
        main_title: Some(style_with_size(Some(0.0))),
        sub_title: Some(style_with_size(None)),
        ..TitleConfig::default()
    };
    let plan = layout_title_lines(&config, 400.0, 0.0, 1.0).unwrap();
    assert_eq!(plan, TitleAreaPlan::default());
}

#[test]
fn non_finite_inputs_are_rejected() {
    let config = TitleConfig {
        main_title: Some(style_with_size(Some(64.0))),
        spacing: Some(f64::NAN),
        ..TitleConfig::default()
    };
    assert!(layout_title_lines(&config, 400.0, 0.0, 1.0).is_err());

    let config = TitleConfig {
        main_title: Some(style_with_size(Some(f64::INFINITY))),
        ..TitleConfig::default()
    };
    assert!(layout_title_lines(&config, 400.0, 0.0, 1.0).is_err());
}

#[test]
fn empty_title_draws_nothing() {
    let mut painter = TextPainter::new();
    let mut registry = FontRegistry::new();
    let mut surface = Surface::new(246, 416);
    let region = Region {
        width: 246.0,
        height: 416.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };
    draw_title(
        &mut painter,
        &mut surface,
        &mut registry,
        region,
        &TitleConfig::default(),
        PlaceholderMode::Preview,
    );
    assert!(surface.frame_bytes().iter().all(|&b| b == 0));
}

#[test]
fn production_mode_skips_legacy_placeholder() {
    let mut painter = TextPainter::new();
    let mut registry = FontRegistry::new();
    let mut surface = Surface::new(246, 416);
    let region = Region {
        width: 246.0,
        height: 416.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };
    let config = TitleConfig {
        font_size: Some(48.0),
        ..TitleConfig::default()
    };
    draw_title(
        &mut painter,
        &mut surface,
        &mut registry,
        region,
        &config,
        PlaceholderMode::Production,
    );
    assert!(surface.frame_bytes().iter().all(|&b| b == 0));
}
