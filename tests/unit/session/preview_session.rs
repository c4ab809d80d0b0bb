use super::*;

fn session() -> PreviewSession {
    PreviewSession::new(std::env::temp_dir())
}

#[test]
fn fresh_session_needs_a_first_draw() {
    let mut s = session();
    assert!(s.needs_redraw());
    s.render().unwrap();
    assert!(!s.needs_redraw());
}

#[test]
fn config_changes_invalidate_the_frame() {
    let mut s = session();
    s.render().unwrap();

    s.set_config_json(r#"{"title": {"fontSize": 48}, "subtitle": {}}"#)
        .unwrap();
    assert!(s.needs_redraw());
    s.render().unwrap();
    assert!(!s.needs_redraw());
}

#[test]
fn unchanged_canvas_does_not_invalidate() {
    let mut s = session();
    s.render().unwrap();

    s.set_canvas(s.canvas());
    assert!(!s.needs_redraw());

    s.set_canvas(Canvas {
        width: 540,
        height: 960,
    });
    assert!(s.needs_redraw());
}

#[test]
fn unchanged_mode_does_not_invalidate() {
    let mut s = session();
    s.render().unwrap();

    s.set_placeholder_mode(PlaceholderMode::Preview);
    assert!(!s.needs_redraw());
    s.set_placeholder_mode(PlaceholderMode::Production);
    assert!(s.needs_redraw());
}

#[test]
fn missing_poster_still_marks_the_frame_stale() {
    let mut s = session();
    s.render().unwrap();

    s.set_poster_url(Some("/covers/does-not-exist.png"));
    assert!(!s.poster_loaded());
    // The URL changed even though the load failed, so the synthetic
    // background must be redrawn.
    assert!(s.needs_redraw());
}

#[test]
fn same_poster_url_is_a_noop() {
    let mut s = session();
    s.set_poster_url(Some("/covers/a.png"));
    s.render().unwrap();
    s.set_poster_url(Some("/covers/a.png"));
    assert!(!s.needs_redraw());

    s.set_poster_url(None);
    assert!(s.needs_redraw());
}

#[test]
fn invalid_config_json_leaves_state_alone() {
    let mut s = session();
    s.render().unwrap();
    assert!(s.set_config_json("{not json").is_err());
    assert!(!s.needs_redraw());
}

#[test]
fn zero_canvas_renders_an_empty_frame() {
    let mut s = session();
    s.set_canvas(Canvas {
        width: 0,
        height: 0,
    });
    let frame = s.render().unwrap();
    assert!(frame.data.is_empty());
    assert!(!s.needs_redraw());
}

#[test]
fn config_with_font_family_but_no_url_loads_nothing() {
    let mut s = session();
    s.set_config_json(
        r#"{"title": {"fontSize": 48, "fontFamily": "MissingFamily"}, "subtitle": {}}"#,
    )
    .unwrap();
    // Without a fontUrl there is nothing to fetch, so rendering falls back
    // to the system stack without error.
    s.render().unwrap();
}
