use super::*;

#[test]
fn helper_constructors_pick_variants() {
    assert!(matches!(
        PreviewError::validation("bad"),
        PreviewError::Validation(_)
    ));
    assert!(matches!(PreviewError::asset("bad"), PreviewError::Asset(_)));
    assert!(matches!(PreviewError::draw("bad"), PreviewError::Draw(_)));
}

#[test]
fn display_includes_category_and_message() {
    let err = PreviewError::validation("spacing is not finite");
    assert_eq!(err.to_string(), "validation error: spacing is not finite");

    let err = PreviewError::asset("missing poster");
    assert_eq!(err.to_string(), "asset error: missing poster");
}

#[test]
fn anyhow_errors_convert_transparently() {
    fn fails() -> PreviewResult<()> {
        Err(anyhow::anyhow!("decoder exploded"))?;
        Ok(())
    }
    let err = fails().unwrap_err();
    assert!(matches!(err, PreviewError::Other(_)));
    assert_eq!(err.to_string(), "decoder exploded");
}
