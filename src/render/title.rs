//! Title area composition: either a legacy single-style title or a stacked
//! main/sub pair anchored to a shared title-area Y.

use crate::assets::fonts::FontRegistry;
use crate::foundation::error::{PreviewError, PreviewResult};
use crate::layout::metrics::{TextKind, scaled_font_px, title_area_y};
use crate::render::paint::Surface;
use crate::render::text::{Region, TextElement, TextPainter, TextPlacement};
use crate::style::model::{FontStyle, PlaceholderMode, TitleConfig, TitleContent};

const LEGACY_PLACEHOLDER: &str = "示例标题文本";
const MAIN_PLACEHOLDER: &str = "主标题示例";
const SUB_PLACEHOLDER: &str = "副标题示例";
const FALLBACK_TEXT: &str = "标题预览";
const DEFAULT_SPACING: f64 = 20.0;

/// Draw the title block for `config`. Never fails: per-element problems
/// drop that element, and a title-level problem falls back to a neutral
/// placeholder title.
pub fn draw_title(
    painter: &mut TextPainter,
    surface: &mut Surface,
    registry: &mut FontRegistry,
    region: Region,
    config: &TitleConfig,
    mode: PlaceholderMode,
) {
    if let Err(err) = draw_title_inner(painter, surface, registry, region, config, mode) {
        tracing::warn!(error = %err, "title block failed, drawing fallback");
        let fallback = FontStyle {
            color: Some("#000000".to_owned()),
            position: Some(config.position),
            font_size: Some(32.0),
            ..FontStyle::default()
        };
        painter.draw(
            surface,
            registry,
            region,
            TextElement {
                text: FALLBACK_TEXT,
                style: &fallback,
                kind: TextKind::Title,
                placement: TextPlacement::Anchored,
            },
        );
    }
}

fn draw_title_inner(
    painter: &mut TextPainter,
    surface: &mut Surface,
    registry: &mut FontRegistry,
    region: Region,
    config: &TitleConfig,
    mode: PlaceholderMode,
) -> PreviewResult<()> {
    if !(region.width.is_finite() && region.height.is_finite() && region.width > 0.0) {
        return Err(PreviewError::validation("title region is degenerate"));
    }

    match config.content() {
        TitleContent::Empty => Ok(()),
        TitleContent::Legacy(style) => {
            let mut style = style;
            style.color.get_or_insert_with(|| "#000000".to_owned());
            let text = match (style.text.clone(), mode) {
                (Some(t), _) if !t.is_empty() => t,
                (_, PlaceholderMode::Preview) => LEGACY_PLACEHOLDER.to_owned(),
                (_, PlaceholderMode::Production) => return Ok(()),
            };
            painter.draw(
                surface,
                registry,
                region,
                TextElement {
                    text: &text,
                    style: &style,
                    kind: TextKind::Title,
                    placement: TextPlacement::Anchored,
                },
            );
            Ok(())
        }
        TitleContent::MainSub { main, sub } => {
            let plan = layout_title_lines(config, region.height, region.offset_y, region.scale())?;

            if let (Some(main), Some(y)) = (main, plan.main_y) {
                let mut style = main;
                style.color.get_or_insert_with(|| "#000000".to_owned());
                let text = display_text(style.text.as_deref(), MAIN_PLACEHOLDER, mode);
                painter.draw(
                    surface,
                    registry,
                    region,
                    TextElement {
                        text,
                        style: &style,
                        kind: TextKind::Title,
                        placement: TextPlacement::Absolute {
                            y,
                            alignment: config.alignment,
                        },
                    },
                );
            }

            if let (Some(sub), Some(y)) = (sub, plan.sub_y) {
                let mut style = sub;
                style.color.get_or_insert_with(|| "#ffff00".to_owned());
                let text = display_text(style.text.as_deref(), SUB_PLACEHOLDER, mode);
                painter.draw(
                    surface,
                    registry,
                    region,
                    TextElement {
                        text,
                        style: &style,
                        kind: TextKind::Title,
                        placement: TextPlacement::Absolute {
                            y,
                            alignment: config.alignment,
                        },
                    },
                );
            }
            Ok(())
        }
    }
}

/// Planned top Y for the stacked title lines. `None` means that line is
/// not drawn (absent style or non-positive size).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TitleAreaPlan {
    pub main_y: Option<f64>,
    pub sub_y: Option<f64>,
}

/// Pure placement pass for the main/sub title stack: the title-area anchor
/// plus the main line's scaled height and spacing decide where the sub
/// line lands.
pub fn layout_title_lines(
    config: &TitleConfig,
    height: f64,
    offset_y: f64,
    scale: f64,
) -> PreviewResult<TitleAreaPlan> {
    let spacing = config.spacing.unwrap_or(DEFAULT_SPACING);
    if !spacing.is_finite() {
        return Err(PreviewError::validation("title spacing is not finite"));
    }

    let drawn_size = |style: &Option<FontStyle>| -> PreviewResult<Option<f64>> {
        match style.as_ref().and_then(|s| s.font_size).filter(|v| *v > 0.0) {
            Some(v) if !v.is_finite() => {
                Err(PreviewError::validation("title font size is not finite"))
            }
            other => Ok(other),
        }
    };

    let mut current_y = title_area_y(config.position, height, offset_y);
    let mut plan = TitleAreaPlan::default();

    if let Some(size) = drawn_size(&config.main_title)? {
        plan.main_y = Some(current_y);
        current_y += scaled_font_px(size, scale) + spacing * scale;
    }
    if drawn_size(&config.sub_title)?.is_some() {
        plan.sub_y = Some(current_y);
    }
    Ok(plan)
}

/// An empty configured text shows a sample string in preview mode and
/// stays literally empty in production mode.
fn display_text<'a>(
    configured: Option<&'a str>,
    placeholder: &'a str,
    mode: PlaceholderMode,
) -> &'a str {
    match configured {
        Some(t) if !t.is_empty() => t,
        _ => match mode {
            PlaceholderMode::Preview => placeholder,
            PlaceholderMode::Production => "",
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/title.rs"]
mod tests;
