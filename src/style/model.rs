//! Style configuration model.
//!
//! Mirrors the JSON shape produced by the authoring frontend: a `title`
//! block (either a legacy single-style shape or a `mainTitle`/`subTitle`
//! pair), a `subtitle` style, and an optional `advanced` block. Decoding is
//! tolerant: every field the renderer can default is optional here, so a
//! partially filled config still previews.

use serde::Deserialize;

use crate::assets::color::{BackgroundDef, BackgroundFields, OpacityDef, Rgba, resolve_background};
use crate::foundation::error::{PreviewError, PreviewResult};

/// Vertical anchor for a text block within the screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Top,
    Center,
    Bottom,
    Template1,
    Template2,
}

/// Horizontal alignment for title-area text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

/// A single text element's styling, shared by the legacy title shape, the
/// `mainTitle`/`subTitle` pair and the subtitle block.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontStyle {
    pub text: Option<String>,
    /// Canonical font size. `None` means "use the kind default", while an
    /// explicit zero or negative size suppresses the element entirely.
    pub font_size: Option<f64>,
    pub color: Option<String>,
    pub position: Option<Position>,
    pub font_family: Option<String>,
    pub font_url: Option<String>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub shadow: bool,
    pub shadow_color: Option<String>,
    pub stroke_color: Option<String>,
    pub stroke_width: Option<f64>,
    pub letter_spacing: Option<f64>,
    pub background: Option<BackgroundDef>,
    #[serde(rename = "background_color", alias = "backgroundColor")]
    pub background_color: Option<String>,
    #[serde(rename = "background_opacity", alias = "backgroundOpacity")]
    pub background_opacity: Option<OpacityDef>,
    pub opacity: Option<OpacityDef>,
}

impl FontStyle {
    /// Fill color, falling back to the given CSS color when unset or
    /// unparsable.
    pub fn fill_color_or(&self, fallback: &str) -> Rgba {
        self.color
            .as_deref()
            .and_then(|c| crate::assets::color::parse_css_color(c, None))
            .or_else(|| crate::assets::color::parse_css_color(fallback, None))
            .unwrap_or(Rgba::new(0, 0, 0, 1.0))
    }

    /// Resolved background color, if any of the background fields parse.
    pub fn background_rgba(&self) -> Option<Rgba> {
        resolve_background(BackgroundFields {
            nested: self.background.as_ref(),
            flat_color: self.background_color.as_deref(),
            flat_opacity: self.background_opacity.as_ref().or(self.opacity.as_ref()),
        })
    }
}

/// The `title` block: either a legacy single-style shape (flattened fields)
/// or a `mainTitle`/`subTitle` pair, plus container-level layout fields.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleConfig {
    pub main_title: Option<FontStyle>,
    pub sub_title: Option<FontStyle>,
    #[serde(default)]
    pub position: Position,
    pub spacing: Option<f64>,
    #[serde(default)]
    pub alignment: Alignment,
    // Legacy single-style fields.
    pub color: Option<String>,
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
    pub font_url: Option<String>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub shadow: bool,
    pub shadow_color: Option<String>,
    pub stroke_color: Option<String>,
    pub stroke_width: Option<f64>,
    pub letter_spacing: Option<f64>,
    pub background: Option<BackgroundDef>,
    #[serde(rename = "background_color", alias = "backgroundColor")]
    pub background_color: Option<String>,
    #[serde(rename = "background_opacity", alias = "backgroundOpacity")]
    pub background_opacity: Option<OpacityDef>,
    pub opacity: Option<OpacityDef>,
}

/// Normalized title shape. Decoding collapses the legacy/new ambiguity at
/// the boundary so rendering code matches exhaustively instead of probing
/// fields.
#[derive(Clone, Debug)]
pub enum TitleContent {
    /// No renderable title.
    Empty,
    /// Old single-style shape, drawn via the plain text path.
    Legacy(FontStyle),
    /// New shape: main and sub drawn stacked inside the title area.
    MainSub {
        main: Option<FontStyle>,
        sub: Option<FontStyle>,
    },
}

impl TitleConfig {
    /// Collapse the config into its normalized [`TitleContent`].
    pub fn content(&self) -> TitleContent {
        if self.main_title.is_some() || self.sub_title.is_some() {
            return TitleContent::MainSub {
                main: self.main_title.clone(),
                sub: self.sub_title.clone(),
            };
        }
        if self.font_size.is_some_and(|v| v > 0.0) {
            return TitleContent::Legacy(self.legacy_style());
        }
        TitleContent::Empty
    }

    /// The legacy flattened fields viewed as one [`FontStyle`].
    pub fn legacy_style(&self) -> FontStyle {
        FontStyle {
            text: None,
            font_size: self.font_size,
            color: self.color.clone(),
            position: Some(self.position),
            font_family: self.font_family.clone(),
            font_url: self.font_url.clone(),
            bold: self.bold,
            italic: self.italic,
            shadow: self.shadow,
            shadow_color: self.shadow_color.clone(),
            stroke_color: self.stroke_color.clone(),
            stroke_width: self.stroke_width,
            letter_spacing: self.letter_spacing,
            background: self.background.clone(),
            background_color: self.background_color.clone(),
            background_opacity: self.background_opacity.clone(),
            opacity: self.opacity.clone(),
        }
    }
}

/// Advanced-mode toggle carried along with the style.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct AdvancedConfig {
    #[serde(default)]
    pub enabled: bool,
}

/// Top-level style configuration for one preview frame.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    pub title: TitleConfig,
    #[serde(default)]
    pub subtitle: FontStyle,
    pub advanced: Option<AdvancedConfig>,
}

impl StyleConfig {
    /// Decode a config from a JSON string.
    pub fn from_json_str(raw: &str) -> PreviewResult<Self> {
        serde_json::from_str(raw)
            .map_err(|e| PreviewError::validation(format!("invalid style config: {e}")))
    }

    /// Decode a config from an already-parsed JSON value.
    pub fn from_json_value(value: serde_json::Value) -> PreviewResult<Self> {
        serde_json::from_value(value)
            .map_err(|e| PreviewError::validation(format!("invalid style config: {e}")))
    }
}

/// Whether empty text fields are substituted with authoring placeholders.
///
/// Preview mode substitutes sample strings so an empty config still shows
/// the style. Production mode renders empty text as nothing, never burning
/// placeholder strings into output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaceholderMode {
    #[default]
    Preview,
    Production,
}

#[cfg(test)]
#[path = "../../tests/unit/style/model.rs"]
mod tests;
