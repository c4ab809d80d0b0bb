use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

use crate::assets::poster::resolve_source_path;
use crate::foundation::error::{PreviewError, PreviewResult};

/// Family stack used whenever a custom font is unavailable.
///
/// This mirrors the backend renderer's default; the generic `sans-serif`
/// tail resolves through system fonts when the named family is missing.
pub const FALLBACK_FONT_STACK: &str = "Microsoft YaHei, sans-serif";

/// RGBA8 brush color carried through Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

/// Styling inputs for one shaped text run.
#[derive(Clone, Debug)]
pub struct TextShapeSpec<'a> {
    /// Font family stack (CSS-style comma list).
    pub stack: Cow<'a, str>,
    /// Font size in device pixels (already preview-scaled).
    pub size_px: f32,
    /// Fill brush recorded on the layout.
    pub brush: TextBrushRgba8,
    /// Bold synthesis/selection.
    pub bold: bool,
    /// Italic synthesis/selection.
    pub italic: bool,
    /// Additional letter spacing in device pixels.
    pub letter_spacing: Option<f32>,
}

/// Font-loading capability scoped to one preview instance.
///
/// Replaces the browser's document-wide `FontFace` set: families loaded from
/// a style's `font_url` are registered on this registry's own collection,
/// and draw-time resolution consults only this registry. Loading is
/// best-effort and never fails the caller; a family that cannot be loaded is
/// still recorded so repeated renders do not retry, and text falls back to
/// [`FALLBACK_FONT_STACK`].
pub struct FontRegistry {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    loaded: HashMap<String, String>,
    generation: u64,
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FontRegistry {
    /// Construct a registry with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            loaded: HashMap::new(),
            generation: 0,
        }
    }

    /// Generation counter bumped whenever the loaded-family set changes.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Return `true` when `family` has been recorded by a prior [`load`](Self::load).
    pub fn is_loaded(&self, family: &str) -> bool {
        self.loaded.contains_key(family)
    }

    /// Load a named font from a source URL resolved under `assets_root`.
    ///
    /// No-op when `source` is absent or the family is already recorded.
    /// Failures are logged and swallowed; after the tolerant second attempt
    /// the family is recorded regardless so draw time resolves it (to the
    /// fallback stack when registration never succeeded).
    pub fn load(&mut self, assets_root: &Path, family: &str, source: Option<&str>) {
        let Some(source) = source else { return };
        if family.is_empty() || self.is_loaded(family) {
            return;
        }

        let path = resolve_source_path(assets_root, source);
        let stack = match self.try_register(&path) {
            Ok(registered) => format!("{registered}, {FALLBACK_FONT_STACK}"),
            Err(first) => {
                tracing::warn!(family, source, error = %first, "font load failed, retrying");
                match self.try_register(&path) {
                    Ok(registered) => format!("{registered}, {FALLBACK_FONT_STACK}"),
                    Err(second) => {
                        tracing::warn!(
                            family,
                            source,
                            error = %second,
                            "font load failed twice, using fallback family"
                        );
                        FALLBACK_FONT_STACK.to_owned()
                    }
                }
            }
        };

        self.loaded.insert(family.to_owned(), stack);
        self.generation += 1;
    }

    fn try_register(&mut self, path: &Path) -> PreviewResult<String> {
        let bytes = std::fs::read(path)
            .map_err(|e| PreviewError::asset(format!("read font '{}': {e}", path.display())))?;
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| PreviewError::asset("no font families registered from font bytes"))?;
        let name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| PreviewError::asset("registered font family has no name"))?
            .to_string();
        Ok(name)
    }

    /// Resolve the family stack a style should draw with.
    ///
    /// A custom family is trusted only once its source has been recorded on
    /// this registry; a family without a source is passed through with the
    /// fallback appended, matching the backend renderer.
    pub fn resolved_stack(&self, family: Option<&str>, has_source: bool) -> Cow<'_, str> {
        match family {
            Some(fam) if !fam.is_empty() => {
                if has_source {
                    match self.loaded.get(fam) {
                        Some(stack) => Cow::Borrowed(stack.as_str()),
                        None => Cow::Borrowed(FALLBACK_FONT_STACK),
                    }
                } else {
                    Cow::Owned(format!("{fam}, {FALLBACK_FONT_STACK}"))
                }
            }
            _ => Cow::Borrowed(FALLBACK_FONT_STACK),
        }
    }

    /// Shape and lay out plain text against the registry's collection.
    pub fn layout(
        &mut self,
        text: &str,
        spec: &TextShapeSpec<'_>,
    ) -> PreviewResult<parley::Layout<TextBrushRgba8>> {
        if !spec.size_px.is_finite() || spec.size_px <= 0.0 {
            return Err(PreviewError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(spec.stack.clone().into_owned())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(spec.size_px));
        builder.push_default(parley::style::StyleProperty::Brush(spec.brush));
        if spec.bold {
            builder.push_default(parley::style::StyleProperty::FontWeight(
                parley::style::FontWeight::BOLD,
            ));
        }
        if spec.italic {
            builder.push_default(parley::style::StyleProperty::FontStyle(
                parley::style::FontStyle::Italic,
            ));
        }
        if let Some(ls) = spec.letter_spacing {
            builder.push_default(parley::style::StyleProperty::LetterSpacing(ls));
        }

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
