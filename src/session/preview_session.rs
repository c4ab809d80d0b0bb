//! The stateful preview session: owns the style config, the font registry,
//! the loaded poster and the redraw bookkeeping.

use std::path::{Path, PathBuf};

use crate::assets::decode::PreparedImage;
use crate::assets::fonts::FontRegistry;
use crate::assets::poster::load_poster;
use crate::foundation::core::{Canvas, FrameRgba};
use crate::foundation::error::PreviewResult;
use crate::render::scene::{SceneParams, render_scene};
use crate::render::text::TextPainter;
use crate::style::model::{FontStyle, PlaceholderMode, StyleConfig};

/// One live preview instance.
///
/// All mutation goes through the setters, which bump generation counters;
/// [`PreviewSession::needs_redraw`] compares those counters against the
/// last rendered frame instead of deep-comparing the config. Poster loads
/// are guarded by a token so a completion for a superseded URL is
/// discarded rather than winning by arriving last.
pub struct PreviewSession {
    assets_root: PathBuf,
    canvas: Canvas,
    config: StyleConfig,
    mode: PlaceholderMode,
    registry: FontRegistry,
    painter: TextPainter,
    poster_url: Option<String>,
    poster: Option<PreparedImage>,
    config_generation: u64,
    poster_token: u64,
    rendered: Option<RenderedState>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
struct RenderedState {
    config_generation: u64,
    poster_token: u64,
    font_generation: u64,
}

impl PreviewSession {
    /// Session rooted at `assets_root`, the directory font and poster
    /// sources resolve beneath. Starts with the default canvas, an empty
    /// config and preview placeholders.
    pub fn new(assets_root: impl Into<PathBuf>) -> Self {
        Self {
            assets_root: assets_root.into(),
            canvas: Canvas::DEFAULT,
            config: StyleConfig::default(),
            mode: PlaceholderMode::Preview,
            registry: FontRegistry::new(),
            painter: TextPainter::new(),
            poster_url: None,
            poster: None,
            config_generation: 0,
            poster_token: 0,
            rendered: None,
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn config(&self) -> &StyleConfig {
        &self.config
    }

    /// Whether the current poster URL resolved to a decodable image.
    pub fn poster_loaded(&self) -> bool {
        self.poster.is_some()
    }

    pub fn set_canvas(&mut self, canvas: Canvas) {
        if self.canvas != canvas {
            self.canvas = canvas;
            self.config_generation += 1;
        }
    }

    pub fn set_placeholder_mode(&mut self, mode: PlaceholderMode) {
        if self.mode != mode {
            self.mode = mode;
            self.config_generation += 1;
        }
    }

    /// Replace the style config and load any custom fonts it references.
    pub fn set_config(&mut self, config: StyleConfig) {
        self.config = config;
        self.config_generation += 1;
        self.load_config_fonts();
    }

    /// Decode and apply a config from its JSON wire form.
    pub fn set_config_json(&mut self, raw: &str) -> PreviewResult<()> {
        let config = StyleConfig::from_json_str(raw)?;
        self.set_config(config);
        Ok(())
    }

    /// Change the poster source. The load happens immediately; a URL that
    /// fails both decode attempts leaves the poster absent and the
    /// background falls back to the synthetic scene.
    pub fn set_poster_url(&mut self, url: Option<&str>) {
        if self.poster_url.as_deref() == url {
            return;
        }
        self.poster_url = url.map(str::to_owned);
        self.poster_token += 1;
        let token = self.poster_token;

        let loaded = url.and_then(|u| load_poster(&self.assets_root, u));
        // A completion for a superseded URL must not clobber newer state.
        if token == self.poster_token {
            self.poster = loaded;
        }
    }

    /// Whether the inputs have changed since the last rendered frame.
    pub fn needs_redraw(&self) -> bool {
        self.rendered != Some(self.current_state())
    }

    /// Render one frame from the current inputs.
    #[tracing::instrument(skip(self), fields(w = self.canvas.width, h = self.canvas.height))]
    pub fn render(&mut self) -> PreviewResult<FrameRgba> {
        let frame = render_scene(
            &mut self.painter,
            &mut self.registry,
            self.canvas,
            SceneParams {
                config: &self.config,
                poster: self.poster.as_ref(),
                mode: self.mode,
            },
        )?;
        self.rendered = Some(self.current_state());
        Ok(frame)
    }

    fn current_state(&self) -> RenderedState {
        RenderedState {
            config_generation: self.config_generation,
            poster_token: self.poster_token,
            font_generation: self.registry.generation(),
        }
    }

    fn load_config_fonts(&mut self) {
        let root = self.assets_root.clone();
        let styles = [
            self.config.title.main_title.clone(),
            self.config.title.sub_title.clone(),
            Some(self.config.title.legacy_style()),
            Some(self.config.subtitle.clone()),
        ];
        for style in styles.into_iter().flatten() {
            load_style_font(&mut self.registry, &root, &style);
        }
    }
}

fn load_style_font(registry: &mut FontRegistry, root: &Path, style: &FontStyle) {
    if let Some(family) = style.font_family.as_deref().filter(|f| !f.is_empty()) {
        registry.load(root, family, style.font_url.as_deref());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/preview_session.rs"]
mod tests;
