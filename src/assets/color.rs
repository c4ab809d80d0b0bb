use serde::{Deserialize, Serialize};

/// Resolved background color with straight alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgba {
    /// Red channel, 0..=255.
    pub r: u8,
    /// Green channel, 0..=255.
    pub g: u8,
    /// Blue channel, 0..=255.
    pub b: u8,
    /// Straight alpha, 0..=1.
    pub a: f64,
}

impl Rgba {
    /// Build from channels, clamping alpha into `[0, 1]`.
    pub fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self {
            r,
            g,
            b,
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Convert to premultiplied RGBA8.
    pub fn to_rgba8_premul(self) -> crate::foundation::core::Rgba8Premul {
        let a8 = (self.a.clamp(0.0, 1.0) * 255.0).round() as u8;
        crate::foundation::core::Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, a8)
    }
}

/// Background opacity as it arrives from the configuration UI.
///
/// The UI historically emitted opacity as a bare number (`0.2`, `200`), a
/// numeric string (`"0.2"`, `"200"`), or a percent string (`"50%"`). All
/// forms are absorbed at the serde boundary and normalized in
/// [`normalize_opacity`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OpacityDef {
    /// Bare numeric opacity.
    Num(f64),
    /// Stringly opacity, possibly percent-suffixed.
    Str(String),
}

/// Background descriptor: either a bare color string or an object with
/// `background_color`/`background_opacity` fields (legacy aliases accepted).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BackgroundDef {
    /// Object form, the current UI shape.
    Fields {
        /// Background fill color.
        #[serde(
            default,
            alias = "color",
            alias = "backgroundColor",
            skip_serializing_if = "Option::is_none"
        )]
        background_color: Option<String>,
        /// Background opacity on a 0-255 or 0-1 scale; see [`normalize_opacity`].
        #[serde(
            default,
            alias = "opacity",
            alias = "alpha",
            skip_serializing_if = "Option::is_none"
        )]
        background_opacity: Option<OpacityDef>,
    },
    /// Bare color string form emitted by older configs.
    Color(String),
}

/// Flattened view of every place a style may carry background information.
///
/// Priority order is nested object first, then flat fields, matching the
/// backend renderer's resolution order.
#[derive(Debug, Clone, Copy, Default)]
pub struct BackgroundFields<'a> {
    /// Nested `background` object or string.
    pub nested: Option<&'a BackgroundDef>,
    /// Flat `background_color` field.
    pub flat_color: Option<&'a str>,
    /// Flat `background_opacity` (or legacy `opacity`) field.
    pub flat_opacity: Option<&'a OpacityDef>,
}

/// Locate and parse a background color/opacity pair into a single [`Rgba`].
///
/// Returns `None` when no usable color is found or the color string is in an
/// unsupported format; callers substitute per-element fallbacks so the box
/// layout path runs uniformly.
pub fn resolve_background(fields: BackgroundFields<'_>) -> Option<Rgba> {
    let (color, nested_opacity) = match fields.nested {
        Some(BackgroundDef::Fields {
            background_color,
            background_opacity,
        }) => (background_color.as_deref(), background_opacity.as_ref()),
        Some(BackgroundDef::Color(s)) => (Some(s.as_str()), None),
        None => (None, None),
    };

    let color = color.or(fields.flat_color)?;
    let opacity = nested_opacity.or(fields.flat_opacity);
    parse_css_color(color, opacity)
}

/// Parse an `rgba(...)`, `rgb(...)`, `#RRGGBB`, or bare `RRGGBB` color.
///
/// `opacity` applies only to forms without an explicit alpha.
pub fn parse_css_color(color: &str, opacity: Option<&OpacityDef>) -> Option<Rgba> {
    let s = color.trim();
    let lower = s.to_ascii_lowercase();

    if lower.starts_with("rgba") {
        let parts = func_args(s)?;
        if parts.len() != 4 {
            return None;
        }
        return Some(Rgba::new(
            channel_u8(&parts[0])?,
            channel_u8(&parts[1])?,
            channel_u8(&parts[2])?,
            parts[3].trim().parse::<f64>().ok()?,
        ));
    }

    if lower.starts_with("rgb") {
        let parts = func_args(s)?;
        if parts.len() != 3 {
            return None;
        }
        return Some(Rgba::new(
            channel_u8(&parts[0])?,
            channel_u8(&parts[1])?,
            channel_u8(&parts[2])?,
            opacity.map(normalize_opacity).unwrap_or(1.0),
        ));
    }

    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() == 6 && hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        let a = opacity.map(normalize_opacity).unwrap_or(1.0);
        return Some(Rgba::new(r, g, b, a));
    }

    None
}

/// Normalize a heterogeneous opacity into `[0, 1]`.
///
/// A percent string divides by 100; a bare number in `[0, 1]` is used as-is;
/// a number in `(1, 255]` is a byte-scale alpha and divides by 255; anything
/// else (including unparsable strings) clamps into `[0, 1]` with 1 as the
/// unparsable default.
pub fn normalize_opacity(op: &OpacityDef) -> f64 {
    let num = match op {
        OpacityDef::Num(n) => *n,
        OpacityDef::Str(s) => {
            let t = s.trim();
            if let Some(pct) = t.strip_suffix('%') {
                return match pct.trim().parse::<f64>() {
                    Ok(n) => (n / 100.0).clamp(0.0, 1.0),
                    Err(_) => 1.0,
                };
            }
            match t.parse::<f64>() {
                Ok(n) => n,
                Err(_) => return 1.0,
            }
        }
    };

    if !num.is_finite() {
        return 1.0;
    }
    if (0.0..=1.0).contains(&num) {
        num
    } else if num > 1.0 && num <= 255.0 {
        num / 255.0
    } else {
        num.clamp(0.0, 1.0)
    }
}

fn func_args(s: &str) -> Option<Vec<String>> {
    let open = s.find('(')?;
    let close = s.rfind(')')?;
    if close <= open {
        return None;
    }
    Some(s[open + 1..close].split(',').map(|p| p.trim().to_owned()).collect())
}

fn channel_u8(s: &str) -> Option<u8> {
    let v = s.trim().parse::<f64>().ok()?;
    if !v.is_finite() {
        return None;
    }
    Some(v.round().clamp(0.0, 255.0) as u8)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
