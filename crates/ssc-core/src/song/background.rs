use serde::{Deserialize, Serialize};

/// Transition that fades between backgrounds.
pub const CROSS_FADE: &str = "CrossFade";

/// Effect that stretches the background and rewinds it on repeat.
pub const STRETCH_REWIND: &str = "StretchRewind";

/// Effect that stretches the background without looping.
pub const STRETCH_NO_LOOP: &str = "StretchNoLoop";

/// One entry of a background or foreground timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundChange {
    pub start_beat: f64,
    pub rate: f64,
    pub file1: String,
    pub file2: String,
    pub effect: String,
    pub transition: String,
    pub color1: String,
    pub color2: String,
}

impl Default for BackgroundChange {
    fn default() -> Self {
        Self {
            start_beat: 0.0,
            rate: 1.0,
            file1: String::new(),
            file2: String::new(),
            effect: String::new(),
            transition: String::new(),
            color1: String::new(),
            color2: String::new(),
        }
    }
}

impl BackgroundChange {
    pub fn new(start_beat: f64, file1: impl Into<String>) -> Self {
        Self {
            start_beat,
            file1: file1.into(),
            ..Default::default()
        }
    }

    /// Legacy "fade last" flag read by pre-effect readers.
    pub fn legacy_fade_last(&self) -> bool {
        self.transition == CROSS_FADE
    }

    /// Legacy "rewind movie" flag read by pre-effect readers.
    pub fn legacy_rewind_movie(&self) -> bool {
        self.effect == STRETCH_REWIND
    }

    /// Legacy "loop" flag read by pre-effect readers.
    pub fn legacy_loop(&self) -> bool {
        self.effect != STRETCH_NO_LOOP
    }
}

/// Normalize a color string to `#RRGGBB` (opaque) or `#RRGGBBAA`.
///
/// Accepts `#RRGGBB`, `#RRGGBBAA`, `r,g,b` and `r,g,b,a` with float
/// components in 0..1. Empty or unparsable input yields an empty string.
pub fn normalize_color(color: &str) -> String {
    let Some([r, g, b, a]) = parse_color(color.trim()) else {
        return String::new();
    };

    let to_byte = |c: f32| (c * 255.0).round().clamp(0.0, 255.0) as u8;
    let (r, g, b, a) = (to_byte(r), to_byte(g), to_byte(b), to_byte(a));

    if a == 255 {
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    } else {
        format!("#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
    }
}

fn parse_color(text: &str) -> Option<[f32; 4]> {
    if text.is_empty() {
        return None;
    }

    if let Some(hex) = text.strip_prefix('#') {
        if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
            return None;
        }
        let mut out = [1.0f32; 4];
        for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
            let pair = std::str::from_utf8(chunk).ok()?;
            out[i] = f32::from(u8::from_str_radix(pair, 16).ok()?) / 255.0;
        }
        return Some(out);
    }

    let parts: Vec<f32> = text
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<std::result::Result<_, _>>()
        .ok()?;
    match parts.as_slice() {
        [r, g, b] => Some([*r, *g, *b, 1.0]),
        [r, g, b, a] => Some([*r, *g, *b, *a]),
        _ => None,
    }
}
