//! The card record consumed by the scene.
//!
//! The persistence layer stores cards as flat JSON objects; [`CardContent`]
//! is that record with its colors parsed and its animation kind resolved.

use std::fmt;

use serde::Deserialize;

use postmark_engine::paint::{Color, ColorParseError};

pub const MAX_PHOTOS: usize = 4;
pub const MAX_MESSAGE_LENGTH: usize = 500;

// ── AnimationKind ─────────────────────────────────────────────────────────

/// Ambient background effect.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum AnimationKind {
    #[default]
    None,
    Confetti,
    Hearts,
    Snowflakes,
}

impl AnimationKind {
    /// Unknown names fall back to [`AnimationKind::None`].
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "" | "none" => AnimationKind::None,
            "confetti" => AnimationKind::Confetti,
            "hearts" => AnimationKind::Hearts,
            "snowflakes" => AnimationKind::Snowflakes,
            other => {
                log::warn!("unknown animation kind '{other}', rendering no background effect");
                AnimationKind::None
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AnimationKind::None => "none",
            AnimationKind::Confetti => "confetti",
            AnimationKind::Hearts => "hearts",
            AnimationKind::Snowflakes => "snowflakes",
        }
    }
}

// ── CardPalette ───────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CardPalette {
    pub background: Color,
    pub envelope: Color,
    pub accent: Color,
    pub text: Color,
}

impl CardPalette {
    pub const DEFAULT_BACKGROUND: [u8; 3] = [0x6b, 0x9f, 0x76];
    pub const DEFAULT_ENVELOPE: [u8; 3] = [0xf5, 0xe6, 0xd3];
    pub const DEFAULT_ACCENT: [u8; 3] = [0xc4, 0x95, 0x6a];
    pub const DEFAULT_TEXT: [u8; 3] = [0x00, 0x00, 0x00];
}

impl Default for CardPalette {
    fn default() -> Self {
        Self {
            background: Color::from_rgb8(Self::DEFAULT_BACKGROUND),
            envelope: Color::from_rgb8(Self::DEFAULT_ENVELOPE),
            accent: Color::from_rgb8(Self::DEFAULT_ACCENT),
            text: Color::from_rgb8(Self::DEFAULT_TEXT),
        }
    }
}

// ── CardError ─────────────────────────────────────────────────────────────

/// Returned when a card record cannot be loaded or fails validation.
#[derive(Debug)]
pub enum CardError {
    Json(serde_json::Error),
    InvalidColor { field: &'static str, source: ColorParseError },
    MissingField(&'static str),
    MessageTooLong { len: usize },
    TooManyPhotos { count: usize },
}

impl fmt::Display for CardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardError::Json(err) => write!(f, "card record is not valid JSON: {err}"),
            CardError::InvalidColor { field, source } => write!(f, "{field}: {source}"),
            CardError::MissingField(field) => write!(f, "{field} is required"),
            CardError::MessageTooLong { len } => {
                write!(f, "message is {len} characters, the limit is {MAX_MESSAGE_LENGTH}")
            }
            CardError::TooManyPhotos { count } => {
                write!(f, "card has {count} photos, the limit is {MAX_PHOTOS}")
            }
        }
    }
}

impl std::error::Error for CardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CardError::Json(err) => Some(err),
            CardError::InvalidColor { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CardError {
    fn from(err: serde_json::Error) -> Self {
        CardError::Json(err)
    }
}

// ── CardRecord (wire shape) ───────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CardRecord {
    recipient_name: String,
    occasion: String,
    message: String,
    from_name: String,
    bg_color: Option<String>,
    envelope_color: Option<String>,
    accent_color: Option<String>,
    text_color: Option<String>,
    animation_type: Option<String>,
    include_photos: bool,
    photo_urls: Vec<String>,
}

fn parse_color(field: &'static str, value: Option<&str>, fallback: [u8; 3]) -> Result<Color, CardError> {
    let Some(raw) = value else {
        return Ok(Color::from_rgb8(fallback));
    };
    let digits = raw.trim().trim_start_matches('#');
    if !raw.trim().starts_with('#') || !matches!(digits.len(), 3 | 6) {
        let source = ColorParseError { input: raw.to_string() };
        return Err(CardError::InvalidColor { field, source });
    }
    Color::from_hex(raw).map_err(|source| CardError::InvalidColor { field, source })
}

// ── CardContent ───────────────────────────────────────────────────────────

/// A fully resolved card, immutable for the lifetime of a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct CardContent {
    pub recipient_name: String,
    pub greeting: String,
    pub message: String,
    pub from_name: String,
    pub palette: CardPalette,
    pub animation: AnimationKind,
    pub include_photos: bool,
    pub photo_urls: Vec<String>,
}

impl Default for CardContent {
    fn default() -> Self {
        Self {
            recipient_name: String::new(),
            greeting: String::new(),
            message: String::new(),
            from_name: String::new(),
            palette: CardPalette::default(),
            animation: AnimationKind::None,
            include_photos: false,
            photo_urls: Vec::new(),
        }
    }
}

impl CardContent {
    /// Parses a persisted card record. Unknown fields are ignored.
    pub fn from_json(src: &str) -> Result<Self, CardError> {
        let record: CardRecord = serde_json::from_str(src)?;
        let palette = CardPalette {
            background: parse_color(
                "bg_color",
                record.bg_color.as_deref(),
                CardPalette::DEFAULT_BACKGROUND,
            )?,
            envelope: parse_color(
                "envelope_color",
                record.envelope_color.as_deref(),
                CardPalette::DEFAULT_ENVELOPE,
            )?,
            accent: parse_color(
                "accent_color",
                record.accent_color.as_deref(),
                CardPalette::DEFAULT_ACCENT,
            )?,
            text: parse_color("text_color", record.text_color.as_deref(), CardPalette::DEFAULT_TEXT)?,
        };

        Ok(Self {
            recipient_name: record.recipient_name,
            greeting: record.occasion,
            message: record.message,
            from_name: record.from_name,
            palette,
            animation: record
                .animation_type
                .as_deref()
                .map(AnimationKind::parse)
                .unwrap_or_default(),
            include_photos: record.include_photos,
            photo_urls: record.photo_urls,
        })
    }

    /// Checks the rules a shareable card must satisfy.
    pub fn validate(&self) -> Result<(), CardError> {
        if self.recipient_name.trim().is_empty() {
            return Err(CardError::MissingField("recipient_name"));
        }
        if self.message.trim().is_empty() {
            return Err(CardError::MissingField("message"));
        }
        let len = self.message.chars().count();
        if len > MAX_MESSAGE_LENGTH {
            return Err(CardError::MessageTooLong { len });
        }
        if self.photo_urls.len() > MAX_PHOTOS {
            return Err(CardError::TooManyPhotos { count: self.photo_urls.len() });
        }
        Ok(())
    }

    /// Fills blank text fields with the builder-preview placeholders.
    pub fn with_preview_placeholders(mut self) -> Self {
        fn fill(field: &mut String, placeholder: impl FnOnce() -> String) {
            if field.trim().is_empty() {
                *field = placeholder();
            }
        }

        fill(&mut self.recipient_name, || "John".to_string());
        fill(&mut self.greeting, || "Dear John,".to_string());
        fill(&mut self.message, || "Your message will appear here...".to_string());
        fill(&mut self.from_name, || "From,".to_string());
        self
    }

    /// Photos the scene shows: empty unless photos are enabled, never more
    /// than [`MAX_PHOTOS`].
    pub fn photos(&self) -> &[String] {
        if !self.include_photos {
            return &[];
        }
        let n = self.photo_urls.len().min(MAX_PHOTOS);
        &self.photo_urls[..n]
    }
}
