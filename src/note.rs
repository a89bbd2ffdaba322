//! The note record and its value types.
//!
//! Geometry is kept in pixels so the persisted JSON matches what a browser
//! board would store; the UI maps pixels to terminal cells with a
//! [`CellScale`](crate::ui::CellScale).

use std::fmt;

use chrono::{DateTime, Local, SecondsFormat, TimeZone, Utc};
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Smallest width or height a note may have, in pixels.
pub const MIN_NOTE_SIZE: f64 = 100.0;
/// Position of a freshly added note.
pub const DEFAULT_POSITION: (f64, f64) = (100.0, 100.0);
/// Size of a freshly added note.
pub const DEFAULT_SIZE: (f64, f64) = (230.0, 150.0);
/// Placeholder text of a freshly added note.
pub const PLACEHOLDER_TEXT: &str = "New note";

/// Unique, immutable note identifier (creation time in epoch milliseconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub i64);

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A UTC instant with millisecond precision.
///
/// Serialized as `2024-05-01T09:30:00.123Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The current time, truncated to whole milliseconds.
    pub fn now() -> Self {
        Self::from_millis(Utc::now().timestamp_millis())
    }

    /// Build a timestamp from epoch milliseconds.
    ///
    /// Out-of-range values clamp to the epoch.
    pub fn from_millis(millis: i64) -> Self {
        Self(
            Utc.timestamp_millis_opt(millis)
                .single()
                .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        )
    }

    pub fn as_millis(self) -> i64 {
        self.0.timestamp_millis()
    }

    /// ISO 8601 form used on disk.
    pub fn to_iso(self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Human readable local time shown on cards.
    pub fn to_local_string(self) -> String {
        self.0
            .with_timezone(&Local)
            .format("%-m/%-d/%Y, %-I:%M:%S %p")
            .to_string()
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let parsed = DateTime::parse_from_rfc3339(&raw).map_err(serde::de::Error::custom)?;
        Ok(Self::from_millis(parsed.timestamp_millis()))
    }
}

/// The fixed note palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NoteColor {
    #[default]
    Yellow,
    Red,
    Green,
    Teal,
    Purple,
    Pink,
    Blue,
}

impl NoteColor {
    pub const PALETTE: [Self; 7] = [
        Self::Yellow,
        Self::Red,
        Self::Green,
        Self::Teal,
        Self::Purple,
        Self::Pink,
        Self::Blue,
    ];

    /// Pick a palette entry uniformly at random.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::PALETTE[rng.gen_range(0..Self::PALETTE.len())]
    }

    pub const fn hex(self) -> &'static str {
        match self {
            Self::Yellow => "#fff475",
            Self::Red => "#f28b82",
            Self::Green => "#ccff90",
            Self::Teal => "#a7ffeb",
            Self::Purple => "#d7aefb",
            Self::Pink => "#fdcfe8",
            Self::Blue => "#aecbfa",
        }
    }

    pub fn from_hex(hex: &str) -> Option<Self> {
        Self::PALETTE
            .into_iter()
            .find(|color| color.hex().eq_ignore_ascii_case(hex))
    }

    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Yellow => (0xff, 0xf4, 0x75),
            Self::Red => (0xf2, 0x8b, 0x82),
            Self::Green => (0xcc, 0xff, 0x90),
            Self::Teal => (0xa7, 0xff, 0xeb),
            Self::Purple => (0xd7, 0xae, 0xfb),
            Self::Pink => (0xfd, 0xcf, 0xe8),
            Self::Blue => (0xae, 0xcb, 0xfa),
        }
    }
}

impl Serialize for NoteColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.hex())
    }
}

impl<'de> Deserialize<'de> for NoteColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(Self::from_hex).unwrap_or_default())
    }
}

/// One sticky note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub text: String,
    #[serde(default)]
    pub color: NoteColor,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(default)]
    pub pinned: bool,
}

impl Note {
    /// A note with default geometry and placeholder text.
    pub fn new(id: NoteId, color: NoteColor, now: Timestamp) -> Self {
        Self {
            id,
            x: DEFAULT_POSITION.0,
            y: DEFAULT_POSITION.1,
            width: DEFAULT_SIZE.0,
            height: DEFAULT_SIZE.1,
            text: PLACEHOLDER_TEXT.to_string(),
            color,
            created_at: now,
            updated_at: now,
            pinned: false,
        }
    }

    /// Merge `patch` into this note. Sizes are floored at [`MIN_NOTE_SIZE`].
    pub(crate) fn apply(&mut self, patch: &NotePatch) {
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(width) = patch.width {
            self.width = width.max(MIN_NOTE_SIZE);
        }
        if let Some(height) = patch.height {
            self.height = height.max(MIN_NOTE_SIZE);
        }
        if let Some(text) = &patch.text {
            self.text.clone_from(text);
        }
        if let Some(pinned) = patch.pinned {
            self.pinned = pinned;
        }
    }
}

/// A partial update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotePatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub text: Option<String>,
    pub pinned: Option<bool>,
}

impl NotePatch {
    pub const fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            width: None,
            height: None,
            text: None,
            pinned: None,
        }
    }

    pub const fn size(width: f64, height: f64) -> Self {
        Self {
            x: None,
            y: None,
            width: Some(width),
            height: Some(height),
            text: None,
            pinned: None,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn pinned(pinned: bool) -> Self {
        Self {
            pinned: Some(pinned),
            ..Self::default()
        }
    }
}
