//! Book specifications — the eight trim/binding/color combinations the press quotes.

use serde::{Serialize, Serializer};

/// Trim size of the finished book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrimSize {
    /// 16-mo, the larger of the two formats.
    Sixteenmo,
    /// 32-mo, the smaller pocket format.
    Thirtytwomo,
}

/// Binding style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Binding {
    Paperback,
    Hardcover,
}

/// Interior color mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    Monochrome,
    FourColor,
}

/// One of the eight specifications on the published rate sheet.
///
/// Serializes as its published code (`16pb` … `32hc`) — the same codes the
/// order forms use. Parse with [`BookSpec::from_code`]; anything else is an
/// unknown specification and callers surface a typed error rather than
/// pricing it to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookSpec {
    Paperback16Mono,
    Paperback16Color,
    Hardcover16Mono,
    Hardcover16Color,
    Paperback32Mono,
    Paperback32Color,
    Hardcover32Mono,
    Hardcover32Color,
}

impl BookSpec {
    /// Every specification, in rate-sheet order.
    pub const ALL: [BookSpec; 8] = [
        BookSpec::Paperback16Mono,
        BookSpec::Paperback16Color,
        BookSpec::Hardcover16Mono,
        BookSpec::Hardcover16Color,
        BookSpec::Paperback32Mono,
        BookSpec::Paperback32Color,
        BookSpec::Hardcover32Mono,
        BookSpec::Hardcover32Color,
    ];

    /// The published code, e.g. `16pb` for the 16-mo paperback in black & white.
    pub fn code(self) -> &'static str {
        match self {
            BookSpec::Paperback16Mono => "16pb",
            BookSpec::Paperback16Color => "16pc",
            BookSpec::Hardcover16Mono => "16hb",
            BookSpec::Hardcover16Color => "16hc",
            BookSpec::Paperback32Mono => "32pb",
            BookSpec::Paperback32Color => "32pc",
            BookSpec::Hardcover32Mono => "32hb",
            BookSpec::Hardcover32Color => "32hc",
        }
    }

    /// Parses a published code. Returns `None` for anything not on the sheet.
    pub fn from_code(code: &str) -> Option<BookSpec> {
        match code {
            "16pb" => Some(BookSpec::Paperback16Mono),
            "16pc" => Some(BookSpec::Paperback16Color),
            "16hb" => Some(BookSpec::Hardcover16Mono),
            "16hc" => Some(BookSpec::Hardcover16Color),
            "32pb" => Some(BookSpec::Paperback32Mono),
            "32pc" => Some(BookSpec::Paperback32Color),
            "32hb" => Some(BookSpec::Hardcover32Mono),
            "32hc" => Some(BookSpec::Hardcover32Color),
            _ => None,
        }
    }

    pub fn trim(self) -> TrimSize {
        match self {
            BookSpec::Paperback16Mono
            | BookSpec::Paperback16Color
            | BookSpec::Hardcover16Mono
            | BookSpec::Hardcover16Color => TrimSize::Sixteenmo,
            BookSpec::Paperback32Mono
            | BookSpec::Paperback32Color
            | BookSpec::Hardcover32Mono
            | BookSpec::Hardcover32Color => TrimSize::Thirtytwomo,
        }
    }

    pub fn binding(self) -> Binding {
        match self {
            BookSpec::Paperback16Mono
            | BookSpec::Paperback16Color
            | BookSpec::Paperback32Mono
            | BookSpec::Paperback32Color => Binding::Paperback,
            BookSpec::Hardcover16Mono
            | BookSpec::Hardcover16Color
            | BookSpec::Hardcover32Mono
            | BookSpec::Hardcover32Color => Binding::Hardcover,
        }
    }

    pub fn color(self) -> ColorMode {
        match self {
            BookSpec::Paperback16Mono
            | BookSpec::Hardcover16Mono
            | BookSpec::Paperback32Mono
            | BookSpec::Hardcover32Mono => ColorMode::Monochrome,
            BookSpec::Paperback16Color
            | BookSpec::Hardcover16Color
            | BookSpec::Paperback32Color
            | BookSpec::Hardcover32Color => ColorMode::FourColor,
        }
    }

    /// Human-readable name shown alongside quotes.
    pub fn display_name(self) -> &'static str {
        match self {
            BookSpec::Paperback16Mono => "16-mo paperback, black & white",
            BookSpec::Paperback16Color => "16-mo paperback, four-color",
            BookSpec::Hardcover16Mono => "16-mo hardcover, black & white",
            BookSpec::Hardcover16Color => "16-mo hardcover, four-color",
            BookSpec::Paperback32Mono => "32-mo paperback, black & white",
            BookSpec::Paperback32Color => "32-mo paperback, four-color",
            BookSpec::Hardcover32Mono => "32-mo hardcover, black & white",
            BookSpec::Hardcover32Color => "32-mo hardcover, four-color",
        }
    }
}

impl Serialize for BookSpec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.code())
    }
}
