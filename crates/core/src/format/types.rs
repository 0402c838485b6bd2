//! Types for the format module.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A file encoding, identified by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    // Markup
    Txt,
    Csv,
    Json,
    Xml,
    Html,
    Md,
    // Image
    Jpg,
    Png,
    Gif,
    Bmp,
    Tiff,
    Webp,
    Svg,
    Ico,
    // Audio
    Mp3,
    Wav,
    Aac,
    Flac,
    Ogg,
    Wma,
    // Video
    Mp4,
    Avi,
    Mov,
    Mkv,
    Wmv,
    Flv,
    Webm,
    M4v,
    // Office
    Pdf,
    Docx,
    Odt,
    Rtf,
    /// Extension missing or not recognized.
    Unknown,
}

impl Format {
    /// Every known format, in declaration order. `Unknown` is excluded.
    pub const ALL: [Format; 32] = [
        Format::Txt,
        Format::Csv,
        Format::Json,
        Format::Xml,
        Format::Html,
        Format::Md,
        Format::Jpg,
        Format::Png,
        Format::Gif,
        Format::Bmp,
        Format::Tiff,
        Format::Webp,
        Format::Svg,
        Format::Ico,
        Format::Mp3,
        Format::Wav,
        Format::Aac,
        Format::Flac,
        Format::Ogg,
        Format::Wma,
        Format::Mp4,
        Format::Avi,
        Format::Mov,
        Format::Mkv,
        Format::Wmv,
        Format::Flv,
        Format::Webm,
        Format::M4v,
        Format::Pdf,
        Format::Docx,
        Format::Odt,
        Format::Rtf,
    ];

    /// Returns the category this format belongs to, `None` for `Unknown`.
    pub fn category(&self) -> Option<Category> {
        match self {
            Self::Txt | Self::Csv | Self::Json | Self::Xml | Self::Html | Self::Md => {
                Some(Category::Markup)
            }
            Self::Jpg
            | Self::Png
            | Self::Gif
            | Self::Bmp
            | Self::Tiff
            | Self::Webp
            | Self::Svg
            | Self::Ico => Some(Category::Image),
            Self::Mp3 | Self::Wav | Self::Aac | Self::Flac | Self::Ogg | Self::Wma => {
                Some(Category::Audio)
            }
            Self::Mp4
            | Self::Avi
            | Self::Mov
            | Self::Mkv
            | Self::Wmv
            | Self::Flv
            | Self::Webm
            | Self::M4v => Some(Category::Video),
            Self::Pdf | Self::Docx | Self::Odt | Self::Rtf => Some(Category::Office),
            Self::Unknown => None,
        }
    }

    /// Returns the lowercase tag name, which is also the canonical extension
    /// without its dot.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Html => "html",
            Self::Md => "md",
            Self::Jpg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
            Self::Webp => "webp",
            Self::Svg => "svg",
            Self::Ico => "ico",
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Aac => "aac",
            Self::Flac => "flac",
            Self::Ogg => "ogg",
            Self::Wma => "wma",
            Self::Mp4 => "mp4",
            Self::Avi => "avi",
            Self::Mov => "mov",
            Self::Mkv => "mkv",
            Self::Wmv => "wmv",
            Self::Flv => "flv",
            Self::Webm => "webm",
            Self::M4v => "m4v",
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Odt => "odt",
            Self::Rtf => "rtf",
            Self::Unknown => "unknown",
        }
    }

    /// Whether this is the `Unknown` sentinel.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Returns the known formats of one category.
    pub fn in_category(category: Category) -> impl Iterator<Item = Format> {
        Self::ALL
            .into_iter()
            .filter(move |f| f.category() == Some(category))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A disjoint group of formats served by one handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Markup,
    Image,
    Audio,
    Video,
    Office,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 5] = [
        Category::Markup,
        Category::Image,
        Category::Audio,
        Category::Video,
        Category::Office,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Markup => "markup",
            Self::Image => "image",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Office => "office",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
