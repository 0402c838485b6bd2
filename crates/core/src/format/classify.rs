//! Extension lookup in both directions.

use std::path::Path;

use super::types::Format;

/// Classifies a path by the suffix after the last `.` of its final segment.
///
/// The suffix is ASCII-lowercased before lookup. `jpeg` and `tif` are
/// accepted as aliases. A segment without a dot, or whose only dot is the
/// leading one (`.hidden`), is `Unknown`.
pub fn classify(path: impl AsRef<Path>) -> Format {
    let extension = match path.as_ref().extension() {
        Some(ext) => ext.to_string_lossy().to_ascii_lowercase(),
        None => return Format::Unknown,
    };

    match extension.as_str() {
        "txt" => Format::Txt,
        "csv" => Format::Csv,
        "json" => Format::Json,
        "xml" => Format::Xml,
        "html" => Format::Html,
        "md" => Format::Md,

        "jpg" | "jpeg" => Format::Jpg,
        "png" => Format::Png,
        "gif" => Format::Gif,
        "bmp" => Format::Bmp,
        "tiff" | "tif" => Format::Tiff,
        "webp" => Format::Webp,
        "svg" => Format::Svg,
        "ico" => Format::Ico,

        "mp3" => Format::Mp3,
        "wav" => Format::Wav,
        "aac" => Format::Aac,
        "flac" => Format::Flac,
        "ogg" => Format::Ogg,
        "wma" => Format::Wma,

        "mp4" => Format::Mp4,
        "avi" => Format::Avi,
        "mov" => Format::Mov,
        "mkv" => Format::Mkv,
        "wmv" => Format::Wmv,
        "flv" => Format::Flv,
        "webm" => Format::Webm,
        "m4v" => Format::M4v,

        "pdf" => Format::Pdf,
        "docx" => Format::Docx,
        "odt" => Format::Odt,
        "rtf" => Format::Rtf,

        _ => Format::Unknown,
    }
}

/// Returns the canonical extension with its leading dot, or `""` for `Unknown`.
pub fn extension_of(format: Format) -> &'static str {
    match format {
        Format::Txt => ".txt",
        Format::Csv => ".csv",
        Format::Json => ".json",
        Format::Xml => ".xml",
        Format::Html => ".html",
        Format::Md => ".md",
        Format::Jpg => ".jpg",
        Format::Png => ".png",
        Format::Gif => ".gif",
        Format::Bmp => ".bmp",
        Format::Tiff => ".tiff",
        Format::Webp => ".webp",
        Format::Svg => ".svg",
        Format::Ico => ".ico",
        Format::Mp3 => ".mp3",
        Format::Wav => ".wav",
        Format::Aac => ".aac",
        Format::Flac => ".flac",
        Format::Ogg => ".ogg",
        Format::Wma => ".wma",
        Format::Mp4 => ".mp4",
        Format::Avi => ".avi",
        Format::Mov => ".mov",
        Format::Mkv => ".mkv",
        Format::Wmv => ".wmv",
        Format::Flv => ".flv",
        Format::Webm => ".webm",
        Format::M4v => ".m4v",
        Format::Pdf => ".pdf",
        Format::Docx => ".docx",
        Format::Odt => ".odt",
        Format::Rtf => ".rtf",
        Format::Unknown => "",
    }
}
