use std::path::Path;

use anyhow::Context as _;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::foundation::error::{VitaeError, VitaeResult};

/// Encoded image formats accepted as a profile picture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PictureFormat {
    Png,
    Jpeg,
    Gif,
    WebP,
    Svg,
}

impl PictureFormat {
    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::WebP => "image/webp",
            Self::Svg => "image/svg+xml",
        }
    }

    fn from_mime(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/png" => Some(Self::Png),
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/gif" => Some(Self::Gif),
            "image/webp" => Some(Self::WebP),
            "image/svg+xml" => Some(Self::Svg),
            _ => None,
        }
    }

    /// Identify the format from the leading bytes.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        match image::guess_format(bytes) {
            Ok(image::ImageFormat::Png) => Some(Self::Png),
            Ok(image::ImageFormat::Jpeg) => Some(Self::Jpeg),
            Ok(image::ImageFormat::Gif) => Some(Self::Gif),
            Ok(image::ImageFormat::WebP) => Some(Self::WebP),
            _ if looks_like_svg(bytes) => Some(Self::Svg),
            _ => None,
        }
    }
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(1024)];
    let Ok(text) = std::str::from_utf8(head) else {
        // The 1 KiB cut may land inside a multi-byte sequence.
        return String::from_utf8_lossy(head).contains("<svg");
    };
    let t = text.trim_start_matches('\u{feff}').trim_start();
    (t.starts_with("<svg") || t.starts_with("<?xml") || t.starts_with("<!--")) && t.contains("<svg")
}

/// A validated profile picture, ready to be stored inline in the document.
///
/// The only way to build one is through the size and format checks below, so an
/// [`crate::Edit::SetProfilePicture`] never carries an oversized or unknown payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfilePicture {
    format: PictureFormat,
    byte_len: usize,
    data_url: String,
}

impl ProfilePicture {
    /// Validate raw file bytes against `max_bytes` and encode them as a `data:` URL.
    pub fn from_bytes(bytes: &[u8], max_bytes: usize) -> VitaeResult<Self> {
        if bytes.len() > max_bytes {
            return Err(VitaeError::validation(format!(
                "Image must be smaller than {}",
                human_size(max_bytes)
            )));
        }
        let format = PictureFormat::sniff(bytes).ok_or_else(|| {
            VitaeError::validation("Unsupported image format (use PNG, JPEG, GIF, WebP, or SVG)")
        })?;
        let data_url = format!("data:{};base64,{}", format.mime(), STANDARD.encode(bytes));
        Ok(Self {
            format,
            byte_len: bytes.len(),
            data_url,
        })
    }

    /// Read and validate an image file.
    pub fn from_path(path: &Path, max_bytes: usize) -> VitaeResult<Self> {
        let meta = std::fs::metadata(path)
            .with_context(|| format!("stat image '{}'", path.display()))?;
        if meta.len() > max_bytes as u64 {
            return Err(VitaeError::validation(format!(
                "Image must be smaller than {}",
                human_size(max_bytes)
            )));
        }
        let bytes =
            std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
        Self::from_bytes(&bytes, max_bytes)
    }

    pub fn format(&self) -> PictureFormat {
        self.format
    }

    /// Size of the original encoded file.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    pub fn data_url(&self) -> &str {
        &self.data_url
    }

    pub fn into_data_url(self) -> String {
        self.data_url
    }
}

/// Decoded payload of an inline `data:` image URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineImage {
    pub format: PictureFormat,
    pub bytes: Vec<u8>,
}

/// Split a base64 `data:` URL back into format and bytes.
///
/// Accepts any mime listed in [`PictureFormat`] and falls back to sniffing when the declared
/// mime is missing or unknown.
pub fn parse_data_url(url: &str) -> VitaeResult<InlineImage> {
    let rest = url
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| VitaeError::validation("profile picture is not a data: URL"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| VitaeError::validation("data: URL has no payload"))?;
    let mut parts = header.split(';');
    let mime = parts.next().unwrap_or_default();
    if !parts.any(|p| p.eq_ignore_ascii_case("base64")) {
        return Err(VitaeError::validation("data: URL is not base64-encoded"));
    }
    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| VitaeError::validation(format!("data: URL payload: {e}")))?;
    let format = PictureFormat::from_mime(mime)
        .or_else(|| PictureFormat::sniff(&bytes))
        .ok_or_else(|| VitaeError::validation(format!("unsupported image type '{mime}'")))?;
    Ok(InlineImage { format, bytes })
}

fn human_size(bytes: usize) -> String {
    const MIB: usize = 1024 * 1024;
    const KIB: usize = 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else if bytes >= KIB && bytes % KIB == 0 {
        format!("{}KB", bytes / KIB)
    } else {
        format!("{bytes} bytes")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/image_input.rs"]
mod tests;
