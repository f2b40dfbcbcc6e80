use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{VitaeError, VitaeResult};

/// Byte ceiling for an accepted profile picture (1 MiB).
pub const DEFAULT_MAX_PROFILE_PICTURE_BYTES: usize = 1024 * 1024;

/// How content taller than one physical page is placed into the PDF.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pagination {
    /// Slice the bitmap at page-height boundaries into as many pages as needed.
    #[default]
    MultiPage,
    /// Keep only the first page worth of content. Overflow is dropped.
    ClipFirstPage,
}

impl FromStr for Pagination {
    type Err = VitaeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "multi_page" | "multi" => Ok(Self::MultiPage),
            "clip_first_page" | "clip" => Ok(Self::ClipFirstPage),
            other => Err(VitaeError::validation(format!(
                "unknown pagination policy '{other}' (expected multi_page or clip_first_page)"
            ))),
        }
    }
}

/// Export pipeline options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOpts {
    /// Pixel density multiplier applied when rasterizing (1..=4).
    pub supersample: u32,
    /// Upper bound on waiting for fonts and images before rasterizing.
    pub settle_timeout_ms: u64,
    /// Overflow policy for tall resumes.
    pub pagination: Pagination,
    /// Explicit font file. Takes priority over discovered fonts.
    pub font_path: Option<PathBuf>,
    /// Extra directories scanned for `.ttf`/`.otf`/`.ttc` files.
    pub font_dirs: Vec<PathBuf>,
    /// JPEG quality used for the page images embedded in the PDF (1..=100).
    pub jpeg_quality: u8,
    /// Largest accepted profile picture, in bytes.
    pub max_profile_picture_bytes: usize,
}

impl Default for ExportOpts {
    fn default() -> Self {
        Self {
            supersample: 2,
            settle_timeout_ms: 5_000,
            pagination: Pagination::MultiPage,
            font_path: None,
            font_dirs: Vec::new(),
            jpeg_quality: 92,
            max_profile_picture_bytes: DEFAULT_MAX_PROFILE_PICTURE_BYTES,
        }
    }
}

impl ExportOpts {
    /// Check value ranges.
    pub fn validate(&self) -> VitaeResult<()> {
        if !(1..=4).contains(&self.supersample) {
            return Err(VitaeError::validation("supersample must be in 1..=4"));
        }
        if self.settle_timeout_ms == 0 {
            return Err(VitaeError::validation("settle_timeout_ms must be > 0"));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(VitaeError::validation("jpeg_quality must be in 1..=100"));
        }
        if self.max_profile_picture_bytes == 0 {
            return Err(VitaeError::validation(
                "max_profile_picture_bytes must be > 0",
            ));
        }
        Ok(())
    }
}

/// Top-level configuration for the library entry points and the `vitae` binary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory backing the local draft key-value store.
    pub draft_dir: PathBuf,
    /// Export pipeline options.
    pub export: ExportOpts,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            draft_dir: PathBuf::from(".vitae"),
            export: ExportOpts::default(),
        }
    }
}

impl Config {
    /// Load a JSON config file. Missing keys take their defaults.
    pub fn from_path(path: &Path) -> VitaeResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Config = serde_json::from_str(&text)
            .map_err(|e| VitaeError::serde(format!("config '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Overlay `VITAE_*` environment variables.
    pub fn with_env(self) -> VitaeResult<Self> {
        self.with_env_lookup(|k| std::env::var(k).ok())
    }

    /// Overlay variables resolved through `lookup`.
    pub fn with_env_lookup(mut self, lookup: impl Fn(&str) -> Option<String>) -> VitaeResult<Self> {
        if let Some(v) = lookup("VITAE_DRAFT_DIR") {
            self.draft_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("VITAE_FONT_PATH") {
            self.export.font_path = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("VITAE_SUPERSAMPLE") {
            self.export.supersample = v
                .trim()
                .parse()
                .map_err(|_| VitaeError::validation(format!("VITAE_SUPERSAMPLE: bad value '{v}'")))?;
        }
        if let Some(v) = lookup("VITAE_SETTLE_TIMEOUT_MS") {
            self.export.settle_timeout_ms = v.trim().parse().map_err(|_| {
                VitaeError::validation(format!("VITAE_SETTLE_TIMEOUT_MS: bad value '{v}'"))
            })?;
        }
        if let Some(v) = lookup("VITAE_PAGINATION") {
            self.export.pagination = v.parse()?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check value ranges.
    pub fn validate(&self) -> VitaeResult<()> {
        self.export.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
