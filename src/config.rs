//! Batch configuration and output format handling.
//!
//! A `BatchConfig` is built once per batch with all defaulting resolved
//! at construction, then treated as immutable. Output formats are a
//! closed enum so that format-specific save behaviour (like the JPEG
//! alpha flatten) is a property of the format rather than a string
//! comparison in the save path.

use crate::constants::{DEFAULT_PREFIX, DEFAULT_QUALITY, MAX_QUALITY};
use crate::error::{ForgeError, Result};
use image::ImageFormat;
use std::fmt;
use std::str::FromStr;

/// Target format for processed images.
///
/// `Default` keeps each source file's native format and extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Default,
    WebP,
    Png,
    Jpeg,
    Gif,
    Ico,
    Tiff,
    Bmp,
}

impl OutputFormat {
    /// File extension for this format, lowercase without dot.
    /// `Default` has no extension of its own.
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            OutputFormat::Default => None,
            OutputFormat::WebP => Some("webp"),
            OutputFormat::Png => Some("png"),
            OutputFormat::Jpeg => Some("jpg"),
            OutputFormat::Gif => Some("gif"),
            OutputFormat::Ico => Some("ico"),
            OutputFormat::Tiff => Some("tiff"),
            OutputFormat::Bmp => Some("bmp"),
        }
    }

    /// Convert to the image crate's format. `Default` resolves to the
    /// source's own format, so it maps to `None` here.
    pub fn to_image_format(&self) -> Option<ImageFormat> {
        match self {
            OutputFormat::Default => None,
            OutputFormat::WebP => Some(ImageFormat::WebP),
            OutputFormat::Png => Some(ImageFormat::Png),
            OutputFormat::Jpeg => Some(ImageFormat::Jpeg),
            OutputFormat::Gif => Some(ImageFormat::Gif),
            OutputFormat::Ico => Some(ImageFormat::Ico),
            OutputFormat::Tiff => Some(ImageFormat::Tiff),
            OutputFormat::Bmp => Some(ImageFormat::Bmp),
        }
    }

    /// Whether the format cannot carry an alpha channel and therefore
    /// needs the image flattened to opaque RGB before encoding.
    pub fn requires_opaque_input(&self) -> bool {
        matches!(self, OutputFormat::Jpeg)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Default => "default",
            OutputFormat::WebP => "WebP",
            OutputFormat::Png => "PNG",
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::Gif => "GIF",
            OutputFormat::Ico => "ICO",
            OutputFormat::Tiff => "TIFF",
            OutputFormat::Bmp => "BMP",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for OutputFormat {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "default" => Ok(OutputFormat::Default),
            "webp" => Ok(OutputFormat::WebP),
            "png" => Ok(OutputFormat::Png),
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            "gif" => Ok(OutputFormat::Gif),
            "ico" => Ok(OutputFormat::Ico),
            "tiff" | "tif" => Ok(OutputFormat::Tiff),
            "bmp" => Ok(OutputFormat::Bmp),
            _ => Err(ForgeError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Immutable per-batch configuration.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub quality: u8,
    /// Target width in pixels; 0 disables resizing.
    pub base_width: u32,
    pub format: OutputFormat,
    /// Replace each source file in place instead of writing a new one.
    pub overwrite: bool,
    /// Suffix inserted after the file stem when not overwriting.
    pub prefix: String,
    /// Append a wall-clock value to the output name for uniqueness.
    pub timestamp: bool,
}

impl BatchConfig {
    pub fn new(
        quality: Option<u8>,
        base_width: u32,
        format: OutputFormat,
        overwrite: bool,
        prefix: Option<String>,
        timestamp: bool,
    ) -> Result<Self> {
        let quality = quality.unwrap_or(DEFAULT_QUALITY);
        if quality > MAX_QUALITY {
            return Err(ForgeError::InvalidQuality(quality));
        }

        Ok(Self {
            quality,
            base_width,
            format,
            overwrite,
            prefix: prefix.unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
            timestamp,
        })
    }

    /// Format actually used when saving. Overwrite mode keeps the
    /// source name, so the source codec wins regardless of `format`.
    pub fn effective_format(&self) -> OutputFormat {
        if self.overwrite {
            OutputFormat::Default
        } else {
            self.format
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            base_width: 0,
            format: OutputFormat::Default,
            overwrite: false,
            prefix: DEFAULT_PREFIX.to_string(),
            timestamp: true,
        }
    }
}
