//! Animated GIF assembly from a set of still images.
//!
//! The canvas is sized once per batch from the largest-area source,
//! optionally capped by the configured base width. Every frame is
//! resized independently, centered on a solid background of canvas
//! size, and the sequence is written as a single animated file.

use crate::compress::resolve_working_set;
use crate::config::BatchConfig;
use crate::constants::{GIF_ENCODER_SPEED, GIF_SAVE_RESERVE};
use crate::error::{ForgeError, Result};
use crate::naming::gif_file_name;
use crate::progress::ProgressSink;
use crate::resize;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{imageops, Delay, Frame, GenericImageView, ImageReader, Rgba, RgbaImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Playback settings for one produced GIF.
#[derive(Debug, Clone)]
pub struct GifOptions {
    /// Uniform per-frame duration in milliseconds.
    pub duration_ms: u32,
    /// Repeat count; 0 loops forever.
    pub loop_count: u16,
    /// Background fill behind frames narrower or shorter than the canvas.
    pub bg_color: [u8; 3],
}

impl Default for GifOptions {
    fn default() -> Self {
        Self {
            duration_ms: 100,
            loop_count: 0,
            bg_color: [0, 0, 0],
        }
    }
}

/// Offset that centers a frame edge inside the canvas, floored, never
/// negative. Oversized frames start at 0 and get clipped by the paste.
fn centered_offset(canvas: u32, frame: u32) -> i64 {
    ((canvas as i64 - frame as i64) / 2).max(0)
}

pub struct GifBuilder {
    config: BatchConfig,
    folder: Option<PathBuf>,
}

impl GifBuilder {
    pub fn new(config: BatchConfig, folder: Option<PathBuf>) -> Self {
        Self { config, folder }
    }

    /// Canvas dimensions for this working set: the largest-area source
    /// (first-seen wins on ties), width-capped by `base_width` with the
    /// height recomputed from that source's aspect ratio.
    fn canvas_size(&self, working_set: &[PathBuf]) -> Result<(u32, u32)> {
        let mut canvas = (0u32, 0u32);
        let mut best_area = 0u64;
        for path in working_set {
            let (w, h) = image::image_dimensions(path)?;
            let area = w as u64 * h as u64;
            if area > best_area {
                best_area = area;
                canvas = (w, h);
            }
        }

        if self.config.base_width > 0 {
            canvas = (
                self.config.base_width,
                resize::scaled_height(self.config.base_width, canvas),
            );
        }
        Ok(canvas)
    }

    /// Compose the working set into one animated GIF and return its
    /// path. An empty working set produces no file and no events.
    ///
    /// Frame events reserve the final progress points for the save
    /// phase and can therefore be negative early on; sinks clamp.
    /// Unlike `BatchCompressor`, a single undecodable frame aborts the
    /// build, because the one artifact cannot be partially correct.
    pub fn build(
        &self,
        files: Option<&[PathBuf]>,
        options: &GifOptions,
        sink: &mut dyn ProgressSink,
    ) -> Result<Option<PathBuf>> {
        let (working_set, filemode) = resolve_working_set(self.folder.as_deref(), files)?;
        if working_set.is_empty() {
            return Ok(None);
        }

        let (canvas_w, canvas_h) = self.canvas_size(&working_set)?;
        let total = working_set.len();

        let [r, g, b] = options.bg_color;
        let background = Rgba([r, g, b, 255]);
        let delay = Delay::from_numer_denom_ms(options.duration_ms, 1);

        let mut frames = Vec::with_capacity(total);
        for (i, path) in working_set.iter().enumerate() {
            let img = ImageReader::open(path)?.decode()?;
            let img = resize::resize(img, self.config.base_width);
            let (frame_w, frame_h) = img.dimensions();

            let mut composed = RgbaImage::from_pixel(canvas_w, canvas_h, background);
            let x = centered_offset(canvas_w, frame_w);
            let y = centered_offset(canvas_h, frame_h);
            imageops::overlay(&mut composed, &img.to_rgba8(), x, y);

            frames.push(Frame::from_parts(composed, 0, 0, delay));
            sink.emit(((i + 1) * 100 / total) as i32 - GIF_SAVE_RESERVE);
        }

        let dest_dir = if filemode {
            working_set[0]
                .parent()
                .ok_or_else(|| ForgeError::InvalidFileName(working_set[0].clone()))?
        } else {
            self.folder.as_deref().ok_or(ForgeError::NoWorkingFolder)?
        };
        let dest = dest_dir.join(gif_file_name(self.config.base_width));

        self.encode(&dest, frames, options.loop_count)?;
        sink.emit(100);

        Ok(Some(dest))
    }

    fn encode(&self, dest: &Path, frames: Vec<Frame>, loop_count: u16) -> Result<()> {
        let writer = BufWriter::new(File::create(dest)?);
        let mut encoder = GifEncoder::new_with_speed(writer, GIF_ENCODER_SPEED);
        let repeat = if loop_count == 0 {
            Repeat::Infinite
        } else {
            Repeat::Finite(loop_count)
        };
        encoder.set_repeat(repeat)?;
        encoder.encode_frames(frames)?;
        Ok(())
    }
}
