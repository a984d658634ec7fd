//! Per-image batch processing: decode, conditionally resize, name,
//! format fixup, encode, report progress.

use crate::config::BatchConfig;
use crate::constants::{LIBDEFLATER_HIGH_LEVEL, LIBDEFLATER_LOW_LEVEL, ZOPFLI_ITERATIONS};
use crate::error::{ForgeError, Result};
use crate::naming::resolve_name;
use crate::progress::ProgressSink;
use crate::resize;
use crate::scan::parse_images;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};
use oxipng::{Deflaters, InFile, Options, OutFile};
use std::fs;
use std::fs::File;
use std::io::BufWriter;
use std::num::NonZeroU8;
use std::path::{Path, PathBuf};

/// Aggregate result of one batch run. A per-item failure does not stop
/// the remaining items; it is recorded here instead.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub outputs: Vec<PathBuf>,
    pub failures: Vec<(PathBuf, ForgeError)>,
}

impl BatchOutcome {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Resolve the files a batch will process: the explicit list when one
/// is supplied (filemode), otherwise the scanned working folder.
/// Returns the list together with the filemode flag.
pub(crate) fn resolve_working_set(
    folder: Option<&Path>,
    files: Option<&[PathBuf]>,
) -> Result<(Vec<PathBuf>, bool)> {
    match files {
        Some(files) => Ok((files.to_vec(), true)),
        None => {
            let folder = folder.ok_or(ForgeError::NoWorkingFolder)?;
            Ok((parse_images(folder)?, false))
        }
    }
}

pub struct BatchCompressor {
    config: BatchConfig,
    folder: Option<PathBuf>,
}

impl BatchCompressor {
    pub fn new(config: BatchConfig, folder: Option<PathBuf>) -> Self {
        Self { config, folder }
    }

    /// Process every image in the working set sequentially, emitting a
    /// progress value in 0..=100 after each item.
    ///
    /// When `files` is given, each output lands next to its own source
    /// file; otherwise outputs go into the working folder. Items that
    /// fail to decode or encode are collected in the outcome and the
    /// batch continues.
    pub fn compress(
        &self,
        files: Option<&[PathBuf]>,
        sink: &mut dyn ProgressSink,
    ) -> Result<BatchOutcome> {
        let (working_set, filemode) = resolve_working_set(self.folder.as_deref(), files)?;
        let total = working_set.len();

        let mut outcome = BatchOutcome::default();
        for (done, source) in working_set.iter().enumerate() {
            match self.process_one(source, filemode) {
                Ok(dest) => outcome.outputs.push(dest),
                Err(e) => outcome.failures.push((source.clone(), e)),
            }
            sink.emit(((done + 1) * 100 / total) as i32);
        }

        Ok(outcome)
    }

    fn process_one(&self, source: &Path, filemode: bool) -> Result<PathBuf> {
        if !source.exists() {
            return Err(ForgeError::FileNotFound(source.to_path_buf()));
        }

        let img = ImageReader::open(source)?.decode()?;
        let (w, _) = img.dimensions();

        // Only downsizes: images already narrower than the target width
        // keep their native resolution.
        let img = if self.config.base_width > 0 && w > self.config.base_width {
            resize::resize(img, self.config.base_width)
        } else {
            img
        };

        let format = self.config.effective_format();

        // Pre-save fixup: formats without alpha support take an opaque
        // RGB image. Default-format JPEG sources are flattened again at
        // the codec level in save_image.
        let img = if format.requires_opaque_input() {
            DynamicImage::ImageRgb8(img.to_rgb8())
        } else {
            img
        };

        let filename = resolve_name(
            source,
            self.config.overwrite,
            self.config.timestamp,
            &self.config.prefix,
            format,
        )?;

        let dest_dir = if filemode {
            source
                .parent()
                .ok_or_else(|| ForgeError::InvalidFileName(source.to_path_buf()))?
        } else {
            self.folder.as_deref().ok_or(ForgeError::NoWorkingFolder)?
        };
        let dest = dest_dir.join(filename);

        let codec = match format.to_image_format() {
            Some(codec) => codec,
            None => ImageFormat::from_path(source)?,
        };
        save_image(&img, &dest, codec, self.config.quality)?;

        Ok(dest)
    }
}

/// Encode and write one image with the requested codec and quality.
///
/// JPEG input is flattened to opaque RGB first (the codec has no alpha
/// channel). PNG output goes through oxipng with a quality-tiered
/// deflater; everything else uses the codec's own save path.
pub fn save_image(
    img: &DynamicImage,
    output: &Path,
    format: ImageFormat,
    quality: u8,
) -> Result<()> {
    match format {
        ImageFormat::Jpeg => {
            let rgb = img.to_rgb8();
            let mut writer = BufWriter::new(File::create(output)?);
            let mut encoder = JpegEncoder::new_with_quality(&mut writer, quality.max(1));
            encoder.encode_image(&rgb)?;
        }
        ImageFormat::Png => {
            let temp_path = output.with_extension("temp.png");
            img.save_with_format(&temp_path, ImageFormat::Png)?;

            // Ensure cleanup on any error
            struct TempFileGuard(PathBuf);
            impl Drop for TempFileGuard {
                fn drop(&mut self) {
                    let _ = fs::remove_file(&self.0);
                }
            }
            let _guard = TempFileGuard(temp_path.clone());

            let mut oxipng_options = Options::from_preset(4);
            oxipng_options.force = true;

            if quality >= 90 {
                oxipng_options.deflate = Deflaters::Zopfli {
                    iterations: NonZeroU8::new(ZOPFLI_ITERATIONS)
                        .ok_or_else(|| ForgeError::PngOptimization("bad iteration count".into()))?,
                };
            } else if quality >= 70 {
                oxipng_options.deflate = Deflaters::Libdeflater {
                    compression: LIBDEFLATER_HIGH_LEVEL,
                };
            } else {
                oxipng_options.deflate = Deflaters::Libdeflater {
                    compression: LIBDEFLATER_LOW_LEVEL,
                };
            }

            let input = InFile::Path(temp_path.clone());
            let out = OutFile::Path {
                path: Some(output.to_path_buf()),
                preserve_attrs: false,
            };
            oxipng::optimize(&input, &out, &oxipng_options)
                .map_err(|e| ForgeError::PngOptimization(e.to_string()))?;
        }
        _ => {
            img.save_with_format(output, format)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::progress::NullSink;
    use tempfile::TempDir;

    fn write_test_image(path: &Path, width: u32, height: u32) {
        DynamicImage::new_rgb8(width, height).save(path).unwrap();
    }

    #[test]
    fn test_resolve_working_set_requires_folder_or_files() {
        let result = resolve_working_set(None, None);
        assert!(matches!(result, Err(ForgeError::NoWorkingFolder)));
    }

    #[test]
    fn test_resolve_working_set_filemode() {
        let files = vec![PathBuf::from("a.png"), PathBuf::from("b.jpg")];
        let (set, filemode) = resolve_working_set(None, Some(&files)).unwrap();
        assert!(filemode);
        assert_eq!(set, files);
    }

    #[test]
    fn test_compress_folder_mode_emits_monotonic_progress() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["a.png", "b.png", "c.png"] {
            write_test_image(&temp_dir.path().join(name), 40, 30);
        }

        let config = BatchConfig {
            timestamp: false,
            ..BatchConfig::default()
        };
        let compressor = BatchCompressor::new(config, Some(temp_dir.path().to_path_buf()));

        let mut events = Vec::new();
        let outcome = compressor
            .compress(None, &mut |v: i32| events.push(v))
            .unwrap();

        assert!(outcome.is_clean());
        assert_eq!(outcome.outputs.len(), 3);
        assert_eq!(events, vec![33, 66, 100]);
    }

    #[test]
    fn test_compress_downsizes_only_wide_images() {
        let temp_dir = TempDir::new().unwrap();
        write_test_image(&temp_dir.path().join("wide.png"), 1600, 900);
        write_test_image(&temp_dir.path().join("narrow.png"), 400, 300);

        let config = BatchConfig {
            base_width: 800,
            timestamp: false,
            ..BatchConfig::default()
        };
        let compressor = BatchCompressor::new(config, Some(temp_dir.path().to_path_buf()));
        let outcome = compressor.compress(None, &mut NullSink).unwrap();
        assert!(outcome.is_clean());

        for output in &outcome.outputs {
            let img = image::open(output).unwrap();
            if output.file_name().unwrap().to_str().unwrap().starts_with("wide") {
                assert_eq!(img.dimensions(), (800, 450));
            } else {
                assert_eq!(img.dimensions(), (400, 300));
            }
        }
    }

    #[test]
    fn test_compress_overwrite_replaces_in_place() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("keep.png");
        write_test_image(&source, 400, 300);

        let config = BatchConfig {
            overwrite: true,
            timestamp: false,
            ..BatchConfig::default()
        };
        let compressor = BatchCompressor::new(config, Some(temp_dir.path().to_path_buf()));
        let outcome = compressor.compress(None, &mut NullSink).unwrap();

        assert_eq!(outcome.outputs, vec![source.clone()]);
        let entries = parse_images(temp_dir.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(image::open(&source).unwrap().dimensions(), (400, 300));
    }

    #[test]
    fn test_compress_filemode_writes_beside_each_source() {
        let temp_a = TempDir::new().unwrap();
        let temp_b = TempDir::new().unwrap();
        let file_a = temp_a.path().join("one.png");
        let file_b = temp_b.path().join("two.png");
        write_test_image(&file_a, 40, 30);
        write_test_image(&file_b, 40, 30);

        let config = BatchConfig {
            timestamp: false,
            ..BatchConfig::default()
        };
        let compressor = BatchCompressor::new(config, None);
        let files = vec![file_a, file_b];
        let outcome = compressor.compress(Some(&files), &mut NullSink).unwrap();

        assert!(outcome.is_clean());
        assert_eq!(outcome.outputs.len(), 2);
        assert_eq!(outcome.outputs[0].parent().unwrap(), temp_a.path());
        assert_eq!(outcome.outputs[1].parent().unwrap(), temp_b.path());
    }

    #[test]
    fn test_compress_jpeg_flattens_alpha() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("alpha.png");
        DynamicImage::new_rgba8(40, 30).save(&source).unwrap();

        let config = BatchConfig {
            format: OutputFormat::Jpeg,
            timestamp: false,
            ..BatchConfig::default()
        };
        let compressor = BatchCompressor::new(config, Some(temp_dir.path().to_path_buf()));
        let outcome = compressor.compress(None, &mut NullSink).unwrap();

        assert!(outcome.is_clean());
        assert_eq!(outcome.outputs.len(), 1);
        assert!(outcome.outputs[0].to_str().unwrap().ends_with(".jpg"));
        let reencoded = image::open(&outcome.outputs[0]).unwrap();
        assert_eq!(reencoded.dimensions(), (40, 30));
    }

    #[test]
    fn test_compress_continues_past_undecodable_file() {
        let temp_dir = TempDir::new().unwrap();
        write_test_image(&temp_dir.path().join("good.png"), 40, 30);
        fs::write(temp_dir.path().join("bad.png"), b"not an image").unwrap();

        let config = BatchConfig {
            timestamp: false,
            ..BatchConfig::default()
        };
        let compressor = BatchCompressor::new(config, Some(temp_dir.path().to_path_buf()));

        let mut events = Vec::new();
        let outcome = compressor
            .compress(None, &mut |v: i32| events.push(v))
            .unwrap();

        assert_eq!(outcome.outputs.len(), 1);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(events.last(), Some(&100));
    }

    #[test]
    fn test_compress_missing_folder_fails_before_any_work() {
        let config = BatchConfig::default();
        let compressor =
            BatchCompressor::new(config, Some(PathBuf::from("/nonexistent/folder")));
        let result = compressor.compress(None, &mut NullSink);
        assert!(matches!(result, Err(ForgeError::FolderNotFound(_))));
    }
}
