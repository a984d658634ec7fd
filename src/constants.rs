pub const DEFAULT_QUALITY: u8 = 80;
pub const MAX_QUALITY: u8 = 100;

/// Filename suffix inserted before the extension when not overwriting.
pub const DEFAULT_PREFIX: &str = "-export";

/// Extensions accepted by the directory scanner, lowercase without dot.
pub const ALLOWED_EXTENSIONS: &[&str] =
    &["webp", "png", "jpeg", "jpg", "gif", "ico", "tiff", "bmp"];

/// Length of the random token embedded in generated GIF filenames.
pub const GIF_TOKEN_LEN: usize = 8;

/// Progress points reserved for the GIF save phase after all frames
/// are composed.
pub const GIF_SAVE_RESERVE: i32 = 25;

/// Encoder speed passed to the GIF encoder (lower is slower but
/// smaller output).
pub const GIF_ENCODER_SPEED: i32 = 10;

pub const ZOPFLI_ITERATIONS: u8 = 15;
pub const LIBDEFLATER_HIGH_LEVEL: u8 = 12;
pub const LIBDEFLATER_LOW_LEVEL: u8 = 8;
