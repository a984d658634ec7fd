//! Destination filename policy.
//!
//! Overwrite mode reuses the source basename so the output replaces the
//! input. Otherwise the name is derived from the stem plus the configured
//! prefix, with the extension swapped for the target format's, and an
//! optional wall-clock suffix that makes repeated runs collision-free.

use crate::config::OutputFormat;
use crate::constants::GIF_TOKEN_LEN;
use crate::error::{ForgeError, Result};
use rand::Rng;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Microsecond wall-clock reading, bumped past the previous reading so
/// two calls in the same process never return the same value.
fn clock_token() -> u64 {
    static LAST: AtomicU64 = AtomicU64::new(0);

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_micros() as u64;

    let mut prev = LAST.load(Ordering::Relaxed);
    loop {
        let next = now.max(prev + 1);
        match LAST.compare_exchange(prev, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(observed) => prev = observed,
        }
    }
}

/// Compute the output filename for one processed image.
///
/// With `overwrite` the source basename is returned unchanged. The
/// timestamp branch wins over the plain prefixed name: when `timestamp`
/// is set the clock value is always appended.
pub fn resolve_name(
    source: &Path,
    overwrite: bool,
    timestamp: bool,
    prefix: &str,
    format: OutputFormat,
) -> Result<String> {
    let basename = source
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ForgeError::InvalidFileName(source.to_path_buf()))?;

    if overwrite {
        return Ok(basename.to_string());
    }

    let (stem, source_ext) = match basename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (basename, None),
    };

    let ext = match format.extension().or(source_ext) {
        Some(ext) => format!(".{}", ext),
        None => String::new(),
    };

    if timestamp {
        Ok(format!("{}{}-{}{}", stem, prefix, clock_token(), ext))
    } else {
        Ok(format!("{}{}{}", stem, prefix, ext))
    }
}

/// Generate a name for a combined GIF: random lowercase token with the
/// configured width echoed in the prefix. Collisions are not checked.
pub fn gif_file_name(base_width: u32) -> String {
    let mut rng = rand::thread_rng();
    let token: String = (0..GIF_TOKEN_LEN)
        .map(|_| rng.gen_range(b'a'..=b'z') as char)
        .collect();
    format!("gif-{}-{}.gif", base_width, token)
}
