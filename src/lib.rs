pub mod cli;
pub mod compress;
pub mod config;
pub mod constants;
pub mod error;
pub mod gif;
pub mod logger;
pub mod naming;
pub mod progress;
pub mod resize;
pub mod scan;

pub use compress::{save_image, BatchCompressor, BatchOutcome};
pub use config::{BatchConfig, OutputFormat};
pub use error::{ForgeError, Result};
pub use gif::{GifBuilder, GifOptions};
pub use naming::{gif_file_name, resolve_name};
pub use progress::{BarSink, NullSink, ProgressSink};
pub use resize::{resize, scaled_height, target_height};
pub use scan::{is_image_file, parse_images};
