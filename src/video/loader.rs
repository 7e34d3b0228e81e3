use std::path::{Path, PathBuf};

use base64::{prelude::BASE64_STANDARD, Engine};
use image::ImageFormat;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::{
    config::LoaderConfig,
    error::{EditorError, LoaderError, Result},
    video::types::{reindex, Frame},
};

/// Reads image files from disk into encoded frames and writes them back
pub struct FrameLoader {
    config: LoaderConfig,
}

impl FrameLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Load every supported image in `dir`, ordered by file name
    pub fn load_dir<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<Frame>> {
        let dir = dir.as_ref();
        let mut paths = Vec::new();

        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && !Self::is_hidden_file(&path) && self.is_supported(&path) {
                paths.push(path);
            }
        }

        if paths.is_empty() {
            return Err(LoaderError::NoFrames { path: dir.display().to_string() }.into());
        }

        paths.sort();
        debug!("Reading {} frame files on {} threads", paths.len(), self.config.threads);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.threads)
            .build()
            .map_err(|e| EditorError::generic(format!("Failed to start loader threads: {}", e)))?;

        let frames = pool.install(|| {
            paths
                .par_iter()
                .map(|path| Self::load_frame(path))
                .collect::<Result<Vec<Frame>>>()
        })?;

        info!("Loaded {} frames from {:?}", frames.len(), dir);
        Ok(reindex(frames))
    }

    /// Encode a single image file as a frame (id 0)
    pub fn load_frame<P: AsRef<Path>>(path: P) -> Result<Frame> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;

        let format = image::guess_format(&bytes)
            .map_err(|_| LoaderError::UnsupportedFormat { path: path.display().to_string() })?;

        Ok(Frame::new(0, BASE64_STANDARD.encode(&bytes), mime_type(format)))
    }

    /// Write frames to `dir` as `frame_00000.<ext>`, returning the written paths
    pub fn write_frames<P: AsRef<Path>>(frames: &[Frame], dir: P) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let mut written = Vec::with_capacity(frames.len());
        for frame in frames {
            let path = dir.join(format!("frame_{:05}.{}", frame.id, extension(&frame.mime_type)));
            let bytes = BASE64_STANDARD
                .decode(frame.data.as_bytes())
                .map_err(|e| LoaderError::DecodeFailed {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?;

            std::fs::write(&path, bytes)?;
            written.push(path);
        }

        debug!("Wrote {} frames to {:?}", written.len(), dir);
        Ok(written)
    }

    /// Check if a path has one of the configured frame extensions
    pub fn is_supported<P: AsRef<Path>>(&self, path: P) -> bool {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.config.extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }

    fn is_hidden_file(path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
    }
}

impl Default for FrameLoader {
    fn default() -> Self {
        Self::new(LoaderConfig::default())
    }
}

fn mime_type(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Png => "image/png",
        ImageFormat::Jpeg => "image/jpeg",
        ImageFormat::WebP => "image/webp",
        ImageFormat::Bmp => "image/bmp",
        ImageFormat::Gif => "image/gif",
        _ => "application/octet-stream",
    }
}

fn extension(mime_type: &str) -> &'static str {
    match mime_type {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        "image/bmp" => "bmp",
        "image/gif" => "gif",
        _ => "bin",
    }
}
