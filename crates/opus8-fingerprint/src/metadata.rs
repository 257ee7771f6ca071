//! Audio metadata extraction via symphonia.
//!
//! Extraction degrades gracefully: if the probe cannot parse the
//! container, the result is a zero-duration record tagged with the file
//! extension rather than an error. Only a missing file is an error.

use std::path::{Path, PathBuf};

use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::warn;

use crate::error::{FingerprintError, Result};

/// Technical metadata describing an audio file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioMetadata {
    /// Duration in milliseconds; 0 when the container could not be parsed.
    pub duration_ms: u64,
    /// Container format, from the lowercased file extension.
    pub format: String,
    pub sample_rate: Option<u32>,
    pub bit_depth: Option<u16>,
}

/// Extract duration, format, and stream parameters from an audio file.
///
/// Fails with [`FingerprintError::NotFound`] if the path does not exist;
/// any parse failure falls back to a zero-duration record.
pub async fn extract_metadata(path: &Path) -> Result<AudioMetadata> {
    if !tokio::fs::try_exists(path).await? {
        return Err(FingerprintError::NotFound(path.to_path_buf()));
    }

    // The probe is blocking work; keep it off the runtime threads.
    let owned: PathBuf = path.to_path_buf();
    tokio::task::spawn_blocking(move || Ok(probe_with_fallback(&owned)))
        .await
        .map_err(|e| FingerprintError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?
}

/// Lowercased extension of a path, or empty string.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default()
}

fn probe_with_fallback(path: &Path) -> AudioMetadata {
    match probe(path) {
        Ok(meta) => meta,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "metadata probe failed, degrading");
            AudioMetadata {
                duration_ms: 0,
                format: extension_of(path),
                sample_rate: None,
                bit_depth: None,
            }
        }
    }
}

fn probe(path: &Path) -> std::result::Result<AudioMetadata, symphonia::core::errors::Error> {
    let file = std::fs::File::open(path)?;
    let stream = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    let format = extension_of(path);
    if !format.is_empty() {
        hint.with_extension(&format);
    }

    let probed = symphonia::default::get_probe().format(
        &hint,
        stream,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;

    let track = probed
        .format
        .default_track()
        .ok_or(symphonia::core::errors::Error::Unsupported("no default track"))?;
    let params = &track.codec_params;

    let duration_ms = match (params.time_base, params.n_frames) {
        (Some(time_base), Some(frames)) => {
            let time = time_base.calc_time(frames);
            time.seconds * 1000 + (time.frac * 1000.0) as u64
        }
        _ => 0,
    };

    Ok(AudioMetadata {
        duration_ms,
        format,
        sample_rate: params.sample_rate,
        bit_depth: params.bits_per_sample.map(|b| b as u16),
    })
}
