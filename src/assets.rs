//! Discovery of audio assets on disk.

use crate::config::ConfigError;
use crate::core::Track;
use std::path::Path;
use walkdir::WalkDir;

/// List the tracks directly inside `dir` whose file name ends with
/// `.{extension}` (ASCII case-insensitive). Subdirectories are not
/// searched. Results are sorted by path.
pub fn discover_tracks(dir: &Path, extension: &str) -> Result<Vec<Track>, ConfigError> {
    let suffix = format!(".{}", extension.trim_start_matches('.')).to_ascii_lowercase();
    let mut tracks = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|err| ConfigError::Assets {
            dir: dir.to_path_buf(),
            reason: err.to_string(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_ascii_lowercase();
        if name.ends_with(&suffix) {
            tracks.push(Track::from(entry.into_path()));
        }
    }

    tracks.sort();
    tracing::debug!(dir = %dir.display(), count = tracks.len(), "tracks discovered");
    Ok(tracks)
}

/// Like [`discover_tracks`], but an empty result is an error.
pub fn require_tracks(dir: &Path, extension: &str) -> Result<Vec<Track>, ConfigError> {
    let tracks = discover_tracks(dir, extension)?;
    if tracks.is_empty() {
        return Err(ConfigError::NoTracks {
            dir: dir.to_path_buf(),
            extension: extension.trim_start_matches('.').to_string(),
        });
    }
    Ok(tracks)
}
