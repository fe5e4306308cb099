//! Bundled track metadata.
//!
//! The player ships with a single statically packaged audio file; the only
//! metadata the control surface needs is a display title, taken verbatim
//! from the file name minus its extension.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VarispeedError};

/// Reference to the bundled audio resource plus its derived display title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    source: String,
    title: String,
}

impl Track {
    /// Create a track from a bundled resource reference.
    ///
    /// The title is the file stem of the reference, so
    /// `assets/music/Popular-Potpourri.mp3` displays as `Popular-Potpourri`.
    ///
    /// # Errors
    /// Returns [`VarispeedError::InvalidTrackSource`] when the reference has
    /// no file stem (empty string, trailing slash, bare extension).
    pub fn new(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let title = Path::new(&source)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .filter(|stem| !stem.is_empty())
            .ok_or_else(|| VarispeedError::InvalidTrackSource {
                source_ref: source.clone(),
            })?;

        Ok(Self { source, title })
    }

    /// The resource reference handed to the engine's loader.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Display title: file name without extension.
    pub fn title(&self) -> &str {
        &self.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_strips_path_and_extension() {
        let track = Track::new("./assets/music/Popular-Potpourri.mp3").unwrap();
        assert_eq!(track.title(), "Popular-Potpourri");
        assert_eq!(track.source(), "./assets/music/Popular-Potpourri.mp3");
    }

    #[test]
    fn test_bare_filename() {
        let track = Track::new("loop.wav").unwrap();
        assert_eq!(track.title(), "loop");
    }

    #[test]
    fn test_no_extension_keeps_name() {
        let track = Track::new("music/jam-session").unwrap();
        assert_eq!(track.title(), "jam-session");
    }

    #[test]
    fn test_empty_source_rejected() {
        let err = Track::new("").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_TRACK_SOURCE");
    }

    #[test]
    fn test_stemless_source_rejected() {
        assert!(Track::new("/").is_err());
        assert!(Track::new("..").is_err());
    }
}
