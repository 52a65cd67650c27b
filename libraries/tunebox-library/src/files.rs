//! Byte storage capability for uploaded audio

use async_trait::async_trait;
use chrono::Utc;
use std::path::Path;
use tunebox_core::Result;
use uuid::Uuid;

/// Where uploaded audio bytes live.
///
/// The reference returned by `save` is recorded verbatim on the song and
/// handed back to `delete` when the song goes away.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Persist `bytes` under `file_name`, returning the stable reference
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<String>;

    /// Remove the bytes behind `reference`
    async fn delete(&self, reference: &str) -> Result<()>;
}

/// Storage name for an upload: `<unix-millis>-<uuid><ext>`.
///
/// Only the extension of the client-supplied name survives, so the result
/// is always a single safe path component.
pub fn generate_file_name(original_name: &str) -> String {
    let extension = Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default();

    format!("{}-{}{}", Utc::now().timestamp_millis(), Uuid::new_v4(), extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_extension_only() {
        let name = generate_file_name("../../etc/My Song.MP3");
        assert!(name.ends_with(".mp3"));
        assert!(!name.contains('/'));
        assert!(!name.contains(' '));
    }

    #[test]
    fn missing_or_odd_extension_is_dropped() {
        assert!(!generate_file_name("track").contains('.'));
        assert!(!generate_file_name("track.m p3").contains('.'));
    }

    #[test]
    fn names_are_unique() {
        assert_ne!(generate_file_name("a.mp3"), generate_file_name("a.mp3"));
    }
}
