use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Duration, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::SystemConfig;
use crate::error::AppError;

const AUDIO_EXTENSION: &str = "mp3";

static AUDIO_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-f0-9]{32}$").expect("audio id pattern is valid"));

/// Audio ids are v4 UUIDs rendered as 32 lowercase hex characters.
pub fn is_valid_audio_id(audio_id: &str) -> bool {
    AUDIO_ID.is_match(audio_id)
}

/// A freshly allocated slot for synthesized speech
#[derive(Debug, Clone)]
pub struct AudioArtifact {
    pub id: String,
    pub path: PathBuf,
}

impl AudioArtifact {
    pub fn url(&self) -> String {
        format!("/audio/{}", self.id)
    }
}

/// Directory of generated audio files with time-based expiry.
#[derive(Debug, Clone)]
pub struct AudioStore {
    dir: PathBuf,
    retention: Duration,
}

impl AudioStore {
    pub fn new(dir: impl Into<PathBuf>, retention: Duration) -> Self {
        Self {
            dir: dir.into(),
            retention,
        }
    }

    pub fn from_config(config: &SystemConfig) -> Self {
        Self::new(config.audio_path(), config.audio_retention())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn ensure_dir(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)
    }

    pub fn allocate(&self) -> AudioArtifact {
        let id = Uuid::new_v4().as_simple().to_string();
        let path = self.file_path(&id);
        AudioArtifact { id, path }
    }

    fn file_path(&self, audio_id: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", audio_id, AUDIO_EXTENSION))
    }

    /// Resolve an id to its file path, rejecting anything that is not a well-formed id.
    pub fn audio_path(&self, audio_id: &str) -> Result<PathBuf, AppError> {
        if !is_valid_audio_id(audio_id) {
            return Err(AppError::InvalidAudioId);
        }
        Ok(self.file_path(audio_id))
    }

    pub async fn read(&self, audio_id: &str) -> Result<Vec<u8>, AppError> {
        let path = self.audio_path(audio_id)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(AppError::AudioNotFound),
            Err(e) => Err(e.into()),
        }
    }

    /// Number of entries currently in the audio directory
    pub async fn count(&self) -> io::Result<usize> {
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        let mut count = 0;
        while entries.next_entry().await?.is_some() {
            count += 1;
        }
        Ok(count)
    }

    /// Remove files older than the retention window. Failures on individual
    /// files are logged and skipped.
    ///
    /// Returns the number of files removed.
    pub async fn cleanup_expired(&self) -> usize {
        let files = match self.list_files().await {
            Ok(files) => files,
            Err(e) => {
                warn!("Could not scan audio directory {:?}: {}", self.dir, e);
                return 0;
            }
        };

        let now = Utc::now();
        let mut removed = 0;

        for (path, modified) in files {
            let modified: DateTime<Utc> = modified.into();
            if now.signed_duration_since(modified) > self.retention && remove_file(&path).await {
                removed += 1;
            }
        }

        if removed > 0 {
            info!("Removed {} audio file(s) from {:?}", removed, self.dir);
        }
        removed
    }

    async fn list_files(&self) -> io::Result<Vec<(PathBuf, SystemTime)>> {
        let mut files = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let metadata = match entry.metadata().await {
                Ok(metadata) => metadata,
                Err(e) => {
                    warn!("Could not stat {:?}: {}", entry.path(), e);
                    continue;
                }
            };
            if !metadata.is_file() {
                continue;
            }
            match metadata.modified() {
                Ok(modified) => files.push((entry.path(), modified)),
                Err(e) => warn!("No modification time for {:?}: {}", entry.path(), e),
            }
        }
        Ok(files)
    }
}

async fn remove_file(path: &Path) -> bool {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {
            debug!("Removed audio file: {:?}", path);
            true
        }
        Err(e) => {
            warn!("Error deleting {:?}: {}", path, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::Duration as StdDuration;

    fn write_aged(dir: &Path, name: &str, age: StdDuration) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, b"ID3").unwrap();
        let file = File::options().write(true).open(&path).unwrap();
        file.set_modified(SystemTime::now() - age).unwrap();
        path
    }

    #[test]
    fn audio_id_shape() {
        assert!(is_valid_audio_id("0123456789abcdef0123456789abcdef"));
        assert!(!is_valid_audio_id("0123456789ABCDEF0123456789ABCDEF"));
        assert!(!is_valid_audio_id("0123456789abcdef0123456789abcde"));
        assert!(!is_valid_audio_id("0123456789abcdef0123456789abcdef0"));
        assert!(!is_valid_audio_id("../../etc/passwd"));
        assert!(!is_valid_audio_id("0123456789abcdef0123456789abcdeg"));
        assert!(!is_valid_audio_id(""));
    }

    #[test]
    fn allocated_ids_are_valid_and_distinct() {
        let store = AudioStore::new("audio", Duration::hours(24));
        let a = store.allocate();
        let b = store.allocate();
        assert!(is_valid_audio_id(&a.id));
        assert_ne!(a.id, b.id);
        assert_eq!(a.path, PathBuf::from("audio").join(format!("{}.mp3", a.id)));
        assert_eq!(a.url(), format!("/audio/{}", a.id));
    }

    #[test]
    fn audio_path_rejects_malformed_ids() {
        let store = AudioStore::new("audio", Duration::hours(24));
        assert!(matches!(store.audio_path("nope"), Err(AppError::InvalidAudioId)));
    }

    #[tokio::test]
    async fn read_distinguishes_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = AudioStore::new(dir.path(), Duration::hours(24));
        let artifact = store.allocate();

        assert!(matches!(store.read(&artifact.id).await, Err(AppError::AudioNotFound)));

        std::fs::write(&artifact.path, b"mp3-bytes").unwrap();
        assert_eq!(store.read(&artifact.id).await.unwrap(), b"mp3-bytes");
    }

    #[tokio::test]
    async fn cleanup_removes_only_expired_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = AudioStore::new(dir.path(), Duration::hours(24));

        let old = write_aged(dir.path(), "old.mp3", StdDuration::from_secs(25 * 3600));
        let fresh = write_aged(dir.path(), "fresh.mp3", StdDuration::from_secs(3600));

        assert_eq!(store.cleanup_expired().await, 1);
        assert!(!old.exists());
        assert!(fresh.exists());
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn cleanup_keeps_every_unexpired_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = AudioStore::new(dir.path(), Duration::hours(24));

        let files: Vec<PathBuf> = (0..150)
            .map(|i| write_aged(dir.path(), &format!("{i}.mp3"), StdDuration::from_secs(i * 60)))
            .collect();

        assert_eq!(store.cleanup_expired().await, 0);
        assert!(files.iter().all(|path| path.exists()));
        assert_eq!(store.count().await.unwrap(), 150);
    }

    #[tokio::test]
    async fn count_includes_every_directory_entry() {
        let dir = tempfile::tempdir().unwrap();
        let store = AudioStore::new(dir.path(), Duration::hours(24));

        write_aged(dir.path(), "a.mp3", StdDuration::from_secs(60));
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[test]
    fn retention_comes_from_config() {
        let config = SystemConfig {
            audio_dir: "clips".to_string(),
            audio_retention_hours: 3,
            ..SystemConfig::default()
        };
        let store = AudioStore::from_config(&config);
        assert_eq!(store.dir(), Path::new("clips"));
        assert_eq!(store.retention, Duration::hours(3));
    }

    #[tokio::test]
    async fn cleanup_of_missing_directory_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let store = AudioStore::new(dir.path().join("absent"), Duration::hours(1));
        assert_eq!(store.cleanup_expired().await, 0);
    }

    #[test]
    fn ensure_dir_creates_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = AudioStore::new(dir.path().join("a/b"), Duration::hours(1));
        store.ensure_dir().unwrap();
        assert!(dir.path().join("a/b").is_dir());
    }
}
