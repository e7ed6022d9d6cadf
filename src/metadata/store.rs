//! Side-car metadata store.
//!
//! Every catalog entity has a JSON document at `{root}/{id}.json`. Documents
//! are created lazily the first time an ID is seen and are never rewritten
//! afterwards; hand edits survive every rescan.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use tracing::{debug, warn};
use uuid::Uuid;
use vidshelf_common::{Error, MediaId, MediaKind, MetadataRecord, Result};

use super::data_uri;
use super::provider::{GenerateRequest, MetadataProvider};

/// Subdirectory of the metadata root holding generated thumbnails.
pub const THUMBNAIL_DIR: &str = "thumbnails";

/// URL prefix under which thumbnails are served.
pub const THUMBNAIL_URL_PREFIX: &str = "/metadata/thumbnails";

/// Largest video sent to a provider unless configured otherwise.
pub const DEFAULT_MAX_VIDEO_BYTES: u64 = 20 * 1024 * 1024;

/// What the store needs to know to synthesize a record for a new ID.
#[derive(Debug, Clone, Copy)]
pub struct MetadataRequest<'a> {
    pub id: &'a MediaId,
    /// Title used when nothing better is available.
    pub default_title: &'a str,
    pub kind: MediaKind,
    /// Video handed to the provider. Show records have none.
    pub video: Option<&'a Path>,
}

impl<'a> MetadataRequest<'a> {
    pub fn movie(id: &'a MediaId, default_title: &'a str, video: &'a Path) -> Self {
        Self {
            id,
            default_title,
            kind: MediaKind::Movie,
            video: Some(video),
        }
    }

    pub fn episode(id: &'a MediaId, default_title: &'a str, video: &'a Path) -> Self {
        Self {
            id,
            default_title,
            kind: MediaKind::Episode,
            video: Some(video),
        }
    }

    pub fn show(id: &'a MediaId, default_title: &'a str) -> Self {
        Self {
            id,
            default_title,
            kind: MediaKind::Show,
            video: None,
        }
    }

    /// Whether the record belongs to a TV show (the show itself or one of
    /// its episodes).
    pub fn is_show(&self) -> bool {
        !matches!(self.kind, MediaKind::Movie)
    }

    fn placeholder(&self) -> MetadataRecord {
        match self.kind {
            MediaKind::Show => MetadataRecord::show_placeholder(self.default_title),
            MediaKind::Movie | MediaKind::Episode => {
                MetadataRecord::placeholder(self.default_title, self.is_show())
            }
        }
    }
}

/// Reads and lazily creates side-car metadata documents.
#[derive(Clone)]
pub struct MetadataStore {
    root: PathBuf,
    provider: Option<Arc<dyn MetadataProvider>>,
    max_video_bytes: u64,
}

impl fmt::Debug for MetadataStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataStore")
            .field("root", &self.root)
            .field("provider", &self.provider.as_ref().map(|p| p.name()))
            .field("max_video_bytes", &self.max_video_bytes)
            .finish()
    }
}

impl MetadataStore {
    /// Store rooted at `root`, without a provider.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            provider: None,
            max_video_bytes: DEFAULT_MAX_VIDEO_BYTES,
        }
    }

    /// Ask `provider` for metadata before falling back to a placeholder.
    pub fn with_provider(mut self, provider: Arc<dyn MetadataProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Videos larger than this are never sent to the provider.
    pub fn with_max_video_bytes(mut self, max_video_bytes: u64) -> Self {
        self.max_video_bytes = max_video_bytes;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn thumbnail_dir(&self) -> PathBuf {
        self.root.join(THUMBNAIL_DIR)
    }

    /// Location of the document for `id`.
    ///
    /// Fails with [`Error::InvalidInput`] when the ID cannot name a file
    /// directly inside the root.
    pub fn record_path(&self, id: &MediaId) -> Result<PathBuf> {
        Ok(self.root.join(checked_file_name(id, "json")?))
    }

    /// Read the document for `id`, if one exists.
    pub async fn read(&self, id: &MediaId) -> Result<Option<MetadataRecord>> {
        let path = self.record_path(id)?;
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| Error::metadata_corrupt(id.as_str(), e))
    }

    /// Return the stored record for an ID, creating and persisting one when
    /// the ID has none yet.
    ///
    /// A corrupt document is reported as [`Error::MetadataCorrupt`] and left
    /// untouched.
    pub async fn get_or_create(&self, request: MetadataRequest<'_>) -> Result<MetadataRecord> {
        if let Some(record) = self.read(request.id).await? {
            return Ok(record);
        }

        let record = match self.generate(&request).await {
            Some(record) => record,
            None => request.placeholder(),
        };

        let json = serde_json::to_vec_pretty(&record)
            .map_err(|e| Error::internal(format!("failed to serialize metadata: {}", e)))?;
        let file_name = checked_file_name(request.id, "json")?;
        write_atomic(&self.root, &file_name, &json).await?;

        debug!(id = %request.id, kind = %request.kind, "Created metadata record");
        Ok(record)
    }

    /// Provider-backed record, or `None` when no provider applies or it
    /// failed.
    async fn generate(&self, request: &MetadataRequest<'_>) -> Option<MetadataRecord> {
        let provider = self.provider.as_ref().filter(|p| p.is_available())?;
        let video = request.video?;

        match self.generate_with(provider.as_ref(), request.id, video).await {
            Ok(record) => Some(record),
            Err(e) => {
                let err = Error::provider(format!("{:#}", e));
                warn!(
                    id = %request.id,
                    provider = provider.name(),
                    error = %err,
                    "Metadata generation failed, using placeholder"
                );
                None
            }
        }
    }

    async fn generate_with(
        &self,
        provider: &dyn MetadataProvider,
        id: &MediaId,
        video: &Path,
    ) -> anyhow::Result<MetadataRecord> {
        let size = tokio::fs::metadata(video)
            .await
            .with_context(|| format!("failed to stat {:?}", video))?
            .len();
        if size > self.max_video_bytes {
            bail!(
                "video is {} bytes, over the {} byte provider limit",
                size,
                self.max_video_bytes
            );
        }

        let bytes = tokio::fs::read(video)
            .await
            .with_context(|| format!("failed to read {:?}", video))?;
        let file_name = video
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let mime = vidshelf_parser::mime_type(vidshelf_parser::extension(&file_name).unwrap_or(""));

        let request = GenerateRequest {
            video_data_uri: data_uri::encode(mime, &bytes),
            file_name,
        };
        let generated = provider.generate(&request).await?;
        let thumbnail_url = self.save_thumbnail(id, &generated.thumbnail_data_uri).await?;

        Ok(MetadataRecord {
            title: generated.title,
            description: generated.description,
            ai_hint: generated.ai_hint,
            thumbnail_url,
        })
    }

    /// Persist a data-URI thumbnail and return the URL it is served at.
    async fn save_thumbnail(&self, id: &MediaId, uri: &str) -> anyhow::Result<String> {
        let image = data_uri::decode(uri).context("could not generate thumbnail")?;
        let file_name = checked_file_name(id, image.extension())?;

        write_atomic(&self.thumbnail_dir(), &file_name, &image.bytes)
            .await
            .with_context(|| format!("failed to write thumbnail {}", file_name))?;

        Ok(format!("{}/{}", THUMBNAIL_URL_PREFIX, file_name))
    }
}

fn checked_file_name(id: &MediaId, extension: &str) -> Result<String> {
    id.file_name(extension).ok_or_else(|| {
        Error::invalid_input(format!("ID cannot be used as a file name: {:?}", id.as_str()))
    })
}

/// Write `bytes` to `dir/file_name` through a uniquely named temp file and a
/// rename, creating `dir` if needed. Readers see the old file or the complete
/// new one, never a partial write.
async fn write_atomic(dir: &Path, file_name: &str, bytes: &[u8]) -> std::io::Result<()> {
    tokio::fs::create_dir_all(dir).await?;

    let tmp = dir.join(format!(".{}.{}.tmp", file_name, Uuid::new_v4()));
    if let Err(e) = tokio::fs::write(&tmp, bytes).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e);
    }
    if let Err(e) = tokio::fs::rename(&tmp, dir.join(file_name)).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::provider::GeneratedMetadata;
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;
    use vidshelf_common::{MOVIE_AI_HINT, PLACEHOLDER_THUMBNAIL_URL, SHOW_AI_HINT};

    struct CannedProvider {
        result: Option<GeneratedMetadata>,
        calls: AtomicUsize,
    }

    impl CannedProvider {
        fn ok() -> Arc<Self> {
            Arc::new(Self {
                result: Some(GeneratedMetadata {
                    title: "Generated".into(),
                    description: "A generated description.".into(),
                    ai_hint: "space opera".into(),
                    thumbnail_data_uri: data_uri::encode("image/png", b"png-bytes"),
                }),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                result: None,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl MetadataProvider for CannedProvider {
        fn name(&self) -> &'static str {
            "canned"
        }

        fn is_available(&self) -> bool {
            true
        }

        async fn generate(&self, _request: &GenerateRequest) -> anyhow::Result<GeneratedMetadata> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result
                .clone()
                .ok_or_else(|| anyhow::anyhow!("could not generate text metadata"))
        }
    }

    fn video(dir: &TempDir, name: &str, len: usize) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, vec![7u8; len]).unwrap();
        path
    }

    #[tokio::test]
    async fn creates_movie_placeholder() {
        let dir = TempDir::new().unwrap();
        let store = MetadataStore::new(dir.path().join("meta"));
        let id = MediaId::new("inception");
        let path = video(&dir, "Inception.mkv", 8);

        let record = store
            .get_or_create(MetadataRequest::movie(&id, "Inception", &path))
            .await
            .unwrap();

        assert_eq!(record.title, "Inception");
        assert_eq!(record.description, "A video titled \"Inception\".");
        assert_eq!(record.ai_hint, MOVIE_AI_HINT);
        assert_eq!(record.thumbnail_url, PLACEHOLDER_THUMBNAIL_URL);

        let on_disk = std::fs::read_to_string(store.record_path(&id).unwrap()).unwrap();
        assert!(on_disk.contains("\"aiHint\": \"movie video\""));
        assert!(on_disk.contains("\"thumbnailUrl\""));
    }

    #[tokio::test]
    async fn show_and_episode_hints() {
        let dir = TempDir::new().unwrap();
        let store = MetadataStore::new(dir.path());
        let show = MediaId::new("breaking-bad");
        let ep = MediaId::new("breaking-bad-s1-e1");
        let path = video(&dir, "Pilot.mkv", 8);

        let show_record = store
            .get_or_create(MetadataRequest::show(&show, "Breaking Bad"))
            .await
            .unwrap();
        assert_eq!(show_record.description, "A TV show titled \"Breaking Bad\".");
        assert_eq!(show_record.ai_hint, SHOW_AI_HINT);

        let ep_record = store
            .get_or_create(MetadataRequest::episode(&ep, "Pilot", &path))
            .await
            .unwrap();
        assert_eq!(ep_record.description, "A video titled \"Pilot\".");
        assert_eq!(ep_record.ai_hint, SHOW_AI_HINT);
    }

    #[tokio::test]
    async fn existing_record_returned_verbatim() {
        let dir = TempDir::new().unwrap();
        let store = MetadataStore::new(dir.path());
        let id = MediaId::new("inception");
        let doc = r#"{"title":"Custom","description":"Hand written","aiHint":"dream heist","thumbnailUrl":"/x.png"}"#;
        std::fs::write(store.record_path(&id).unwrap(), doc).unwrap();

        let record = store
            .get_or_create(MetadataRequest::show(&id, "Ignored"))
            .await
            .unwrap();
        assert_eq!(record.title, "Custom");
        assert_eq!(record.ai_hint, "dream heist");

        // The document is not rewritten.
        assert_eq!(std::fs::read_to_string(store.record_path(&id).unwrap()).unwrap(), doc);
    }

    #[tokio::test]
    async fn corrupt_record_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = MetadataStore::new(dir.path());
        let id = MediaId::new("broken");
        std::fs::write(store.record_path(&id).unwrap(), "{not json").unwrap();

        let err = store
            .get_or_create(MetadataRequest::show(&id, "Broken"))
            .await
            .unwrap_err();
        assert_matches!(err, Error::MetadataCorrupt { .. });
        assert_eq!(
            std::fs::read_to_string(store.record_path(&id).unwrap()).unwrap(),
            "{not json"
        );
    }

    #[tokio::test]
    async fn unsafe_id_rejected() {
        let dir = TempDir::new().unwrap();
        let store = MetadataStore::new(dir.path().join("meta"));

        for raw in ["../escape", "a/b", "/abs"] {
            let id = MediaId::new(raw);
            let err = store
                .get_or_create(MetadataRequest::show(&id, "Up"))
                .await
                .unwrap_err();
            assert_matches!(err, Error::InvalidInput(_));
            assert_matches!(store.record_path(&id), Err(Error::InvalidInput(_)));
        }
        assert!(!dir.path().join("escape.json").exists());
    }

    #[tokio::test]
    async fn dot_only_id_gets_a_sidecar() {
        let dir = TempDir::new().unwrap();
        let store = MetadataStore::new(dir.path());
        let id = MediaId::new("..");

        let record = store
            .get_or_create(MetadataRequest::show(&id, ".."))
            .await
            .unwrap();
        assert_eq!(record.title, "..");
        assert_eq!(store.record_path(&id).unwrap(), dir.path().join("...json"));
        assert!(dir.path().join("...json").is_file());
    }

    #[tokio::test]
    async fn provider_record_and_thumbnail() {
        let dir = TempDir::new().unwrap();
        let provider = CannedProvider::ok();
        let store = MetadataStore::new(dir.path().join("meta")).with_provider(provider.clone());
        let id = MediaId::new("dune");
        let path = video(&dir, "Dune.mp4", 16);

        let record = store
            .get_or_create(MetadataRequest::movie(&id, "Dune", &path))
            .await
            .unwrap();

        assert_eq!(record.title, "Generated");
        assert_eq!(record.ai_hint, "space opera");
        assert_eq!(record.thumbnail_url, "/metadata/thumbnails/dune.png");
        assert_eq!(
            std::fs::read(store.thumbnail_dir().join("dune.png")).unwrap(),
            b"png-bytes"
        );

        // Second lookup reads the side-car instead of asking again.
        store
            .get_or_create(MetadataRequest::movie(&id, "Dune", &path))
            .await
            .unwrap();
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn provider_failure_falls_back() {
        let dir = TempDir::new().unwrap();
        let store = MetadataStore::new(dir.path()).with_provider(CannedProvider::failing());
        let id = MediaId::new("dune");
        let path = video(&dir, "Dune.mp4", 16);

        let record = store
            .get_or_create(MetadataRequest::movie(&id, "Dune", &path))
            .await
            .unwrap();
        assert_eq!(record.thumbnail_url, PLACEHOLDER_THUMBNAIL_URL);
    }

    #[tokio::test]
    async fn oversized_video_not_sent() {
        let dir = TempDir::new().unwrap();
        let provider = CannedProvider::ok();
        let store = MetadataStore::new(dir.path())
            .with_provider(provider.clone())
            .with_max_video_bytes(4);
        let id = MediaId::new("dune");
        let path = video(&dir, "Dune.mp4", 16);

        let record = store
            .get_or_create(MetadataRequest::movie(&id, "Dune", &path))
            .await
            .unwrap();
        assert_eq!(record.title, "Dune");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn show_records_skip_provider() {
        let dir = TempDir::new().unwrap();
        let provider = CannedProvider::ok();
        let store = MetadataStore::new(dir.path()).with_provider(provider.clone());
        let id = MediaId::new("the-office");

        store
            .get_or_create(MetadataRequest::show(&id, "The Office"))
            .await
            .unwrap();
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn no_temp_files_left_behind() {
        let dir = TempDir::new().unwrap();
        let store = MetadataStore::new(dir.path());
        let id = MediaId::new("a");
        store
            .get_or_create(MetadataRequest::show(&id, "A"))
            .await
            .unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.json".to_string()]);
    }
}
