use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use parking_lot::{Mutex, RwLock};
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::{
    error::{DataError, DataResult},
    vectorizer::{corpus::Corpus, Index, DEFAULT_PARALLEL_THRESHOLD},
};

/// Identity of a corpus file version: SHA-256 of its bytes
type ContentDigest = [u8; 32];

/// Corpus file contents as read for one build
struct CorpusSource {
    bytes: Vec<u8>,
    digest: ContentDigest,
}

impl CorpusSource {
    fn read(path: &Path) -> DataResult<Self> {
        let bytes = fs::read(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let digest = Sha256::digest(&bytes).into();
        Ok(Self { bytes, digest })
    }

    fn build(&self, path: &Path, parallel_threshold: usize) -> DataResult<Index> {
        let corpus = Corpus::from_reader(self.bytes.as_slice())?;
        debug!(path = %path.display(), rows = corpus.len(), "loaded corpus");
        Ok(Index::build(corpus)?.with_parallel_threshold(parallel_threshold))
    }
}

/// Shared handle to the current index snapshot of one corpus file.
///
/// Readers take an `Arc<Index>` and rank against it without holding any
/// lock. A reload builds a complete new `Index` first and only then
/// replaces the published pointer, so a reader always sees one consistent
/// corpus/vocabulary/matrix triple. A failed reload keeps the old snapshot.
#[derive(Debug)]
pub struct IndexHandle {
    path: PathBuf,
    parallel_threshold: usize,
    current: RwLock<Arc<Index>>,
    /// digest of the file behind the published snapshot
    stamp: Mutex<ContentDigest>,
}

impl IndexHandle {
    /// Load `path` and publish its first snapshot
    ///
    /// # Errors
    /// * any `DataError` from loading or building; nothing is published
    pub fn open<P: AsRef<Path>>(path: P) -> DataResult<Self> {
        Self::open_with_threshold(path, DEFAULT_PARALLEL_THRESHOLD)
    }

    /// Like [`IndexHandle::open`], with the parallel scoring threshold
    /// applied to every snapshot this handle builds
    pub fn open_with_threshold<P: AsRef<Path>>(path: P, parallel_threshold: usize) -> DataResult<Self> {
        let path = path.as_ref().to_path_buf();
        let source = CorpusSource::read(&path)?;
        let index = source.build(&path, parallel_threshold)?;
        info!(path = %path.display(), rows = index.doc_num(), "published corpus snapshot");
        Ok(Self {
            path,
            parallel_threshold,
            current: RwLock::new(Arc::new(index)),
            stamp: Mutex::new(source.digest),
        })
    }

    /// Current snapshot
    pub fn load(&self) -> Arc<Index> {
        Arc::clone(&self.current.read())
    }

    /// Replace the current snapshot with `index`
    pub fn publish(&self, index: Index) {
        *self.current.write() = Arc::new(index);
    }

    /// Corpus file this handle follows
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rebuild from the corpus file unconditionally.
    ///
    /// # Errors
    /// * any `DataError` from loading or building; the previous snapshot stays published
    pub fn reload(&self) -> DataResult<Arc<Index>> {
        let mut stamp = self.stamp.lock();
        let source = CorpusSource::read(&self.path)?;
        self.rebuild(&mut stamp, &source)
    }

    /// Rebuild only when the corpus file changed since the last successful load.
    /// Changes are detected by content, so an edit that keeps the size and
    /// modification time is still picked up.
    ///
    /// # Returns
    /// * `Ok(true)` - a new snapshot was published
    /// * `Ok(false)` - the file is unchanged
    pub fn refresh(&self) -> DataResult<bool> {
        let mut stamp = self.stamp.lock();
        let source = CorpusSource::read(&self.path)?;
        if source.digest == *stamp {
            return Ok(false);
        }
        self.rebuild(&mut stamp, &source).map(|_| true)
    }

    fn rebuild(&self, stamp: &mut ContentDigest, source: &CorpusSource) -> DataResult<Arc<Index>> {
        let index = match source.build(&self.path, self.parallel_threshold) {
            Ok(index) => Arc::new(index),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "corpus reload failed, keeping previous snapshot");
                return Err(err);
            }
        };
        *self.current.write() = Arc::clone(&index);
        *stamp = source.digest;
        info!(path = %self.path.display(), rows = index.doc_num(), "published corpus snapshot");
        Ok(index)
    }
}
