use std::{ffi::OsString, marker::PhantomData, path::PathBuf};

use models::errors::ModelError;
use models::keys::{self, CanonicalKeys};
use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::Mutex};
use tracing::{debug, warn};

use crate::errors::ServiceError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Outcome of a [`JsonFileStore::mutate`] closure: whether to persist, and the value to return.
pub enum Mutation<R> {
    Write(R),
    Skip(R),
}

/// Generic JSON document store backed by a single file.
///
/// Nothing is cached: every call re-reads the file, so the file is the only
/// source of truth. A missing, blank or malformed document loads as
/// `T::default()` (malformed content is logged), but `mutate` refuses to
/// rewrite a malformed document. A leading UTF-8 BOM is ignored. Writes replace the whole
/// file with pretty-printed JSON via a temp file and rename. `mutate` holds
/// an async lock for the full read-modify-write cycle, so writers sharing
/// this store never lose each other's updates.
pub struct JsonFileStore<T> {
    file_path: PathBuf,
    write_lock: Mutex<()>,
    _doc: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + CanonicalKeys + Default,
{
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into(), write_lock: Mutex::new(()), _doc: PhantomData }
    }

    /// Read and decode the current document, recovering to `T::default()`
    /// (with a warning) when the content is malformed.
    pub async fn load(&self) -> Result<T, ServiceError> {
        match self.read().await? {
            Ok(doc) => Ok(doc),
            Err(e) => {
                warn!(path = %self.file_path.display(), error = %e, "malformed storage file; using empty document");
                Ok(T::default())
            }
        }
    }

    /// Load, apply `f`, and persist when `f` returns [`Mutation::Write`].
    /// A malformed document is an error here: it is never overwritten.
    pub async fn mutate<R, F>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut T) -> Mutation<R>,
    {
        let _guard = self.write_lock.lock().await;
        let mut doc = self
            .read()
            .await?
            .map_err(|source| ServiceError::malformed(&self.file_path, source))?;
        match f(&mut doc) {
            Mutation::Write(out) => {
                self.save(&doc).await?;
                Ok(out)
            }
            Mutation::Skip(out) => Ok(out),
        }
    }

    /// Outer error: I/O. Inner error: content that does not decode.
    async fn read(&self) -> Result<Result<T, ModelError>, ServiceError> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.file_path.display(), "storage file missing; using empty document");
                return Ok(Ok(T::default()));
            }
            Err(e) => return Err(ServiceError::io(&self.file_path, e)),
        };

        let content = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes).trim_ascii();
        if content.is_empty() || content == b"null" {
            return Ok(Ok(T::default()));
        }
        Ok(keys::decode::<T>(content))
    }

    async fn save(&self, doc: &T) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(doc)?;
        if let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| ServiceError::io(parent, e))?;
        }
        let tmp = self.tmp_path();
        fs::write(&tmp, data).await.map_err(|e| ServiceError::io(&tmp, e))?;
        fs::rename(&tmp, &self.file_path)
            .await
            .map_err(|e| ServiceError::io(&self.file_path, e))?;
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name: OsString = self.file_path.file_name().map(OsString::from).unwrap_or_default();
        name.push(".tmp");
        self.file_path.with_file_name(name)
    }
}
