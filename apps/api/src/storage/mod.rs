//! Resume file storage rooted at a single directory with three buckets.
//!
//! Every path handed in or out of this module is *relative* to the storage root
//! and uses `/` separators, which is the form persisted in `students.resume_path`.

pub mod filename;

use std::io;
use std::path::{Component, Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// One of the storage subdirectories a resume may live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Temp,
    Qualified,
    Unqualified,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::Temp, Bucket::Qualified, Bucket::Unqualified];

    pub fn dir_name(self) -> &'static str {
        match self {
            Bucket::Temp => "temp_resumes",
            Bucket::Qualified => "qualified_resumes",
            Bucket::Unqualified => "unqualified_resumes",
        }
    }

    /// The bucket a relative path points into, judged by its first segment.
    pub fn of(relative: &str) -> Option<Bucket> {
        let first = relative.split('/').next()?;
        Bucket::ALL.into_iter().find(|b| b.dir_name() == first)
    }
}

/// Handle on the storage root. Cheap to clone; holds no open files.
#[derive(Debug, Clone)]
pub struct ResumeStorage {
    root: PathBuf,
}

impl ResumeStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the root and all bucket directories if missing.
    pub async fn ensure_layout(&self) -> io::Result<()> {
        for bucket in Bucket::ALL {
            fs::create_dir_all(self.root.join(bucket.dir_name())).await?;
        }
        info!("Storage root ready at {}", self.root.display());
        Ok(())
    }

    /// Writes `contents` as `file_name` into the temp bucket and returns its relative path.
    /// Refuses to overwrite an existing file.
    pub async fn stage(&self, file_name: &str, contents: &[u8]) -> io::Result<String> {
        let relative = relative_in(Bucket::Temp, file_name);
        let absolute = self
            .resolve(&relative)
            .ok_or_else(|| invalid_path(&relative))?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&absolute)
            .await?;
        file.write_all(contents).await?;
        file.flush().await?;

        debug!("Staged {} bytes at {relative}", contents.len());
        Ok(relative)
    }

    /// Relative path the file at `relative` would have inside `bucket`,
    /// keeping only its base name.
    pub fn rebase(&self, relative: &str, bucket: Bucket) -> Option<String> {
        let base = relative.rsplit('/').next().filter(|b| !b.is_empty())?;
        Some(relative_in(bucket, base))
    }

    /// Whether a regular file exists at `relative`.
    pub async fn exists(&self, relative: &str) -> bool {
        match self.resolve(relative) {
            Some(path) => fs::metadata(path).await.map(|m| m.is_file()).unwrap_or(false),
            None => false,
        }
    }

    /// Moves a file between two relative locations. Falls back to copy + remove
    /// when a plain rename is refused (e.g. the buckets sit on different devices).
    pub async fn move_file(&self, from: &str, to: &str) -> io::Result<()> {
        let source = self.resolve(from).ok_or_else(|| invalid_path(from))?;
        let target = self.resolve(to).ok_or_else(|| invalid_path(to))?;

        match fs::rename(&source, &target).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(e),
            Err(e) => {
                debug!("rename {from} -> {to} failed ({e}); copying instead");
                copy_then_remove(&source, &target).await
            }
        }
    }

    /// Joins `relative` onto the root after rejecting anything but plain
    /// name segments (no `..`, no absolute paths, no drive prefixes).
    pub fn resolve(&self, relative: &str) -> Option<PathBuf> {
        if relative.is_empty() || relative.contains('\\') {
            return None;
        }
        let path = Path::new(relative);
        if !path.components().all(|c| matches!(c, Component::Normal(_))) {
            return None;
        }
        Some(self.root.join(path))
    }

    /// Resolves `relative` to an existing regular file whose canonical location
    /// is still inside the canonical root, so symlinks cannot leak out either.
    pub async fn resolve_existing(&self, relative: &str) -> Option<PathBuf> {
        let joined = self.resolve(relative)?;
        let root = fs::canonicalize(&self.root).await.ok()?;
        let target = fs::canonicalize(&joined).await.ok()?;
        if !target.starts_with(&root) {
            return None;
        }
        let meta = fs::metadata(&target).await.ok()?;
        meta.is_file().then_some(target)
    }
}

/// Copies `source` over to `target`, then removes `source`. A partial copy is
/// removed again so the file exists in exactly one place on failure.
async fn copy_then_remove(source: &Path, target: &Path) -> io::Result<()> {
    if let Err(e) = fs::copy(source, target).await {
        let _ = fs::remove_file(target).await;
        return Err(e);
    }
    fs::remove_file(source).await
}

fn relative_in(bucket: Bucket, file_name: &str) -> String {
    format!("{}/{}", bucket.dir_name(), file_name)
}

fn invalid_path(relative: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("path '{relative}' is outside the storage root"),
    )
}
