//! Project workspace directories on disk.
//!
//! Every project gets its own copy of the template workspace, named after the
//! project and the local time it was created (`My_Grid_20260314093000`).
//! Filesystem walks run on the blocking pool.

use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use rd_core::naming::sanitize_project_name;
use tracing::{debug, info, warn};

use crate::error::ProjectError;

/// Directory name for a project created at `created`.
#[must_use]
pub fn project_dir_name(name: &str, created: NaiveDateTime) -> String {
    format!(
        "{}_{}",
        sanitize_project_name(name),
        created.format("%Y%m%d%H%M%S")
    )
}

/// First path under `parent` named `stem`, `stem_2`, `stem_3`, ... that
/// does not exist yet.
fn unique_dir(parent: &Path, stem: &str) -> PathBuf {
    let candidate = parent.join(stem);
    if !candidate.exists() {
        return candidate;
    }
    (2u32..)
        .map(|n| parent.join(format!("{stem}_{n}")))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

/// Symlinks are followed, so the copy holds no links back into the template.
fn copy_dir_all(src: &Path, dst: &Path) -> io::Result<u64> {
    std::fs::create_dir_all(dst)?;
    let mut files = 0;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        let file_type = entry.file_type()?;
        let is_dir = if file_type.is_symlink() {
            std::fs::metadata(entry.path())?.is_dir()
        } else {
            file_type.is_dir()
        };
        if is_dir {
            files += copy_dir_all(&entry.path(), &target)?;
        } else {
            std::fs::copy(entry.path(), &target)?;
            files += 1;
        }
    }
    Ok(files)
}

/// Copy `template` into a fresh directory under `projects_dir`.
///
/// # Errors
///
/// Returns `ProjectError::MissingTemplate` when `template` is not a
/// directory, or `ProjectError::Io` when the copy fails. A partial copy is
/// removed before returning.
pub async fn create_from_template(
    template: &Path,
    projects_dir: &Path,
    name: &str,
    created: NaiveDateTime,
) -> Result<PathBuf, ProjectError> {
    if !template.is_dir() {
        return Err(ProjectError::MissingTemplate(template.to_path_buf()));
    }
    tokio::fs::create_dir_all(projects_dir).await?;
    let dest = unique_dir(projects_dir, &project_dir_name(name, created));

    let (src, dst) = (template.to_path_buf(), dest.clone());
    let copied = tokio::task::spawn_blocking(move || copy_dir_all(&src, &dst)).await?;
    match copied {
        Ok(files) => {
            info!(dir = %dest.display(), files, "project workspace created");
            Ok(dest)
        }
        Err(error) => {
            if let Err(cleanup) = tokio::fs::remove_dir_all(&dest).await {
                warn!(dir = %dest.display(), error = %cleanup, "could not remove partial workspace");
            }
            Err(error.into())
        }
    }
}

/// Remove a project workspace. Returns `false` if it was already gone.
///
/// # Errors
///
/// Returns `ProjectError::Io` for anything other than a missing directory.
pub async fn remove(dir: &Path) -> Result<bool, ProjectError> {
    match tokio::fs::remove_dir_all(dir).await {
        Ok(()) => {
            info!(dir = %dir.display(), "project workspace removed");
            Ok(true)
        }
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            warn!(dir = %dir.display(), "project workspace already missing");
            Ok(false)
        }
        Err(error) => Err(error.into()),
    }
}

/// Copy one file, creating the destination's parent directories.
///
/// # Errors
///
/// Returns `ProjectError::Io` if the source cannot be read or the
/// destination written.
pub async fn copy_file(src: &Path, dst: &Path) -> Result<u64, ProjectError> {
    if let Some(parent) = dst.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let bytes = tokio::fs::copy(src, dst).await?;
    debug!(from = %src.display(), to = %dst.display(), bytes, "copied file");
    Ok(bytes)
}
