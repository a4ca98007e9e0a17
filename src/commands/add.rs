//! # Add Command
//!
//! Stage files for the next commit: hash each file into a blob and
//! record `path -> fingerprint` in the index. Files under `.minigit/`
//! and `.minigitignore` patterns are skipped; directories are walked
//! recursively.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::error::MinigitError;
use crate::ignore;
use crate::index::Index;
use crate::objects::Blob;
use crate::Repository;

fn stage_file(
    repo: &Repository,
    index: &mut Index,
    file_path: &Path,
    repo_root: &Path,
    ignore_rules: &ignore::IgnoreRules,
) -> Result<()> {
    let relative_path = file_path
        .strip_prefix(repo_root)
        .context("File is not in repository")?
        .to_string_lossy()
        .replace('\\', "/");

    if relative_path.starts_with(&format!("{}/", crate::MINIGIT_DIR)) || relative_path == ".minigitignore" {
        return Ok(());
    }

    if ignore_rules.is_ignored(&relative_path, false) {
        return Ok(());
    }

    let fingerprint = Blob::from_file(file_path)?.store(repo)?;
    index.add_entry(relative_path, fingerprint);

    Ok(())
}

fn stage_path(
    repo: &Repository,
    index: &mut Index,
    path: &Path,
    repo_root: &Path,
    ignore_rules: &ignore::IgnoreRules,
) -> Result<()> {
    if path.is_file() {
        stage_file(repo, index, path, repo_root, ignore_rules)?;
    } else if path.is_dir() {
        for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
            let entry_path = entry.path();

            if entry_path.is_dir() {
                let relative = entry_path
                    .strip_prefix(repo_root)
                    .ok()
                    .map(|p| p.to_string_lossy().replace('\\', "/"));
                if let Some(rel) = relative {
                    if rel == crate::MINIGIT_DIR || ignore_rules.is_ignored(&rel, true) {
                        continue;
                    }
                }
            }

            if entry_path.is_file() {
                stage_file(repo, index, entry_path, repo_root, ignore_rules)?;
            }
        }
    } else {
        return Err(MinigitError::PathNotFound(path.display().to_string()).into());
    }

    Ok(())
}

pub fn run(paths: Vec<String>) -> Result<()> {
    let repo = Repository::find()?;
    let repo_root = repo.root.clone();
    let index_path = repo.index_path();

    let mut index = Index::load(&index_path)?;
    let ignore_rules = ignore::load_ignore_rules(&repo_root)?;

    for path_str in paths {
        let path = PathBuf::from(&path_str);

        let full_path = if path.is_absolute() {
            path
        } else {
            let candidate = std::env::current_dir()?.join(&path);
            candidate
                .canonicalize()
                .map_err(|_| MinigitError::PathNotFound(path_str.clone()))?
        };

        stage_path(&repo, &mut index, &full_path, &repo_root, &ignore_rules)?;
    }

    index.save(&index_path)?;

    Ok(())
}
