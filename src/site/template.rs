//! Template repository cloning

use anyhow::{Context, Result};
use git2::{FetchOptions, ObjectType, Repository};
use std::path::Path;

/// Clone `url` into `dest`, optionally checking out `reference`.
///
/// A shallow clone is attempted first; transports that cannot do shallow
/// fetches fall back to a full clone.
pub fn clone_template(url: &str, reference: Option<&str>, dest: &Path) -> Result<()> {
    let url = url.trim_end_matches('/');

    let repo = match reference {
        Some(reference) => {
            let repo = try_shallow_clone_with_branch(url, dest, reference).or_else(|e| {
                tracing::debug!("Shallow clone failed, retrying full clone: {:#}", e);
                full_clone(url, dest)
            })?;
            checkout_ref(&repo, reference)?;
            repo
        }
        None => shallow_clone(url, dest).or_else(|e| {
            tracing::debug!("Shallow clone failed, retrying full clone: {:#}", e);
            full_clone(url, dest)
        })?,
    };
    drop(repo);

    // The scaffold becomes part of the caller's project, not a nested checkout.
    let git_dir = dest.join(".git");
    if git_dir.exists() {
        std::fs::remove_dir_all(&git_dir)
            .with_context(|| format!("Failed removing {}", git_dir.display()))?;
    }
    Ok(())
}

fn try_shallow_clone_with_branch(url: &str, dest: &Path, branch: &str) -> Result<Repository> {
    let mut fo = FetchOptions::new();
    fo.depth(1);

    let mut builder = git2::build::RepoBuilder::new();
    builder.branch(branch);
    builder.fetch_options(fo);

    let result = builder.clone(url, dest);
    if result.is_err() {
        clear_partial_clone(dest);
    }
    result.with_context(|| format!("Shallow clone with branch {branch} failed"))
}

fn shallow_clone(url: &str, dest: &Path) -> Result<Repository> {
    let mut fo = FetchOptions::new();
    fo.depth(1);

    let mut builder = git2::build::RepoBuilder::new();
    builder.fetch_options(fo);

    let result = builder.clone(url, dest);
    if result.is_err() {
        clear_partial_clone(dest);
    }
    result.with_context(|| format!("Shallow clone from {url} failed"))
}

fn full_clone(url: &str, dest: &Path) -> Result<Repository> {
    Repository::clone(url, dest).with_context(|| format!("Failed cloning template from {url}"))
}

/// libgit2 refuses to clone into a non-empty directory left behind by a failed attempt.
fn clear_partial_clone(dest: &Path) {
    if dest.exists() {
        let _ = std::fs::remove_dir_all(dest);
    }
}

fn checkout_ref(repo: &Repository, reference: &str) -> Result<()> {
    let object = repo
        .revparse_single(reference)
        .with_context(|| format!("Failed to resolve ref: {reference}"))?;

    repo.checkout_tree(&object, None)
        .with_context(|| format!("Failed to checkout tree for ref: {reference}"))?;

    if object.kind() == Some(ObjectType::Commit) {
        repo.set_head_detached(object.id())
            .with_context(|| format!("Failed to set detached HEAD for ref: {reference}"))?;
    }

    Ok(())
}
