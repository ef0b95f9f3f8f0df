//! Companion docs-site lifecycle: scaffold from a template, then install,
//! build and preview through the site's package manager.

pub mod template;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::SiteConfig;

pub struct DocsSite {
    docs_dir: PathBuf,
    package_manager: String,
}

impl DocsSite {
    pub fn new(config: &SiteConfig) -> Self {
        Self { docs_dir: config.docs_dir.clone(), package_manager: config.package_manager.clone() }
    }

    pub fn docs_dir(&self) -> &Path {
        &self.docs_dir
    }

    /// Clone the template into the docs directory and create `reference_dir`.
    pub fn init(
        &self,
        template_repo: &str,
        template_ref: Option<&str>,
        reference_dir: &Path,
    ) -> Result<()> {
        if is_non_empty_dir(&self.docs_dir)? {
            anyhow::bail!(
                "Docs directory already exists and is not empty: {}",
                self.docs_dir.display()
            );
        }

        tracing::info!("Cloning {} into {}", template_repo, self.docs_dir.display());
        template::clone_template(template_repo, template_ref, &self.docs_dir)?;

        std::fs::create_dir_all(reference_dir).with_context(|| {
            format!("Failed creating reference directory: {}", reference_dir.display())
        })?;
        Ok(())
    }

    pub fn install(&self) -> Result<()> {
        self.run_package_manager(&["install"])
    }

    pub fn build(&self) -> Result<()> {
        self.run_package_manager(&["run", "build"])
    }

    pub fn preview(&self) -> Result<()> {
        self.run_package_manager(&["run", "preview"])
    }

    fn run_package_manager(&self, args: &[&str]) -> Result<()> {
        if !self.docs_dir.is_dir() {
            anyhow::bail!(
                "Docs directory not found: {} (run `docgen site init` first)",
                self.docs_dir.display()
            );
        }

        let command_line = format!("{} {}", self.package_manager, args.join(" "));
        tracing::info!("Running `{}` in {}", command_line, self.docs_dir.display());

        let status = Command::new(&self.package_manager)
            .args(args)
            .current_dir(&self.docs_dir)
            .status()
            .with_context(|| format!("Failed to launch `{command_line}`"))?;

        if !status.success() {
            anyhow::bail!("`{}` exited with {}", command_line, status);
        }
        Ok(())
    }
}

fn is_non_empty_dir(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    let mut entries =
        std::fs::read_dir(path).with_context(|| format!("Failed reading {}", path.display()))?;
    Ok(entries.next().is_some())
}
