//! Site command implementation

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::Config;
use crate::site::DocsSite;

#[derive(Subcommand)]
pub enum SiteCommand {
    /// Scaffold the docs site from the template repository
    Init(InitArgs),

    /// Install the docs site's dependencies
    Install,

    /// Build the static docs site
    Build,

    /// Serve a preview of the built docs site
    Preview,
}

#[derive(Args)]
pub struct InitArgs {
    /// Template repository URL (overrides site.template_repo)
    #[arg(long, value_name = "URL")]
    pub template: Option<String>,

    /// Git ref (branch/tag/SHA) of the template
    #[arg(long = "ref", value_name = "REF")]
    pub template_ref: Option<String>,
}

pub fn run(command: SiteCommand, config: &Config) -> Result<()> {
    let site = DocsSite::new(&config.site);
    match command {
        SiteCommand::Init(args) => {
            let Some(template) = args.template.or_else(|| config.site.template_repo.clone()) else {
                anyhow::bail!(
                    "No template repository configured; pass --template or set site.template_repo"
                );
            };
            let template_ref = args.template_ref.or_else(|| config.site.template_ref.clone());
            site.init(&template, template_ref.as_deref(), &config.reference_dir)?;
            println!("Docs site ready in {}", site.docs_dir().display());
            Ok(())
        }
        SiteCommand::Install => site.install(),
        SiteCommand::Build => site.build(),
        SiteCommand::Preview => site.preview(),
    }
}
