// ABOUTME: Command-line interface definitions using clap
// ABOUTME: Two optional positionals plus credential and API scoping flags

use crate::{
    api::DEFAULT_API_BASE,
    config::{ExportConfig, DEFAULT_DEPLOYMENT, DEFAULT_OUTPUT_DIR, DEFAULT_TEAM_SLUG},
};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "deploy-export")]
#[command(about = "Download the source tree of a hosted deployment", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Deployment id or URL
    #[arg(default_value = DEFAULT_DEPLOYMENT)]
    pub deployment: String,

    /// Output directory
    #[arg(default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Access token (overrides VERCEL_ACCESS_TOKEN)
    #[arg(long)]
    pub token: Option<String>,

    /// API base URL
    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Team slug sent with every request
    #[arg(long, default_value = DEFAULT_TEAM_SLUG, conflicts_with = "no_team_slug")]
    pub team_slug: String,

    /// Do not scope requests to a team
    #[arg(long)]
    pub no_team_slug: bool,
}

impl Cli {
    pub fn into_config(self, token: String) -> ExportConfig {
        ExportConfig {
            token,
            deployment: self.deployment,
            output_dir: self.output_dir,
            api_base: self.api_base,
            team_slug: if self.no_team_slug {
                None
            } else {
                Some(self.team_slug)
            },
        }
    }
}
