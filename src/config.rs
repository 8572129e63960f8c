// ABOUTME: Export configuration built once at startup
// ABOUTME: Holds credential, deployment target, output path, and API scoping

use crate::{api::DEFAULT_API_BASE, Error, Result};
use std::path::PathBuf;

pub const DEFAULT_DEPLOYMENT: &str =
    "tenacious-stats-dashboard-33ezfj9nh-admin-jetseteditas-projects.vercel.app";
pub const DEFAULT_OUTPUT_DIR: &str = "./vercel-deployment-download";
pub const DEFAULT_TEAM_SLUG: &str = "admin-jetseteditas-projects";

#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub token: String,
    /// Deployment id (`dpl_...`) or hostname.
    pub deployment: String,
    pub output_dir: PathBuf,
    pub api_base: String,
    pub team_slug: Option<String>,
}

impl ExportConfig {
    pub fn new(token: String) -> Self {
        ExportConfig {
            token,
            deployment: DEFAULT_DEPLOYMENT.into(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            api_base: DEFAULT_API_BASE.into(),
            team_slug: Some(DEFAULT_TEAM_SLUG.into()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(Error::Config(
                "No access token. Set VERCEL_ACCESS_TOKEN or pass --token".into(),
            ));
        }
        if self.deployment.trim().is_empty() {
            return Err(Error::Config("Deployment id or URL is empty".into()));
        }
        Ok(())
    }
}
