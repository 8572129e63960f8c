// ABOUTME: Access token discovery with precedence chain
// ABOUTME: CLI flag → VERCEL_ACCESS_TOKEN env var; blank values count as missing

use crate::{Error, Result};
use std::env;

pub const TOKEN_ENV_VAR: &str = "VERCEL_ACCESS_TOKEN";

pub fn resolve_token(cli_token: Option<String>) -> Result<String> {
    resolve_token_from(cli_token, env::var(TOKEN_ENV_VAR).ok())
}

fn resolve_token_from(cli_token: Option<String>, env_token: Option<String>) -> Result<String> {
    cli_token
        .into_iter()
        .chain(env_token)
        .map(|t| t.trim().to_string())
        .find(|t| !t.is_empty())
        .ok_or_else(|| {
            Error::Config(format!(
                "No access token found. Set {} or pass --token",
                TOKEN_ENV_VAR
            ))
        })
}
