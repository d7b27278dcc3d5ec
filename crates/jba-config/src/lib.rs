//! jba-config
//!
//! Startup configuration: the indexer endpoint.
//!
//! # Contract
//! - A local env file (default `.env`) MUST exist; see `.example.env`.
//! - `SUBGRAPH_ENDPOINT` is read from the process environment first, then
//!   from the env file. The process environment is never mutated.
//! - Hosted indexer URLs embed API keys, so `Debug` redacts the endpoint and
//!   error messages name the variable only.
//!
//! Reconciliation constants are not configured here; they live in
//! `jba_reconcile::ReconcileConfig`.

use anyhow::{bail, Context, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Env var holding the indexer GraphQL endpoint.
pub const ENV_SUBGRAPH_ENDPOINT: &str = "SUBGRAPH_ENDPOINT";

/// Env file looked up in the working directory when none is given.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Template shipped with the repository.
pub const EXAMPLE_ENV_FILE: &str = ".example.env";

/// Resolved startup configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct AuditEnv {
    pub endpoint: String,
}

impl std::fmt::Debug for AuditEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditEnv")
            .field("endpoint", &"<REDACTED>")
            .finish()
    }
}

impl AuditEnv {
    /// Load from `env_file`, letting the real process environment win.
    pub fn load(env_file: &Path) -> Result<Self> {
        Self::load_with(env_file, |name| std::env::var(name).ok())
    }

    /// Load from `env_file`, consulting `process_env` before the file.
    pub fn load_with<F>(env_file: &Path, process_env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file_vars = read_env_file(env_file)?;
        Self::from_lookup(|name| {
            non_blank(process_env(name)).or_else(|| non_blank(file_vars.get(name).cloned()))
        })
    }

    /// Resolve from an arbitrary lookup (no env file involved).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(endpoint) = non_blank(lookup(ENV_SUBGRAPH_ENDPOINT)) else {
            bail!(
                "CONFIG_ENDPOINT_MISSING: could not find {} in environment. See {}.",
                ENV_SUBGRAPH_ENDPOINT,
                EXAMPLE_ENV_FILE
            );
        };
        Ok(Self {
            endpoint: endpoint.trim().to_string(),
        })
    }
}

fn read_env_file(path: &Path) -> Result<BTreeMap<String, String>> {
    if !path.is_file() {
        bail!(
            "CONFIG_ENV_FILE_MISSING: could not find {}. See {}.",
            path.display(),
            EXAMPLE_ENV_FILE
        );
    }

    let iter = dotenvy::from_path_iter(path)
        .with_context(|| format!("open env file failed: {}", path.display()))?;

    let mut vars = BTreeMap::new();
    for item in iter {
        let (k, v) = item.with_context(|| format!("parse env file failed: {}", path.display()))?;
        vars.insert(k, v);
    }
    Ok(vars)
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}
