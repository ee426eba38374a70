use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub fn finlog_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".finlog"))
}

pub fn ensure_finlog_home() -> Result<PathBuf> {
    let dir = finlog_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Ledger file used when neither the config nor `--file` names one
pub fn default_data_file() -> Result<PathBuf> {
    Ok(finlog_home()?.join("transactions.csv"))
}
