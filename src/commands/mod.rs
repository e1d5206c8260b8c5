//! Replay command implementations.
//!
//! CHANGELOG:
//! - 10/17/2026 - Initial module structure

pub mod replay;

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

use crate::config::InjectConfig;
use crate::constants::TypeConstants;

/// Read input from a file, or stdin when the path is absent or "-".
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("Failed to read input file: {:?}", p)),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

/// Load the constants table, defaulting to the stock codes.
pub fn load_constants(path: Option<&Path>) -> Result<TypeConstants> {
    let Some(path) = path else {
        return Ok(TypeConstants::default());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read constants file: {:?}", path))?;
    TypeConstants::from_json(&content)
        .with_context(|| format!("Failed to parse constants file: {:?}", path))
}

/// Load the config from an explicit path or the default location.
pub fn load_config(path: Option<&Path>) -> Result<InjectConfig> {
    let config = match path {
        Some(p) => InjectConfig::load(p)?,
        None => InjectConfig::load_default()?,
    };
    Ok(config)
}
