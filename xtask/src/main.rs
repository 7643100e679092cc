//! `cargo run -p xtask -- <cargo args>` runs cargo with the probe library on
//! the link and loader paths.
use anyhow::{Result, bail};
use std::{env, process::Command};

const DEFAULT_LIB_DIR: &str = "/opt/kindling/lib";

fn main() -> Result<()> {
    let lib_dir = env::var("KINDLING_LIB_DIR").unwrap_or_else(|_| DEFAULT_LIB_DIR.to_string());
    let ld_path = match env::var("LD_LIBRARY_PATH") {
        Ok(existing) if !existing.is_empty() => format!("{lib_dir}:{existing}"),
        _ => lib_dir.clone(),
    };
    let envs = [("KINDLING_LIB_DIR", lib_dir), ("LD_LIBRARY_PATH", ld_path)];
    let args: Vec<_> = env::args_os().collect();
    let status = Command::new("cargo").args(&args[1..]).envs(envs).status()?;
    if !status.success() {
        bail!("xtask failed.");
    }
    Ok(())
}
