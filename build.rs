//! Build script for crosstune.
//!
//! Copies `.env.example` into the local data directory (next to where
//! `config::load_env` looks for `.env`) so users find a template after
//! installing. Every failure here is reported as a cargo warning; the build
//! itself never fails because of it.

use std::{env, fs, io, path::PathBuf};

fn copy_template(source: &PathBuf) -> io::Result<PathBuf> {
    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("crosstune");
    fs::create_dir_all(&out_dir)?;

    let target = out_dir.join(".env.example");
    fs::copy(source, &target)?;
    Ok(target)
}

fn main() {
    println!("cargo:rerun-if-changed=.env.example");

    let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") else {
        println!("cargo:warning=CARGO_MANIFEST_DIR not set, skipping .env.example");
        return;
    };
    let template = PathBuf::from(manifest_dir).join(".env.example");

    if !template.is_file() {
        println!(
            "cargo:warning=.env.example not found at {}",
            template.display()
        );
        return;
    }

    if let Err(e) = copy_template(&template) {
        println!("cargo:warning=cannot copy .env.example: {}", e);
    }
}
