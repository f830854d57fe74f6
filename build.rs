//! Build script for the Spotify remote display.
//!
//! Copies the `.env.example` configuration template into the user's local data
//! directory (`<data_local_dir>/spotremote/`), next to where `config::load_env`
//! looks for the real `.env`. A missing template only produces a warning.

use std::{env, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Re-run if the template changes
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("spotremote");

    if !env_example_path.is_file() {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
        return Ok(());
    }

    // Read-only home directories (CI, sandboxes) must not fail the build.
    if let Err(e) = fs::create_dir_all(&out_dir)
        .and_then(|_| fs::copy(&env_example_path, out_dir.join(".env.example")).map(|_| ()))
    {
        println!("cargo:warning=could not install .env.example: {e}");
    }

    Ok(())
}
