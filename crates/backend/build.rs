use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// target/<profile>, found by walking up from OUT_DIR
/// (target/<profile>/build/backend-xxx/out).
fn profile_dir() -> Option<PathBuf> {
    let out_dir = env::var("OUT_DIR").ok()?;
    let profile = env::var("PROFILE").ok()?;
    Path::new(&out_dir)
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .map(Path::to_path_buf)
}

fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    // the server reads config.toml from its own directory first
    let source = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config.toml");
    let Some(target_dir) = profile_dir() else {
        println!("cargo:warning=target directory not found, config.toml not copied");
        return;
    };

    if source.exists() {
        let dest = target_dir.join("config.toml");
        if let Err(e) = fs::copy(&source, &dest) {
            panic!("Failed to copy config.toml: {}", e);
        }
    } else {
        println!("cargo:warning=config.toml not found, built-in defaults apply");
    }
}
