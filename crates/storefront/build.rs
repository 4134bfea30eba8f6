//! Build script for the storefront crate.
//!
//! Fingerprints `static/css/main.css` so templates can reference it with a
//! cache-busting query string.

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

fn main() {
    fingerprint_css();
}

/// Set `CSS_HASH` to the first 8 hex chars of the SHA-256 of main.css.
fn fingerprint_css() {
    let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") else {
        println!("cargo:rustc-env=CSS_HASH=dev");
        return;
    };
    let css_path = Path::new(&manifest_dir).join("static/css/main.css");
    println!("cargo:rerun-if-changed={}", css_path.display());

    let hash = match fs::read(&css_path) {
        Ok(content) => {
            let digest = format!("{:x}", Sha256::digest(&content));
            digest.chars().take(8).collect::<String>()
        }
        Err(e) => {
            println!("cargo:warning=Could not read main.css: {e}");
            "dev".to_string()
        }
    };

    println!("cargo:rustc-env=CSS_HASH={hash}");
}
