//! Storefront module configuration checks.
//!
//! Accepts either a full storefront payload (as served by the backend) or a
//! bare JSON array of modules, and reports how the page would be laid out.

use std::fmt::Write;
use std::path::Path;

use serde::Deserialize;
use shopfront_core::{ModuleLayout, PublicStorefront, StorefrontModule};

use super::CliError;

#[derive(Deserialize)]
#[serde(untagged)]
enum Config {
    Storefront(Box<PublicStorefront>),
    Modules(Vec<StorefrontModule>),
}

/// Read and check a configuration file.
pub fn check_file(path: &Path) -> Result<String, CliError> {
    let json = std::fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), bytes = json.len(), "Checking module config");
    check(&json)
}

/// Check a configuration document.
///
/// Unknown module types and hidden modules are reported but are not errors;
/// only a document that fails to parse is.
pub fn check(json: &str) -> Result<String, CliError> {
    let config: Config = serde_json::from_str(json)?;

    let mut out = String::new();
    let modules = match &config {
        Config::Storefront(storefront) => {
            let theme = storefront.theme();
            let source = if storefront.customization.custom_theme.is_some() {
                "custom"
            } else if theme.id == storefront.customization.theme_id {
                "registry"
            } else {
                "fallback"
            };
            let _ = writeln!(out, "Store: {} ({})", storefront.store.name, storefront.store.slug);
            let _ = writeln!(out, "Theme: {} [{source}]", theme.id);
            let _ = writeln!(out, "Products: {}", storefront.products.len());
            storefront.customization.modules.as_slice()
        }
        Config::Modules(modules) => modules.as_slice(),
    };

    let layout = ModuleLayout::plan(modules);
    let _ = writeln!(out, "Modules: {}", modules.len());

    let _ = writeln!(out, "Main:");
    for module in &layout.main {
        write_module(&mut out, module);
    }
    let _ = writeln!(out, "Footer:");
    for module in &layout.footer {
        write_module(&mut out, module);
    }

    let hidden: Vec<&StorefrontModule> = modules.iter().filter(|m| !m.is_visible).collect();
    if !hidden.is_empty() {
        let _ = writeln!(out, "Hidden:");
        for module in hidden {
            write_module(&mut out, module);
        }
    }

    let unknown: Vec<&StorefrontModule> = modules.iter().filter(|m| m.kind().is_none()).collect();
    for module in &unknown {
        tracing::warn!(id = %module.id, module_type = %module.module_type, "Unknown module type");
    }
    if !unknown.is_empty() {
        let _ = writeln!(out, "Warnings:");
        for module in unknown {
            let _ = writeln!(
                out,
                "  unknown module type {:?} ({}) will not render",
                module.module_type, module.id
            );
        }
    }

    Ok(out)
}

fn write_module(out: &mut String, module: &StorefrontModule) {
    let title = module.title.as_deref().unwrap_or("-");
    let _ = writeln!(
        out,
        "  {:>3}  {:<18} {:<12} {title}",
        module.sort_key(),
        module.module_type,
        module.id.as_str()
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_check_module_list_splits_footer() {
        let json = r#"[
            {"id": "a", "type": "hero-banner", "order": 2},
            {"id": "b", "type": "contact-form", "order": 1},
            {"id": "c", "type": "text-block", "isVisible": false}
        ]"#;
        let out = check(json).unwrap();

        let main = out.split("Footer:").next().unwrap();
        assert!(main.contains("hero-banner"));
        assert!(!main.contains("contact-form"));
        assert!(out.contains("Hidden:"));
        assert!(!out.contains("Warnings:"));
    }

    #[test]
    fn test_check_reports_unknown_types() {
        let out = check(r#"[{"id": "x", "type": "unknown-x"}]"#).unwrap();
        assert!(out.contains("unknown module type \"unknown-x\""));
    }

    #[test]
    fn test_check_storefront_reports_theme_fallback() {
        let json = r#"{
            "store": {"id": "s1", "slug": "acme", "name": "Acme"},
            "customization": {"themeId": "retired-theme", "modules": []}
        }"#;
        let out = check(json).unwrap();
        assert!(out.contains("Store: Acme (acme)"));
        assert!(out.contains("Theme: modern-minimal [fallback]"));
    }

    #[test]
    fn test_check_rejects_malformed_json() {
        assert!(matches!(check("{\"modules\": "), Err(CliError::Parse(_))));
        assert!(matches!(check("42"), Err(CliError::Parse(_))));
    }
}
