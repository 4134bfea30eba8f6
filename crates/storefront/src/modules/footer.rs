//! Footer modules: contact form, social links and store details.

use askama::Template;
use serde::Deserialize;
use shopfront_core::StorefrontModule;
use url::Url;

use super::{ModuleContext, heading, render, settings};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ContactFormSettings {
    heading: Option<String>,
    description: Option<String>,
    show_phone: bool,
    submit_text: Option<String>,
}

#[derive(Template)]
#[template(path = "modules/contact_form.html")]
struct ContactFormTemplate {
    heading: String,
    description: Option<String>,
    show_phone: bool,
    submit_text: String,
    action: String,
}

pub(super) fn contact_form(
    module: &StorefrontModule,
    ctx: &ModuleContext<'_>,
) -> askama::Result<Option<String>> {
    let s: ContactFormSettings = settings(module);

    render(&ContactFormTemplate {
        heading: heading(module, s.heading.as_deref(), "Get in touch"),
        description: s.description,
        show_phone: s.show_phone,
        submit_text: s.submit_text.unwrap_or_else(|| "Send message".to_string()),
        action: format!("{}/contact", ctx.base_path),
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SocialLink {
    platform: String,
    url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SocialLinksSettings {
    heading: Option<String>,
    links: Vec<SocialLink>,
}

struct SocialLinkView {
    label: String,
    url: String,
}

#[derive(Template)]
#[template(path = "modules/social_links.html")]
struct SocialLinksTemplate {
    heading: String,
    links: Vec<SocialLinkView>,
}

/// Only absolute `http(s)` links are kept.
fn is_web_link(url: &str) -> bool {
    Url::parse(url).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}

/// Display name of a platform key, e.g. `instagram` becomes `Instagram`.
fn platform_label(platform: &str) -> String {
    let platform = platform.trim();
    let mut chars = platform.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

pub(super) fn social_links(
    module: &StorefrontModule,
    _ctx: &ModuleContext<'_>,
) -> askama::Result<Option<String>> {
    let s: SocialLinksSettings = settings(module);

    let links = s
        .links
        .into_iter()
        .filter(|link| {
            let ok = is_web_link(&link.url);
            if !ok {
                tracing::debug!(module_id = %module.id, url = %link.url, "Dropping social link");
            }
            ok
        })
        .map(|link| SocialLinkView {
            label: if link.platform.trim().is_empty() {
                link.url.clone()
            } else {
                platform_label(&link.platform)
            },
            url: link.url,
        })
        .collect();

    render(&SocialLinksTemplate {
        heading: heading(module, s.heading.as_deref(), "Follow us"),
        links,
    })
}

#[derive(Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct StoreInfoSettings {
    heading: Option<String>,
    show_address: bool,
    show_phone: bool,
    show_email: bool,
    hours: Option<String>,
}

impl Default for StoreInfoSettings {
    fn default() -> Self {
        Self {
            heading: None,
            show_address: true,
            show_phone: true,
            show_email: true,
            hours: None,
        }
    }
}

#[derive(Template)]
#[template(path = "modules/store_info.html")]
struct StoreInfoTemplate {
    heading: String,
    description: Option<String>,
    address: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    hours: Option<String>,
}

/// Store contact details, each line individually switchable.
pub(super) fn store_info(
    module: &StorefrontModule,
    ctx: &ModuleContext<'_>,
) -> askama::Result<Option<String>> {
    let s: StoreInfoSettings = settings(module);
    let store = ctx.store;

    render(&StoreInfoTemplate {
        heading: heading(module, s.heading.as_deref(), &store.name),
        description: store.description.clone(),
        address: store.address.clone().filter(|_| s.show_address),
        phone: store.phone.clone().filter(|_| s.show_phone),
        email: store.contact_email.clone().filter(|_| s.show_email),
        hours: s.hours.filter(|h| !h.trim().is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::tests::{module, render_one};
    use super::*;

    #[test]
    fn test_contact_form_posts_to_store() {
        let html = render_one(&module("c", "contact-form", json!({}))).unwrap_or_default();
        assert!(html.contains("hx-post=\"/s/acme/contact\""));
        assert!(html.contains("Send message"));
        assert!(!html.contains("name=\"phone\""));

        let html = render_one(&module("c", "contact-form", json!({ "showPhone": true })))
            .unwrap_or_default();
        assert!(html.contains("name=\"phone\""));
    }

    #[test]
    fn test_social_links_keep_web_urls_only() {
        let html = render_one(&module(
            "s",
            "social-links",
            json!({
                "links": [
                    { "platform": "instagram", "url": "https://instagram.com/acme" },
                    { "platform": "evil", "url": "javascript:alert(1)" },
                    { "platform": "", "url": "https://acme.test/blog" }
                ]
            }),
        ))
        .unwrap_or_default();
        assert!(html.contains("Instagram"));
        assert!(html.contains("https://instagram.com/acme"));
        assert!(html.contains("https://acme.test/blog"));
        assert!(!html.contains("javascript:"));
        assert!(!html.contains("Evil"));
    }

    #[test]
    fn test_store_info_toggles() {
        let html = render_one(&module("i", "store-info", json!({}))).unwrap_or_default();
        assert!(html.contains("1 Main St"));
        assert!(html.contains("+1 555 0100"));
        assert!(html.contains("hello@acme.test"));

        let html = render_one(&module(
            "i",
            "store-info",
            json!({ "showAddress": false, "showEmail": false, "hours": "Mon-Fri 9-5" }),
        ))
        .unwrap_or_default();
        assert!(!html.contains("1 Main St"));
        assert!(!html.contains("hello@acme.test"));
        assert!(html.contains("+1 555 0100"));
        assert!(html.contains("Mon-Fri 9-5"));
    }

    #[test]
    fn test_platform_label() {
        assert_eq!(platform_label("tiktok"), "Tiktok");
        assert_eq!(platform_label(" x "), "X");
        assert_eq!(platform_label(""), "");
    }

    #[test]
    fn test_is_web_link() {
        assert!(is_web_link("https://example.com"));
        assert!(is_web_link("http://example.com/a"));
        assert!(!is_web_link("mailto:a@b.c"));
        assert!(!is_web_link("/relative"));
    }
}
