//! Editorial content modules: testimonials, newsletter signup, about,
//! gallery and free text.

use askama::Template;
use serde::Deserialize;
use shopfront_core::StorefrontModule;

use super::{ModuleContext, TextAlignment, heading, paragraphs, render, settings};
use crate::filters;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Testimonial {
    quote: String,
    author: String,
    role: Option<String>,
    rating: Option<u8>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct TestimonialsSettings {
    heading: Option<String>,
    testimonials: Vec<Testimonial>,
}

#[derive(Template)]
#[template(path = "modules/testimonials.html")]
struct TestimonialsTemplate {
    heading: String,
    testimonials: Vec<Testimonial>,
}

pub(super) fn testimonials(
    module: &StorefrontModule,
    _ctx: &ModuleContext<'_>,
) -> askama::Result<Option<String>> {
    let s: TestimonialsSettings = settings(module);

    render(&TestimonialsTemplate {
        heading: heading(module, s.heading.as_deref(), "What our customers say"),
        testimonials: s
            .testimonials
            .into_iter()
            .filter(|t| !t.quote.trim().is_empty())
            .collect(),
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct NewsletterSettings {
    heading: Option<String>,
    description: Option<String>,
    button_text: Option<String>,
    placeholder: Option<String>,
}

#[derive(Template)]
#[template(path = "modules/newsletter.html")]
struct NewsletterTemplate {
    heading: String,
    description: Option<String>,
    button_text: String,
    placeholder: String,
    action: String,
}

/// Signup form posting to the storefront's newsletter endpoint.
pub(super) fn newsletter(
    module: &StorefrontModule,
    ctx: &ModuleContext<'_>,
) -> askama::Result<Option<String>> {
    let s: NewsletterSettings = settings(module);

    render(&NewsletterTemplate {
        heading: heading(module, s.heading.as_deref(), "Stay in the loop"),
        description: s.description,
        button_text: s.button_text.unwrap_or_else(|| "Subscribe".to_string()),
        placeholder: s
            .placeholder
            .unwrap_or_else(|| "you@example.com".to_string()),
        action: format!("{}/newsletter", ctx.base_path),
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ImagePosition {
    Left,
    #[default]
    Right,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct AboutSectionSettings {
    heading: Option<String>,
    body: Option<String>,
    image_url: Option<String>,
    image_position: ImagePosition,
}

#[derive(Template)]
#[template(path = "modules/about_section.html")]
struct AboutSectionTemplate {
    heading: String,
    paragraphs: Vec<String>,
    image_url: Option<String>,
    image_left: bool,
}

/// Store story; the body defaults to the store description.
pub(super) fn about_section(
    module: &StorefrontModule,
    ctx: &ModuleContext<'_>,
) -> askama::Result<Option<String>> {
    let s: AboutSectionSettings = settings(module);
    let body = s
        .body
        .or_else(|| ctx.store.description.clone())
        .unwrap_or_default();

    render(&AboutSectionTemplate {
        heading: heading(
            module,
            s.heading.as_deref(),
            &format!("About {}", ctx.store.name),
        ),
        paragraphs: paragraphs(&body),
        image_url: s.image_url.or_else(|| ctx.store.logo_url.clone()),
        image_left: matches!(s.image_position, ImagePosition::Left),
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct GalleryImage {
    url: String,
    alt: String,
    caption: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ImageGallerySettings {
    heading: Option<String>,
    images: Vec<GalleryImage>,
    columns: Option<u8>,
}

#[derive(Template)]
#[template(path = "modules/image_gallery.html")]
struct ImageGalleryTemplate {
    heading: String,
    images: Vec<GalleryImage>,
    columns: u8,
}

pub(super) fn image_gallery(
    module: &StorefrontModule,
    _ctx: &ModuleContext<'_>,
) -> askama::Result<Option<String>> {
    let s: ImageGallerySettings = settings(module);

    render(&ImageGalleryTemplate {
        heading: heading(module, s.heading.as_deref(), "Gallery"),
        images: s
            .images
            .into_iter()
            .filter(|i| !i.url.trim().is_empty())
            .collect(),
        columns: s.columns.unwrap_or(3).clamp(1, 6),
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct TextBlockSettings {
    heading: Option<String>,
    body: Option<String>,
    alignment: TextAlignment,
}

#[derive(Template)]
#[template(path = "modules/text_block.html")]
struct TextBlockTemplate {
    heading: Option<String>,
    paragraphs: Vec<String>,
    alignment_class: &'static str,
}

/// Free text. The heading is optional here.
pub(super) fn text_block(
    module: &StorefrontModule,
    _ctx: &ModuleContext<'_>,
) -> askama::Result<Option<String>> {
    let s: TextBlockSettings = settings(module);
    let title = heading(module, s.heading.as_deref(), "");

    render(&TextBlockTemplate {
        heading: (!title.is_empty()).then_some(title),
        paragraphs: paragraphs(s.body.as_deref().unwrap_or_default()),
        alignment_class: s.alignment.class(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::tests::{module, render_one};

    #[test]
    fn test_testimonials_render_quotes_and_stars() {
        let html = render_one(&module(
            "t",
            "testimonials",
            json!({
                "testimonials": [
                    { "quote": "Love it", "author": "Sam", "role": "Regular", "rating": 4 },
                    { "quote": "  ", "author": "Nobody" }
                ]
            }),
        ))
        .unwrap_or_default();
        assert!(html.contains("What our customers say"));
        assert!(html.contains("Love it"));
        assert!(html.contains("Sam"));
        assert!(html.contains("★★★★☆"));
        assert!(!html.contains("Nobody"));
    }

    #[test]
    fn test_newsletter_posts_to_store() {
        let html = render_one(&module("n", "newsletter", json!({ "buttonText": "Join" })))
            .unwrap_or_default();
        assert!(html.contains("hx-post=\"/s/acme/newsletter\""));
        assert!(html.contains("Join"));
        assert!(html.contains("type=\"email\""));
    }

    #[test]
    fn test_about_defaults_to_store_description() {
        let html = render_one(&module("a", "about-section", json!({}))).unwrap_or_default();
        assert!(html.contains("About Acme Goods"));
        assert!(html.contains("<p>Useful things</p>"));

        let html = render_one(&module(
            "a",
            "about-section",
            json!({ "body": "First.\n\nSecond.", "imageUrl": "https://cdn.test/a.jpg",
                    "imagePosition": "left" }),
        ))
        .unwrap_or_default();
        assert!(html.contains("<p>First.</p>"));
        assert!(html.contains("<p>Second.</p>"));
        assert!(html.contains("about-image-left"));
    }

    #[test]
    fn test_gallery_skips_images_without_url() {
        let html = render_one(&module(
            "g",
            "image-gallery",
            json!({
                "columns": 2,
                "images": [
                    { "url": "https://cdn.test/1.jpg", "alt": "One", "caption": "First" },
                    { "url": "", "alt": "Broken" }
                ]
            }),
        ))
        .unwrap_or_default();
        assert!(html.contains("grid-cols-2"));
        assert!(html.contains("https://cdn.test/1.jpg"));
        assert!(html.contains("First"));
        assert!(!html.contains("Broken"));
    }

    #[test]
    fn test_text_block_alignment_and_optional_heading() {
        let html = render_one(&module(
            "t",
            "text-block",
            json!({ "body": "Hello", "alignment": "right" }),
        ))
        .unwrap_or_default();
        assert!(html.contains("align-right"));
        assert!(html.contains("Hello"));
        assert!(!html.contains("<h2"));
    }
}
