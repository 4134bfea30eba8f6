//! Hero banner and announcement bar modules.

use askama::Template;
use serde::Deserialize;
use shopfront_core::StorefrontModule;

use super::{ModuleContext, TextAlignment, heading, render, settings};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct HeroBannerSettings {
    title: Option<String>,
    subtitle: Option<String>,
    cta_text: Option<String>,
    cta_link: Option<String>,
    background_image: Option<String>,
    text_alignment: TextAlignment,
    overlay_opacity: Option<f64>,
}

#[derive(Template)]
#[template(path = "modules/hero_banner.html")]
struct HeroBannerTemplate {
    title: String,
    subtitle: Option<String>,
    cta_text: String,
    cta_link: String,
    background_image: Option<String>,
    alignment_class: &'static str,
    /// Overlay opacity in tenths, 0..=10.
    overlay: u8,
}

/// Overlay opacity in tenths, clamped to `0..=10`.
fn overlay_step(opacity: Option<f64>) -> u8 {
    let opacity = opacity.filter(|o| o.is_finite()).unwrap_or(0.4);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let step = (opacity.clamp(0.0, 1.0) * 10.0).round() as u8;
    step
}

pub(super) fn hero_banner(
    module: &StorefrontModule,
    ctx: &ModuleContext<'_>,
) -> askama::Result<Option<String>> {
    let s: HeroBannerSettings = settings(module);

    render(&HeroBannerTemplate {
        title: heading(module, s.title.as_deref(), &ctx.store.name),
        subtitle: s.subtitle.or_else(|| ctx.store.description.clone()),
        cta_text: s.cta_text.unwrap_or_else(|| "Shop now".to_string()),
        cta_link: s.cta_link.unwrap_or_else(|| ctx.products_href()),
        background_image: s.background_image.or_else(|| ctx.store.banner_url.clone()),
        alignment_class: s.text_alignment.class(),
        overlay: overlay_step(s.overlay_opacity),
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct AnnouncementBarSettings {
    message: Option<String>,
    link: Option<String>,
    link_text: Option<String>,
}

#[derive(Template)]
#[template(path = "modules/announcement_bar.html")]
struct AnnouncementBarTemplate {
    message: String,
    link: Option<String>,
    link_text: String,
}

/// Renders nothing when there is no message.
pub(super) fn announcement_bar(
    module: &StorefrontModule,
    _ctx: &ModuleContext<'_>,
) -> askama::Result<Option<String>> {
    let s: AnnouncementBarSettings = settings(module);

    let Some(message) = s
        .message
        .or_else(|| module.title.clone())
        .filter(|m| !m.trim().is_empty())
    else {
        return Ok(None);
    };

    render(&AnnouncementBarTemplate {
        message,
        link: s.link,
        link_text: s.link_text.unwrap_or_else(|| "Learn more".to_string()),
    })
}
