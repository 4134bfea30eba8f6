//! Theme editor handlers.
//!
//! The store owner's working copy lives in the session as a
//! [`ThemeEditor`] draft until it is saved to the backend. The editor page
//! previews the store's modules inside `.theme-preview`, styled by a
//! stylesheet generated from the draft; every field change swaps that
//! stylesheet's URL so the browser refetches it.
//!
//! Access control for these routes belongs to the backend, which rejects
//! theme saves the caller's token isn't allowed to make.

use std::sync::Arc;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use shopfront_core::{
    PublicStorefront, ThemeEditor,
    theme::{editor::ChangeListener, generate_scoped_theme_css, registry},
};
use tower_sessions::Session;
use tracing::instrument;

use super::is_htmx;
use super::themes::css_response;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::models::ThemeDraftSession;
use crate::modules::{ModuleContext, RenderedLayout, render_layout};
use crate::sample::sample_storefront;
use crate::state::AppState;
use crate::views::{FilterOption, StoreView};

/// Selector the draft stylesheet is scoped to.
const PREVIEW_SCOPE: &str = ".theme-preview";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Color,
    Text,
}

/// Editable fields, grouped as shown in the editor.
const EDITOR_FIELDS: &[(&str, &[(&str, &str, FieldKind)])] = &[
    (
        "Colors",
        &[
            ("colors.primary", "Primary", FieldKind::Color),
            ("colors.secondary", "Secondary", FieldKind::Color),
            ("colors.accent", "Accent", FieldKind::Color),
            ("colors.background", "Background", FieldKind::Color),
            ("colors.surface", "Surface", FieldKind::Color),
            ("colors.border", "Border", FieldKind::Color),
            ("text.primary", "Text", FieldKind::Color),
            ("text.secondary", "Secondary text", FieldKind::Color),
            ("text.muted", "Muted text", FieldKind::Color),
        ],
    ),
    (
        "Typography",
        &[
            ("typography.fontFamily.primary", "Body font", FieldKind::Text),
            ("typography.fontFamily.heading", "Heading font", FieldKind::Text),
            ("typography.fontSize.base", "Base size", FieldKind::Text),
            ("typography.fontWeight.bold", "Bold weight", FieldKind::Text),
            ("typography.lineHeight.normal", "Line height", FieldKind::Text),
        ],
    ),
    (
        "Layout",
        &[
            ("layout.maxWidth", "Max width", FieldKind::Text),
            ("layout.containerPadding", "Container padding", FieldKind::Text),
            ("layout.borderRadius.md", "Corner radius", FieldKind::Text),
            ("spacing.md", "Spacing", FieldKind::Text),
        ],
    ),
    (
        "Effects",
        &[
            ("effects.boxShadow.md", "Shadow", FieldKind::Text),
            ("effects.transition.normal", "Transition", FieldKind::Text),
        ],
    ),
];

/// One editor input.
#[derive(Debug, Clone)]
pub struct FieldView {
    pub path: &'static str,
    pub label: &'static str,
    pub value: String,
    pub input_type: &'static str,
    pub input_id: String,
}

/// A titled group of editor inputs.
#[derive(Debug, Clone)]
pub struct FieldGroup {
    pub label: &'static str,
    pub fields: Vec<FieldView>,
}

/// `#rrggbb`, the only format `<input type="color">` accepts.
fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value.chars().skip(1).all(|c| c.is_ascii_hexdigit())
}

fn field_groups(editor: &ThemeEditor) -> Vec<FieldGroup> {
    EDITOR_FIELDS
        .iter()
        .map(|&(label, fields)| FieldGroup {
            label,
            fields: fields
                .iter()
                .map(|&(path, label, kind)| {
                    let value = editor.field(path).unwrap_or_default();
                    FieldView {
                        path,
                        label,
                        input_type: if kind == FieldKind::Color && is_hex_color(&value) {
                            "color"
                        } else {
                            "text"
                        },
                        input_id: format!("field-{}", path.replace('.', "-")),
                        value,
                    }
                })
                .collect(),
        })
        .collect()
}

/// Theme editor page template.
#[derive(Template, WebTemplate)]
#[template(path = "manage/theme.html")]
pub struct ThemeEditorTemplate {
    pub store: StoreView,
    /// Base URL of the editor routes.
    pub action: String,
    pub theme_name: String,
    pub themes: Vec<FilterOption>,
    pub groups: Vec<FieldGroup>,
    pub custom_properties: Vec<(String, String)>,
    pub dirty: bool,
    pub draft_css: String,
    pub layout: RenderedLayout,
}

/// Editor status fragment (HTMX). Carries an out-of-band replacement of the
/// draft stylesheet link when the draft changed.
#[derive(Template, WebTemplate)]
#[template(path = "partials/editor_status.html")]
pub struct EditorStatusTemplate {
    pub dirty: bool,
    pub message: Option<String>,
    pub is_error: bool,
    pub draft_css: Option<String>,
}

impl EditorStatusTemplate {
    fn error(dirty: bool, message: impl Into<String>) -> Self {
        Self {
            dirty,
            message: Some(message.into()),
            is_error: true,
            draft_css: None,
        }
    }
}

/// Field update form data.
#[derive(Debug, Deserialize)]
pub struct FieldForm {
    pub path: String,
    #[serde(default)]
    pub value: String,
    /// Name of a custom property, when adding one.
    #[serde(default)]
    pub property: Option<String>,
}

impl FieldForm {
    /// The editor path to set.
    fn field_path(&self) -> String {
        match self.property.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() && self.path == "customProperties" => {
                format!("customProperties.{name}")
            }
            _ => self.path.clone(),
        }
    }
}

/// Theme selection form data.
#[derive(Debug, Deserialize)]
pub struct SelectThemeForm {
    pub theme_id: String,
}

fn editor_path(slug: &str) -> String {
    format!("/manage/{}/theme", urlencoding::encode(slug))
}

/// Draft stylesheet URL; the revision defeats caching.
fn draft_css_href(slug: &str) -> String {
    format!(
        "{}/draft.css?rev={}",
        editor_path(slug),
        uuid::Uuid::new_v4().simple()
    )
}

fn draft_listener(slug: &str) -> ChangeListener {
    let slug = slug.to_string();
    Box::new(move |theme| {
        tracing::debug!(storefront = %slug, theme = %theme.id, "Theme draft changed");
    })
}

/// Load the storefront and the owner's draft, starting a new draft from the
/// storefront's current theme when there is none.
async fn load_editor(
    state: &AppState,
    drafts: &ThemeDraftSession<'_>,
    slug: &str,
) -> Result<(Arc<PublicStorefront>, ThemeEditor)> {
    let storefront = state.backend().storefront(slug).await?;

    let mut editor = match drafts.load().await {
        Ok(Some(editor)) => editor,
        Ok(None) => ThemeEditor::new(storefront.theme().clone()),
        Err(e) => {
            tracing::warn!(storefront = %slug, error = %e, "Discarding unreadable theme draft");
            ThemeEditor::new(storefront.theme().clone())
        }
    };
    editor.set_listener(draft_listener(slug));

    Ok((storefront, editor))
}

/// Send the browser back to the editor page.
fn back_to_editor(headers: &HeaderMap, slug: &str) -> Response {
    let location = editor_path(slug);
    if is_htmx(headers) {
        AppendHeaders([("HX-Redirect", location)]).into_response()
    } else {
        Redirect::to(&location).into_response()
    }
}

/// Display the theme editor.
#[instrument(skip(state, session))]
pub async fn editor(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    session: Session,
) -> Result<ThemeEditorTemplate> {
    let drafts = ThemeDraftSession::new(&session, &slug);
    let (storefront, editor) = load_editor(&state, &drafts, &slug).await?;
    let working = editor.working();

    // A store without modules previews the demo layout
    let sample;
    let modules = if storefront.customization.modules.is_empty() {
        sample = sample_storefront(&working.id);
        &sample.customization.modules
    } else {
        &storefront.customization.modules
    };
    let layout = render_layout(modules, &ModuleContext::new(&storefront))?;

    let themes = registry::all()
        .iter()
        .map(|theme| FilterOption {
            value: theme.id.clone(),
            label: theme.name.clone(),
            selected: theme.id == working.id,
        })
        .collect();

    Ok(ThemeEditorTemplate {
        store: StoreView::from(&storefront.store),
        action: editor_path(&slug),
        theme_name: working.name.clone(),
        themes,
        groups: field_groups(&editor),
        custom_properties: working
            .custom_properties
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
        dirty: editor.is_dirty(),
        draft_css: draft_css_href(&slug),
        layout,
    })
}

/// Serve the draft theme scoped to the editor preview.
#[instrument(skip(state, session))]
pub async fn draft_stylesheet(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    session: Session,
) -> Result<Response> {
    let drafts = ThemeDraftSession::new(&session, &slug);
    let (_, editor) = load_editor(&state, &drafts, &slug).await?;
    Ok(css_response(
        generate_scoped_theme_css(editor.working(), PREVIEW_SCOPE),
        "no-store",
    ))
}

/// Set one field of the draft.
#[instrument(skip(state, session, headers))]
pub async fn set_field(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<FieldForm>,
) -> Result<Response> {
    let drafts = ThemeDraftSession::new(&session, &slug);
    let (_, mut editor) = load_editor(&state, &drafts, &slug).await?;

    if let Err(e) = editor.set_field(&form.field_path(), &form.value) {
        tracing::debug!(error = %e, "Rejected theme field");
        if !is_htmx(&headers) {
            return Err(AppError::BadRequest(e.to_string()));
        }
        return Ok(EditorStatusTemplate::error(editor.is_dirty(), e.to_string()).into_response());
    }
    drafts.store(&editor).await?;

    if !is_htmx(&headers) {
        return Ok(Redirect::to(&editor_path(&slug)).into_response());
    }

    Ok(EditorStatusTemplate {
        dirty: editor.is_dirty(),
        message: None,
        is_error: false,
        draft_css: Some(draft_css_href(&slug)),
    }
    .into_response())
}

/// Switch the draft to another registry theme.
#[instrument(skip(state, session, headers))]
pub async fn select_theme(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<SelectThemeForm>,
) -> Result<Response> {
    let theme = registry::get(&form.theme_id)
        .ok_or_else(|| AppError::BadRequest("Unknown theme.".to_string()))?;

    let drafts = ThemeDraftSession::new(&session, &slug);
    let (_, mut editor) = load_editor(&state, &drafts, &slug).await?;
    editor.apply_theme(theme.clone());
    drafts.store(&editor).await?;

    Ok(back_to_editor(&headers, &slug))
}

/// Discard the draft's unsaved changes.
#[instrument(skip(state, session, headers))]
pub async fn reset(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    session: Session,
    headers: HeaderMap,
) -> Result<Response> {
    let drafts = ThemeDraftSession::new(&session, &slug);
    let (_, mut editor) = load_editor(&state, &drafts, &slug).await?;
    editor.reset();
    drafts.store(&editor).await?;

    Ok(back_to_editor(&headers, &slug))
}

/// Save the draft to the backend.
#[instrument(skip(state, session, headers))]
pub async fn save(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    session: Session,
    headers: HeaderMap,
) -> Result<Response> {
    let drafts = ThemeDraftSession::new(&session, &slug);
    let (_, mut editor) = load_editor(&state, &drafts, &slug).await?;

    if let Err(e) = state.backend().save_theme(&slug, editor.working()).await {
        if !is_htmx(&headers) {
            return Err(e.into());
        }
        tracing::error!(storefront = %slug, error = %e, "Failed to save theme");
        return Ok(EditorStatusTemplate::error(
            editor.is_dirty(),
            "Saving failed. Your changes are kept; please try again.",
        )
        .into_response());
    }

    editor.mark_saved();
    drafts.store(&editor).await?;
    add_breadcrumb(
        "theme",
        "Saved storefront theme",
        &[("storefront", slug.as_str()), ("theme", editor.working().id.as_str())],
    );
    tracing::info!(storefront = %slug, theme = %editor.working().id, "Theme saved");

    if !is_htmx(&headers) {
        return Ok(Redirect::to(&editor_path(&slug)).into_response());
    }

    Ok(EditorStatusTemplate {
        dirty: false,
        message: Some("Theme saved.".to_string()),
        is_error: false,
        draft_css: None,
    }
    .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> ThemeEditor {
        ThemeEditor::new(registry::default_theme().clone())
    }

    #[test]
    fn test_every_editor_field_is_settable() {
        for (_, fields) in EDITOR_FIELDS {
            for (path, _, _) in *fields {
                let mut editor = editor();
                assert!(
                    editor.set_field(path, "1px").is_ok(),
                    "editor field {path} was rejected"
                );
                assert_eq!(editor.field(path).as_deref(), Some("1px"));
            }
        }
    }

    #[test]
    fn test_field_groups_use_color_inputs_for_hex() {
        let mut editor = editor();
        let _ = editor.set_field("colors.accent", "rgb(1, 2, 3)");
        let _ = editor.set_field("colors.primary", "#112233");
        let groups = field_groups(&editor);
        let colors = groups.first().map(|g| g.fields.clone()).unwrap_or_default();

        let field = |path: &str| colors.iter().find(|f| f.path == path).cloned();
        assert_eq!(field("colors.primary").map(|f| f.input_type), Some("color"));
        assert_eq!(field("colors.primary").map(|f| f.value), Some("#112233".to_string()));
        assert_eq!(field("colors.accent").map(|f| f.input_type), Some("text"));
        assert_eq!(
            field("text.muted").map(|f| f.input_id),
            Some("field-text-muted".to_string())
        );
    }

    #[test]
    fn test_custom_property_path() {
        let form = FieldForm {
            path: "customProperties".to_string(),
            value: "2px".to_string(),
            property: Some(" hero-gap ".to_string()),
        };
        assert_eq!(form.field_path(), "customProperties.hero-gap");

        let form = FieldForm {
            path: "colors.primary".to_string(),
            value: String::new(),
            property: Some("ignored".to_string()),
        };
        assert_eq!(form.field_path(), "colors.primary");
    }

    #[test]
    fn test_is_hex_color() {
        assert!(is_hex_color("#a1B2c3"));
        assert!(!is_hex_color("#fff"));
        assert!(!is_hex_color("red"));
        assert!(!is_hex_color("#12345g"));
    }

    #[test]
    fn test_draft_href_changes_every_time() {
        let a = draft_css_href("my store");
        assert!(a.starts_with("/manage/my%20store/theme/draft.css?rev="));
        assert_ne!(a, draft_css_href("my store"));
    }

    #[test]
    fn test_status_fragment_swaps_stylesheet_out_of_band() {
        let html = EditorStatusTemplate {
            dirty: true,
            message: None,
            is_error: false,
            draft_css: Some("/manage/acme/theme/draft.css?rev=1".to_string()),
        }
        .render()
        .unwrap_or_default();
        assert!(html.contains("id=\"draft-style\""));
        assert!(html.contains("hx-swap-oob=\"true\""));
        assert!(html.contains("Unsaved changes"));
    }
}
