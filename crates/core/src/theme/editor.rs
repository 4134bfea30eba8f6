//! Theme customization state.
//!
//! [`ThemeEditor`] keeps a pristine copy of the theme being customized and a
//! working copy that field-path setters replace with a new record on every
//! change. Paths use the camelCase JSON names of the theme, for example
//! `colors.primary`, `typography.fontWeight.bold` or `layout.borderRadius.md`.
//! `text.*` is shorthand for `colors.text.*` and `customProperties.<name>`
//! inserts or replaces a custom CSS property.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::StorefrontTheme;
use super::css::is_safe_value;

/// Fields that cannot be changed through the editor.
const READ_ONLY_FIELDS: &[&str] = &["id"];

/// Optional fields; setting them to an empty string clears them.
const OPTIONAL_FIELDS: &[&str] = &[
    "typography.fontFamily.secondary",
    "typography.fontFamily.heading",
];

const CUSTOM_PROPERTIES_PREFIX: &str = "customProperties.";

/// Callback invoked with the new working copy after every change.
pub type ChangeListener = Box<dyn Fn(&StorefrontTheme) + Send + Sync>;

/// Errors returned by the field-path setters.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("unknown theme field: {0}")]
    UnknownField(String),
    #[error("theme field {0} is a group, not a value")]
    NotALeaf(String),
    #[error("theme field {0} is read-only")]
    ReadOnly(String),
    #[error("invalid value for {path}: {message}")]
    InvalidValue { path: String, message: String },
    #[error("theme serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Working state for customizing one theme.
#[derive(Serialize, Deserialize)]
pub struct ThemeEditor {
    pristine: StorefrontTheme,
    working: StorefrontTheme,
    dirty: bool,
    #[serde(skip)]
    listener: Option<ChangeListener>,
}

impl fmt::Debug for ThemeEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeEditor")
            .field("theme", &self.working.id)
            .field("dirty", &self.dirty)
            .field("has_listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}

impl ThemeEditor {
    /// Start editing a copy of `theme`.
    #[must_use]
    pub fn new(theme: StorefrontTheme) -> Self {
        Self {
            pristine: theme.clone(),
            working: theme,
            dirty: false,
            listener: None,
        }
    }

    /// Register the callback notified on every change.
    #[must_use]
    pub fn with_listener(mut self, listener: ChangeListener) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Replace the change listener (e.g. after restoring from a session).
    pub fn set_listener(&mut self, listener: ChangeListener) {
        self.listener = Some(listener);
    }

    /// The current working copy.
    #[must_use]
    pub const fn working(&self) -> &StorefrontTheme {
        &self.working
    }

    /// The copy the editor was started from (or last saved).
    #[must_use]
    pub const fn pristine(&self) -> &StorefrontTheme {
        &self.pristine
    }

    /// Whether any change was made since the last reset or save.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Set one field of the working copy.
    ///
    /// # Errors
    ///
    /// Returns an error if the path doesn't name a value of the theme or if
    /// the resulting record is invalid. The working copy is left unchanged.
    pub fn set_field(&mut self, path: &str, value: &str) -> Result<(), EditorError> {
        self.working = with_field(&self.working, path, value)?;
        self.dirty = true;
        self.notify();
        Ok(())
    }

    /// Switch to a different base theme, discarding any unsaved changes.
    pub fn apply_theme(&mut self, theme: StorefrontTheme) {
        self.pristine = theme.clone();
        self.working = theme;
        self.dirty = false;
        self.notify();
    }

    /// Restore the pristine copy.
    pub fn reset(&mut self) {
        self.working = self.pristine.clone();
        self.dirty = false;
        self.notify();
    }

    /// Hand the working copy to a persistence callback.
    ///
    /// On success the working copy becomes the new pristine copy.
    ///
    /// # Errors
    ///
    /// Returns whatever error the callback returns; the editor state is
    /// unchanged in that case.
    pub fn save<F, E>(&mut self, persist: F) -> Result<(), E>
    where
        F: FnOnce(&StorefrontTheme) -> Result<(), E>,
    {
        persist(&self.working)?;
        self.mark_saved();
        Ok(())
    }

    /// Record that the working copy was persisted by the caller.
    pub fn mark_saved(&mut self) {
        self.pristine = self.working.clone();
        self.dirty = false;
    }

    /// Current value of a field of the working copy.
    #[must_use]
    pub fn field(&self, path: &str) -> Option<String> {
        field_value(&self.working, path)
    }

    fn notify(&self) {
        if let Some(listener) = &self.listener {
            listener(&self.working);
        }
    }
}

/// Produce a copy of `theme` with the field at `path` set to `value`.
///
/// # Errors
///
/// See [`ThemeEditor::set_field`].
pub fn with_field(
    theme: &StorefrontTheme,
    path: &str,
    value: &str,
) -> Result<StorefrontTheme, EditorError> {
    let path = normalize_path(path);
    if READ_ONLY_FIELDS.contains(&path.as_str()) {
        return Err(EditorError::ReadOnly(path));
    }

    let clears_optional = OPTIONAL_FIELDS.contains(&path.as_str()) && value.trim().is_empty();
    if !clears_optional && !is_safe_value(value) {
        let message = if value.trim().is_empty() {
            "a value is required"
        } else {
            "value contains characters not allowed in CSS"
        };
        return Err(EditorError::InvalidValue {
            path,
            message: message.to_string(),
        });
    }

    let mut document = serde_json::to_value(theme)?;

    if let Some(name) = path.strip_prefix(CUSTOM_PROPERTIES_PREFIX) {
        if name.is_empty() {
            return Err(EditorError::UnknownField(path));
        }
        let properties = document
            .get_mut("customProperties")
            .and_then(Value::as_object_mut)
            .ok_or_else(|| EditorError::UnknownField(path.clone()))?;
        properties.insert(name.to_string(), Value::String(value.to_string()));
    } else {
        let mut node = &mut document;
        for segment in path.split('.') {
            node = node
                .get_mut(segment)
                .ok_or_else(|| EditorError::UnknownField(path.clone()))?;
        }

        match node {
            Value::String(_) | Value::Null => {
                *node = if clears_optional {
                    Value::Null
                } else {
                    Value::String(value.to_string())
                };
            }
            _ => return Err(EditorError::NotALeaf(path)),
        }
    }

    serde_json::from_value(document).map_err(|e| EditorError::InvalidValue {
        path,
        message: e.to_string(),
    })
}

/// Read the value at `path` from `theme`, using the same paths as
/// [`with_field`]. Cleared optional fields read as the empty string.
#[must_use]
pub fn field_value(theme: &StorefrontTheme, path: &str) -> Option<String> {
    let path = normalize_path(path);
    if let Some(name) = path.strip_prefix(CUSTOM_PROPERTIES_PREFIX) {
        return theme.custom_properties.get(name).cloned();
    }

    let document = serde_json::to_value(theme).ok()?;
    let mut node = &document;
    for segment in path.split('.') {
        node = node.get(segment)?;
    }
    match node {
        Value::String(value) => Some(value.clone()),
        Value::Null => Some(String::new()),
        _ => None,
    }
}

fn normalize_path(path: &str) -> String {
    let path = path.trim();
    if path.starts_with("text.") {
        format!("colors.{path}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::theme::css::{REQUIRED_VARIABLES, generate_theme_css};
    use crate::theme::registry;

    fn editor() -> ThemeEditor {
        ThemeEditor::new(registry::default_theme().clone())
    }

    #[test]
    fn test_set_then_reset_restores_primary_exactly() {
        let mut editor = editor();
        let original = editor.working().colors.primary.clone();

        editor.set_field("colors.primary", "#ff0000").unwrap();
        assert_eq!(editor.working().colors.primary, "#ff0000");
        assert!(editor.is_dirty());

        editor.reset();
        assert_eq!(editor.working().colors.primary, original);
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_registry_entry_is_not_mutated() {
        let mut editor = editor();
        editor.set_field("colors.accent", "#000000").unwrap();
        assert_ne!(registry::default_theme().colors.accent, "#000000");
        assert_eq!(editor.pristine(), registry::default_theme());
    }

    #[test]
    fn test_text_shorthand_path() {
        let mut editor = editor();
        editor.set_field("text.muted", "#aaaaaa").unwrap();
        assert_eq!(editor.working().colors.text.muted, "#aaaaaa");
    }

    #[test]
    fn test_nested_scale_path() {
        let mut editor = editor();
        editor.set_field("typography.fontWeight.bold", "800").unwrap();
        editor.set_field("typography.fontSize.2xl", "1.6rem").unwrap();
        editor.set_field("layout.borderRadius.md", "0").unwrap();

        let working = editor.working();
        assert_eq!(working.typography.font_weight.bold, "800");
        assert_eq!(working.typography.font_size.xxl, "1.6rem");
        assert_eq!(working.layout.border_radius.md, "0");
    }

    #[test]
    fn test_optional_font_can_be_set_and_cleared() {
        let mut editor = editor();
        editor
            .set_field("typography.fontFamily.secondary", "Georgia, serif")
            .unwrap();
        assert_eq!(
            editor.working().typography.font_family.secondary.as_deref(),
            Some("Georgia, serif")
        );

        editor
            .set_field("typography.fontFamily.secondary", "")
            .unwrap();
        assert_eq!(editor.working().typography.font_family.secondary, None);
    }

    #[test]
    fn test_custom_property_insert() {
        let mut editor = editor();
        editor
            .set_field("customProperties.hero-overlay", "rgba(0, 0, 0, 0.5)")
            .unwrap();
        assert_eq!(
            editor.working().custom_properties.get("hero-overlay").map(String::as_str),
            Some("rgba(0, 0, 0, 0.5)")
        );
    }

    #[test]
    fn test_unknown_and_group_paths_are_rejected() {
        let mut editor = editor();

        let err = editor.set_field("colors.tertiary", "#123456").unwrap_err();
        assert!(matches!(err, EditorError::UnknownField(_)));

        let err = editor.set_field("colors.text", "#123456").unwrap_err();
        assert!(matches!(err, EditorError::NotALeaf(_)));

        let err = editor.set_field("id", "stolen").unwrap_err();
        assert!(matches!(err, EditorError::ReadOnly(_)));

        let err = editor.set_field("customProperties.", "1px").unwrap_err();
        assert!(matches!(err, EditorError::UnknownField(_)));

        assert!(!editor.is_dirty());
        assert_eq!(editor.working(), registry::default_theme());
    }

    #[test]
    fn test_blank_and_unsafe_values_are_rejected() {
        let mut editor = editor();

        for value in ["", "   ", "#112233 /*", "red; color: blue", "\\3c", "</style>"] {
            let err = editor.set_field("colors.primary", value).unwrap_err();
            assert!(matches!(err, EditorError::InvalidValue { .. }), "accepted {value:?}");
        }
        let err = editor.set_field("customProperties.gap", "").unwrap_err();
        assert!(matches!(err, EditorError::InvalidValue { .. }));

        assert!(!editor.is_dirty());
        assert_eq!(editor.working(), registry::default_theme());
    }

    #[test]
    fn test_edited_theme_still_declares_every_variable() {
        let mut editor = editor();
        for path in [
            "colors.primary",
            "text.muted",
            "typography.fontFamily.primary",
            "typography.fontSize.base",
            "spacing.md",
            "layout.maxWidth",
            "layout.borderRadius.full",
            "effects.transition.slow",
        ] {
            assert!(editor.set_field(path, "").is_err(), "{path} accepted a blank value");
            assert!(editor.set_field(path, "1px /*").is_err(), "{path} accepted a comment");
        }
        editor.set_field("typography.fontFamily.heading", "").unwrap();
        editor.set_field("colors.primary", "#abcdef").unwrap();

        let json = serde_json::to_string(editor.working()).unwrap();
        let saved: StorefrontTheme = serde_json::from_str(&json).unwrap();
        let css = generate_theme_css(&saved);
        for variable in REQUIRED_VARIABLES {
            assert!(css.contains(&format!("  {variable}: ")), "missing {variable}");
        }
        assert!(css.contains("  --theme-primary: #abcdef;"));
    }

    #[test]
    fn test_invalid_category_is_rejected() {
        let mut editor = editor();
        let err = editor.set_field("category", "brutalist").unwrap_err();
        assert!(matches!(err, EditorError::InvalidValue { .. }));

        editor.set_field("category", "bold").unwrap();
        assert_eq!(
            editor.working().category,
            crate::theme::ThemeCategory::Bold
        );
    }

    #[test]
    fn test_listener_is_notified_on_every_change() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let mut editor = editor().with_listener(Box::new(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        }));

        editor.set_field("colors.primary", "#ff0000").unwrap();
        editor.set_field("colors.primary", "#ff0000").unwrap();
        let _ = editor.set_field("colors.nope", "#ff0000");
        editor.reset();

        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_save_hands_working_copy_to_callback() {
        let mut editor = editor();
        editor.set_field("colors.primary", "#00ff00").unwrap();

        let mut persisted = None;
        editor
            .save(|theme| {
                persisted = Some(theme.clone());
                Ok::<(), String>(())
            })
            .unwrap();

        assert_eq!(persisted.unwrap().colors.primary, "#00ff00");
        assert!(!editor.is_dirty());
        assert_eq!(editor.pristine().colors.primary, "#00ff00");

        editor.reset();
        assert_eq!(editor.working().colors.primary, "#00ff00");
    }

    #[test]
    fn test_failed_save_keeps_state() {
        let mut editor = editor();
        editor.set_field("colors.primary", "#00ff00").unwrap();

        let result = editor.save(|_| Err("backend down"));
        assert_eq!(result, Err("backend down"));
        assert!(editor.is_dirty());
        assert_eq!(editor.pristine(), registry::default_theme());
    }

    #[test]
    fn test_apply_theme_switches_base() {
        let mut editor = editor();
        editor.set_field("colors.primary", "#00ff00").unwrap();

        let bold = registry::get("bold-market").unwrap().clone();
        editor.apply_theme(bold.clone());
        assert_eq!(editor.working(), &bold);
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_editor_survives_serialization() {
        let mut editor = editor();
        editor.set_field("colors.primary", "#00ff00").unwrap();

        let json = serde_json::to_string(&editor).unwrap();
        let restored: ThemeEditor = serde_json::from_str(&json).unwrap();
        assert!(restored.is_dirty());
        assert_eq!(restored.working().colors.primary, "#00ff00");
        assert_eq!(restored.pristine(), registry::default_theme());
    }

    #[test]
    fn test_field_value_reads_working_copy() {
        let mut editor = editor();
        let theme = registry::default_theme();
        assert_eq!(editor.field("colors.primary"), Some(theme.colors.primary.clone()));
        assert_eq!(
            editor.field("text.muted"),
            Some(theme.colors.text.muted.clone())
        );
        assert_eq!(editor.field("colors.text"), None);
        assert_eq!(editor.field("colors.nope"), None);

        editor.set_field("typography.fontFamily.heading", "").unwrap();
        assert_eq!(editor.field("typography.fontFamily.heading"), Some(String::new()));

        editor.set_field("customProperties.gap", "4px").unwrap();
        assert_eq!(editor.field("customProperties.gap"), Some("4px".to_string()));
    }
}
