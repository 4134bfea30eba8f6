//! Page layout of storefront modules.
//!
//! Hidden modules are dropped, footer modules are split off, and each group
//! is ordered by `order` (missing counts as 0). The sort is stable, so ties
//! keep their original position.

use super::StorefrontModule;

/// Modules that are not hidden, in original order.
pub fn visible_modules(modules: &[StorefrontModule]) -> impl Iterator<Item = &StorefrontModule> {
    modules.iter().filter(|module| module.is_visible)
}

/// Visible non-footer modules, sorted for the main page flow.
#[must_use]
pub fn main_modules(modules: &[StorefrontModule]) -> Vec<&StorefrontModule> {
    sorted(visible_modules(modules).filter(|module| !module.is_footer()))
}

/// Visible footer modules, sorted.
#[must_use]
pub fn footer_modules(modules: &[StorefrontModule]) -> Vec<&StorefrontModule> {
    sorted(visible_modules(modules).filter(|module| module.is_footer()))
}

fn sorted<'a>(modules: impl Iterator<Item = &'a StorefrontModule>) -> Vec<&'a StorefrontModule> {
    let mut modules: Vec<&StorefrontModule> = modules.collect();
    modules.sort_by_key(|module| module.sort_key());
    modules
}

/// Both module groups of a page.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleLayout<'a> {
    pub main: Vec<&'a StorefrontModule>,
    pub footer: Vec<&'a StorefrontModule>,
}

impl<'a> ModuleLayout<'a> {
    /// Plan the layout of a configured module list.
    #[must_use]
    pub fn plan(modules: &'a [StorefrontModule]) -> Self {
        Self {
            main: main_modules(modules),
            footer: footer_modules(modules),
        }
    }

    /// Whether neither group has anything to render.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.main.is_empty() && self.footer.is_empty()
    }
}
