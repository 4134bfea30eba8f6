//! Shopfront Core - Shared types library.
//!
//! This crate provides the domain model used across all Shopfront components:
//! - `storefront` - Public-facing storefront server and theme editor
//! - `cli` - Command-line tools for inspecting themes and storefront configs
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. Everything here can be unit tested without a runtime.
//!
//! # Modules
//!
//! - [`theme`] - Design-token records, the theme registry, the CSS variable
//!   generator and the theme editor
//! - [`module`] - Storefront content modules and their page layout
//! - [`catalog`] - Products, browse filtering, sorting and pagination
//! - [`storefront`] - The public storefront payload served by the backend
//! - [`types`] - Newtype wrappers for IDs and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod module;
pub mod storefront;
pub mod theme;
pub mod types;

pub use catalog::{Page, Product, ProductSort};
pub use module::{ModuleLayout, ModuleType, StorefrontModule};
pub use storefront::{PublicStorefront, StoreInfo, StorefrontCustomization};
pub use theme::{StorefrontTheme, ThemeCategory, ThemeEditor};
pub use types::*;
