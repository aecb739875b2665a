//! panorama-groups: a Panorama-style tab grouping engine.
//!
//! Per-window group lists and per-tab group assignment, with visibility
//! kept reconciled against the active group. Durable state lives in an
//! eventually consistent session store behind the `SessionStore` trait;
//! all tab work goes through the `BrowserHost` trait.
//!
//! This library crate exposes all modules for use by the binary and
//! integration tests.

pub mod app;
pub mod browser;
pub mod managers;
pub mod platform;
pub mod services;
pub mod store;
pub mod types;
