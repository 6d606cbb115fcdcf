//! Browsershelf library — fetch a browserslist config, resolve it to concrete
//! browser versions, and classify the result for display.
//!
//! Pipeline: [`render`] ← [`classify`] ← [`resolver`] ← [`fetch`] ← [`cache`],
//! wired together by [`service::ShelfService`].

pub mod cache;
pub mod catalog;
pub mod cli;
pub mod classify;
pub mod config;
pub mod fetch;
pub mod render;
pub mod resolver;
pub mod service;

pub use catalog::PlatformClass;
pub use classify::{BrowserRecord, ClassifiedBrowsers};
pub use config::Settings;
pub use render::HeadingTag;
pub use service::ShelfService;
