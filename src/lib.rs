// The binary entry point is main.rs; everything it drives lives here so the
// benchmarks and integration tests can reach it through `wortdrill::*`.

rust_i18n::i18n!("locales", fallback = "en");

pub mod app;
pub mod config;
pub mod engine;
pub mod event;
pub mod session;
pub mod store;
pub mod ui;
pub mod vocab;
