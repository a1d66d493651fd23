//! glimpse - a local content preview tool
//!
//! Classifies pasted or loaded text (diagram markup, Markdown, JSON or
//! plain text) and renders a navigable preview, with a debounced,
//! cancellation-safe render pipeline, a lazy tree view for large JSON,
//! unified zoom/pan gestures, editor/preview scroll coupling, and a
//! persisted history + favorites store.
//!
//! The core follows an Elm-style shape: messages ([`messages::Msg`]) go
//! through [`update::update`] against the [`model::AppModel`], producing
//! [`commands::Cmd`] side effects that the [`runtime::Runtime`] executes.

pub mod classify;
pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod messages;
pub mod model;
pub mod render;
pub mod runtime;
pub mod scroll_sync;
pub mod store;
pub mod tracing;
pub mod tree;
pub mod update;
pub mod util;
pub mod viewport;
