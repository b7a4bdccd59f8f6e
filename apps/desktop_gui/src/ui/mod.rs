//! UI layer for the desktop GUI: app shell and per-role screens.

pub mod app;

pub use app::VitaCareApp;
