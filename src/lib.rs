//! Self-contained HTML previews for Jupyter notebooks.
//!
//! The heavy lifting — notebook parsing and HTML generation — is delegated to
//! an external `nbtohtml` executable. This crate locates the bundled preview
//! assets (layout styles, syntax-highlight theme, KaTeX), invokes the
//! converter, and assembles the result into a [`PreviewDocument`] that the
//! presentation layer turns into a standalone page.
//!
//! [`PreviewDocument`]: application::preview::PreviewDocument

pub mod application;
pub mod config;
pub mod infra;
pub mod presentation;
