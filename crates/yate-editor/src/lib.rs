//! # yate-editor — Editor core for yate
//!
//! This crate contains the fundamental building blocks of the editor:
//!
//! - **[`position`]** — `Position` (row, col), 0-indexed
//! - **[`row`]** — `Row`: raw text plus its tab-expanded rendered form
//! - **[`document`]** — `Document`: the ordered row store with file I/O,
//!   the dirty flag, and every structural edit operation
//! - **[`cursor`]** — `Cursor` with wrap-at-line-edge movement and the
//!   clamp-on-vertical-move policy
//! - **[`view`]** — `Viewport`: scroll offsets derived from the cursor
//! - **[`search`]** — forward literal search over rendered rows
//!
//! The terminal side (raw mode, key decoding, frame output) lives in
//! `yate-term`; the session loop that ties the two together is the
//! binary crate.

pub mod cursor;
pub mod document;
pub mod position;
pub mod row;
pub mod search;
pub mod view;
