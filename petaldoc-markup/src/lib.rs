//! `petaldoc-markup`: a small, deterministic markdown to HTML converter.
//!
//! Only the subset of markdown that petaldoc itself emits (and that curated
//! pages use) is understood: ATX headings up to level three, pipe tables,
//! `-` lists, fenced code blocks, inline code, links, images, bold and
//! italic. Everything else passes through as paragraph text.
//!
//! # Example
//!
//! ```
//! use petaldoc_markup::convert;
//!
//! let html = convert("# Button\n\nA clickable control.", 1);
//! assert!(html.starts_with("<h1>Button</h1>"));
//! ```

pub mod converter;
pub mod utils;

pub use converter::convert;
