pub mod export;
pub mod html;

pub use export::{render_csv, CSV_FILENAME, CSV_HEADER};
pub use html::{priority_class, render_page, HtmlRenderer, DEFAULT_PRIORITY_CLASS};
