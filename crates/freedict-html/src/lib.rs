pub mod catalog;
pub mod fetch;
pub mod generate;
pub mod render;

pub use catalog::{Catalog, CatalogEntry, CatalogError, DEFAULT_CATALOG_URL, Release, SkipReason};
pub use fetch::{Fetcher, Unpacked};
pub use generate::{GenerationStats, Generator, Settings, generate_pages, install_stylesheet};
pub use render::{Page, page_filenames, render_page, write_headword};
