pub mod model;

pub use model::{CatalogPage, NewEntry, Page, PlaylistEntry, Song};
