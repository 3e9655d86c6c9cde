//! The media library: a persisted, searchable list of file paths.

mod import;
mod model;
mod store;

pub use import::collect_media_files;
pub use model::Library;
pub use store::LibraryStore;

#[cfg(test)]
mod tests;
