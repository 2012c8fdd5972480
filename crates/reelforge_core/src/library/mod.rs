//! Asset libraries (background music manifest).

mod music;

pub use music::{MusicLibrary, MusicLibraryError, MusicTrack};
