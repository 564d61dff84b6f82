pub mod catalog;
pub mod config;
pub mod debounce;
pub mod models;
pub mod network;
pub mod parser;
pub mod search;

pub use catalog::Catalog;
pub use models::{Channel, Config};
pub use network::{FetchError, HttpPlaylistSource, PlaylistSource};
