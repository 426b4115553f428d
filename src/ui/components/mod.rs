pub mod header;
pub mod help;
pub mod playlists;
pub mod search;
pub mod tracks;
