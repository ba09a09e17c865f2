use crate::board::TileId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("window unavailable")]
    NoWindow,
    #[error("request failed: {0}")]
    Request(String),
    #[error("HTTP error! Status: {status} - could not load {url}")]
    Status { status: u16, url: String },
    #[error("response body unreadable: {0}")]
    Body(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("no word pool containers found")]
    NoPools,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("unknown tile {0}")]
    UnknownTile(TileId),
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}
