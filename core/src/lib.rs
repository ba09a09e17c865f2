pub mod action;
pub mod board;
pub mod error;
pub mod placement;
pub mod platform;
pub mod session;
pub mod words;

pub use action::{DropTarget, InputAction, SessionEffect, TimerToken};
pub use board::{Board, ContainerId, PoolId, Tile, TileId, TileState};
pub use error::{BoardError, ConfigurationError, FetchError};
pub use placement::{
    centered_in_canvas, random_slot, row_count, snap_top, Placement, Size, PLACED_SCALE,
    ROW_HEIGHT,
};
pub use platform::{Platform, DRAG_PROMPT, TAP_PROMPT};
pub use session::{InputController, InteractionSession, SessionPhase, ARM_DELAY_MS};
pub use words::{parse_words, Word};
