use crate::board::{ContainerId, PoolId, TileId};

pub type TimerToken = u64;

/// Where a gesture ended. Fridge coordinates are canvas-relative and already
/// centered for the tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DropTarget {
    Fridge { x: f32, y: f32 },
    Pool(PoolId),
    Outside,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputAction {
    DragStart { tile: TileId, origin: ContainerId },
    Drop { target: DropTarget },
    DragEnd,
    TouchStart { tile: TileId, origin: ContainerId },
    TouchMove { x: f32, y: f32 },
    TouchEnd { target: DropTarget },
    TouchCancel,
    ArmTimerFired { token: TimerToken },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionEffect {
    Select(TileId),
    Deselect(TileId),
    StartArmTimer { token: TimerToken, delay_ms: u32 },
    CancelArmTimer,
    Lift { tile: TileId, x: f32, y: f32 },
    Place { tile: TileId, x: f32, y: f32 },
    PlaceAtRandom { tile: TileId },
    Unplace { tile: TileId, pool: Option<PoolId> },
}
