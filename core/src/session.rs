//! Gesture disambiguation.
//!
//! Pointer platforms use native drag and drop, so a session is simply the tile
//! being dragged. Touch platforms have no drag events: a press on a pooled tile
//! is held in [`SessionPhase::Armed`] for [`ARM_DELAY_MS`] so that a short tap
//! can be told apart from a drag. A tap teleports a pooled tile onto the
//! fridge and sends a fridge tile back to its pool. Each platform only
//! accepts its own gesture family.
//!
//! The controller never touches the board or the clock. It answers each
//! [`InputAction`] with [`SessionEffect`]s for the caller to apply.

use crate::action::{DropTarget, InputAction, SessionEffect, TimerToken};
use crate::board::{ContainerId, TileId};
use crate::platform::Platform;

pub const ARM_DELAY_MS: u32 = 250;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Armed,
    Dragging,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InteractionSession {
    pub tile: TileId,
    pub origin: ContainerId,
    pub phase: SessionPhase,
    pub timer: Option<TimerToken>,
    pub moved: bool,
    pub selected: bool,
    pub last_point: Option<(f32, f32)>,
}

impl InteractionSession {
    fn dragging(tile: TileId, origin: ContainerId) -> Self {
        Self {
            tile,
            origin,
            phase: SessionPhase::Dragging,
            timer: None,
            moved: false,
            selected: false,
            last_point: None,
        }
    }

    fn is_tap(&self) -> bool {
        !self.moved && (self.origin == ContainerId::Fridge || self.phase == SessionPhase::Armed)
    }
}

#[derive(Debug)]
pub struct InputController {
    platform: Platform,
    session: Option<InteractionSession>,
    next_token: TimerToken,
}

impl InputController {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            session: None,
            next_token: 1,
        }
    }

    pub fn session(&self) -> Option<&InteractionSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn handle(&mut self, action: InputAction) -> Vec<SessionEffect> {
        match action {
            InputAction::DragStart { tile, origin } => self.drag_start(tile, origin),
            InputAction::Drop { target } => self.drop_on(target),
            InputAction::DragEnd => {
                self.session = None;
                Vec::new()
            }
            InputAction::TouchStart { tile, origin } => self.touch_start(tile, origin),
            InputAction::TouchMove { x, y } => self.touch_move(x, y),
            InputAction::TouchEnd { target } => self.touch_end(target),
            InputAction::TouchCancel => self.reset(),
            InputAction::ArmTimerFired { token } => self.arm_timer_fired(token),
        }
    }

    /// Drops any session, undoing its transient state. A tile that was
    /// already lifted is settled: back to the pool it came from, or at the
    /// last tracked point when it started on the fridge.
    pub fn reset(&mut self) -> Vec<SessionEffect> {
        let Some(session) = self.session.take() else {
            return Vec::new();
        };
        let mut effects = cleanup_effects(&session);
        effects.extend(settle_effect(&session));
        effects
    }

    fn drag_start(&mut self, tile: TileId, origin: ContainerId) -> Vec<SessionEffect> {
        if self.platform.is_touch {
            return Vec::new();
        }
        // A new native drag replaces a session whose drop never arrived.
        let effects = self.reset();
        self.session = Some(InteractionSession::dragging(tile, origin));
        effects
    }

    fn drop_on(&mut self, target: DropTarget) -> Vec<SessionEffect> {
        let Some(session) = self.session.take() else {
            return Vec::new();
        };
        match target {
            DropTarget::Fridge { x, y } => vec![SessionEffect::Place {
                tile: session.tile,
                x,
                y,
            }],
            DropTarget::Pool(pool) => vec![SessionEffect::Unplace {
                tile: session.tile,
                pool: Some(pool),
            }],
            DropTarget::Outside => Vec::new(),
        }
    }

    fn touch_start(&mut self, tile: TileId, origin: ContainerId) -> Vec<SessionEffect> {
        if !self.platform.is_touch || self.session.is_some() {
            return Vec::new();
        }
        if origin == ContainerId::Fridge {
            self.session = Some(InteractionSession::dragging(tile, origin));
            return Vec::new();
        }
        let token = self.next_token;
        self.next_token += 1;
        self.session = Some(InteractionSession {
            tile,
            origin,
            phase: SessionPhase::Armed,
            timer: Some(token),
            moved: false,
            selected: true,
            last_point: None,
        });
        vec![
            SessionEffect::Select(tile),
            SessionEffect::StartArmTimer {
                token,
                delay_ms: ARM_DELAY_MS,
            },
        ]
    }

    fn arm_timer_fired(&mut self, token: TimerToken) -> Vec<SessionEffect> {
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        if session.phase != SessionPhase::Armed || session.timer != Some(token) {
            return Vec::new();
        }
        session.phase = SessionPhase::Dragging;
        session.timer = None;
        session.selected = false;
        vec![SessionEffect::Deselect(session.tile)]
    }

    fn touch_move(&mut self, x: f32, y: f32) -> Vec<SessionEffect> {
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        let mut effects = Vec::new();
        if session.phase == SessionPhase::Armed {
            if session.timer.take().is_some() {
                effects.push(SessionEffect::CancelArmTimer);
            }
            if session.selected {
                session.selected = false;
                effects.push(SessionEffect::Deselect(session.tile));
            }
            session.phase = SessionPhase::Dragging;
        }
        session.moved = true;
        session.last_point = Some((x, y));
        effects.push(SessionEffect::Lift {
            tile: session.tile,
            x,
            y,
        });
        effects
    }

    fn touch_end(&mut self, target: DropTarget) -> Vec<SessionEffect> {
        let Some(session) = self.session.take() else {
            return Vec::new();
        };
        let mut effects = cleanup_effects(&session);
        let tile = session.tile;
        if session.is_tap() {
            if session.origin == ContainerId::Fridge {
                effects.push(SessionEffect::Unplace { tile, pool: None });
            } else {
                effects.push(SessionEffect::PlaceAtRandom { tile });
            }
            return effects;
        }
        match target {
            DropTarget::Fridge { x, y } => effects.push(SessionEffect::Place { tile, x, y }),
            DropTarget::Pool(pool) => effects.push(SessionEffect::Unplace {
                tile,
                pool: Some(pool),
            }),
            DropTarget::Outside => {
                if let Some((x, y)) = session.last_point {
                    effects.push(SessionEffect::Place { tile, x, y });
                }
            }
        }
        effects
    }
}

fn cleanup_effects(session: &InteractionSession) -> Vec<SessionEffect> {
    let mut effects = Vec::new();
    if session.timer.is_some() {
        effects.push(SessionEffect::CancelArmTimer);
    }
    if session.selected {
        effects.push(SessionEffect::Deselect(session.tile));
    }
    effects
}

fn settle_effect(session: &InteractionSession) -> Option<SessionEffect> {
    if !session.moved {
        return None;
    }
    let tile = session.tile;
    match (session.origin, session.last_point) {
        (ContainerId::Fridge, Some((x, y))) => Some(SessionEffect::Place { tile, x, y }),
        _ => Some(SessionEffect::Unplace { tile, pool: None }),
    }
}
