use std::cell::RefCell;
use std::rc::Rc;

use fridge_poetry_core::{
    Board, BoardError, ConfigurationError, InputAction, InputController, Platform, PoolId,
    SessionEffect, Size, TileId, TimerToken, Word,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub(crate) type AppSubscriber = Rc<dyn Fn()>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

#[derive(Clone)]
pub(crate) struct AppSnapshot {
    pub(crate) board: Board,
    pub(crate) load: LoadState,
}

/// Measurements taken from the page when an event arrives.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Geometry {
    pub(crate) canvas: Size,
    pub(crate) tile: Size,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TimerCommand {
    Start { token: TimerToken, delay_ms: u32 },
    Cancel,
}

#[derive(Debug, Default)]
pub(crate) struct InputOutcome {
    pub(crate) timers: Vec<TimerCommand>,
    pub(crate) errors: Vec<BoardError>,
}

pub(crate) struct AppCore {
    state: RefCell<AppState>,
    subscribers: Rc<RefCell<Vec<AppSubscriber>>>,
}

struct AppState {
    board: Board,
    controller: InputController,
    rng: StdRng,
    load: LoadState,
}

impl AppCore {
    pub(crate) fn new(platform: Platform, pools: &[PoolId], seed: u64) -> Rc<Self> {
        let state = AppState {
            board: Board::new(platform, pools),
            controller: InputController::new(platform),
            rng: StdRng::seed_from_u64(seed),
            load: LoadState::Loading,
        };
        Rc::new(Self {
            state: RefCell::new(state),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        })
    }

    pub(crate) fn subscribe(&self, subscriber: AppSubscriber) -> AppSubscription {
        self.subscribers.borrow_mut().push(subscriber.clone());
        AppSubscription {
            subscriber,
            subscribers: Rc::clone(&self.subscribers),
        }
    }

    fn notify(&self) {
        let subscribers = self.subscribers.borrow().clone();
        for subscriber in subscribers {
            (subscriber)();
        }
    }

    pub(crate) fn snapshot(&self) -> AppSnapshot {
        let state = self.state.borrow();
        AppSnapshot {
            board: state.board.clone(),
            load: state.load.clone(),
        }
    }

    pub(crate) fn platform(&self) -> Platform {
        self.state.borrow().board.platform()
    }

    pub(crate) fn session_active(&self) -> bool {
        self.state.borrow().controller.is_active()
    }

    pub(crate) fn active_tile(&self) -> Option<TileId> {
        self.state.borrow().controller.session().map(|session| session.tile)
    }

    pub(crate) fn set_words(&self, words: Vec<Word>) -> Result<usize, ConfigurationError> {
        let result = {
            let mut state = self.state.borrow_mut();
            let state = &mut *state;
            state.load = LoadState::Ready;
            state.board.seed(words, &mut state.rng)
        };
        self.notify();
        result
    }

    pub(crate) fn set_load_failed(&self, message: String) {
        self.state.borrow_mut().load = LoadState::Failed(message);
        self.notify();
    }

    /// Ends any gesture in progress and reshuffles every tile into the pools.
    pub(crate) fn refresh(&self) -> (Vec<TimerCommand>, Result<(), ConfigurationError>) {
        let (timers, result) = {
            let mut state = self.state.borrow_mut();
            let state = &mut *state;
            let timers = state
                .controller
                .reset()
                .into_iter()
                .filter_map(|effect| match effect {
                    SessionEffect::CancelArmTimer => Some(TimerCommand::Cancel),
                    _ => None,
                })
                .collect();
            let result = state.board.reset_and_reshuffle(&mut state.rng);
            (timers, result)
        };
        self.notify();
        (timers, result)
    }

    pub(crate) fn apply_input(&self, action: InputAction, geometry: Geometry) -> InputOutcome {
        let mut outcome = InputOutcome::default();
        let changed = {
            let mut state = self.state.borrow_mut();
            let state = &mut *state;
            let effects = state.controller.handle(action);
            let changed = !effects.is_empty();
            for effect in effects {
                let result = match effect {
                    SessionEffect::Select(tile) => state.board.set_selected(tile, true),
                    SessionEffect::Deselect(tile) => state.board.set_selected(tile, false),
                    SessionEffect::StartArmTimer { token, delay_ms } => {
                        outcome.timers.push(TimerCommand::Start { token, delay_ms });
                        Ok(())
                    }
                    SessionEffect::CancelArmTimer => {
                        outcome.timers.push(TimerCommand::Cancel);
                        Ok(())
                    }
                    SessionEffect::Lift { tile, x, y } => state.board.lift(tile, x, y).map(|_| ()),
                    SessionEffect::Place { tile, x, y } => {
                        state.board.place(tile, x, y).map(|_| ())
                    }
                    SessionEffect::PlaceAtRandom { tile } => state
                        .board
                        .place_at_random(tile, geometry.canvas, geometry.tile.width, &mut state.rng)
                        .map(|_| ()),
                    SessionEffect::Unplace { tile, pool } => {
                        state.board.unplace(tile, pool).map(|_| ())
                    }
                };
                if let Err(err) = result {
                    outcome.errors.push(err);
                }
            }
            changed
        };
        if changed {
            self.notify();
        }
        outcome
    }
}

pub(crate) struct AppSubscription {
    subscriber: AppSubscriber,
    subscribers: Rc<RefCell<Vec<AppSubscriber>>>,
}

impl Drop for AppSubscription {
    fn drop(&mut self) {
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.retain(|item| !Rc::ptr_eq(item, &self.subscriber));
    }
}
