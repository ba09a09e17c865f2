use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{BoardError, ConfigurationError};
use crate::placement::{random_slot, Placement, Size};
use crate::platform::Platform;
use crate::words::Word;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u32);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PoolId {
    Bottom,
    Left,
    Right,
}

impl PoolId {
    /// Distribution order when several pools are present.
    pub const ALL: [PoolId; 3] = [PoolId::Bottom, PoolId::Left, PoolId::Right];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContainerId {
    Pool(PoolId),
    Fridge,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TileState {
    Pooled,
    Placed(Placement),
    /// Following a finger across the fridge, not yet dropped.
    Lifted(Placement),
}

impl TileState {
    pub fn placement(&self) -> Option<Placement> {
        match self {
            TileState::Pooled => None,
            TileState::Placed(placement) | TileState::Lifted(placement) => Some(*placement),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Tile {
    pub id: TileId,
    pub word: Word,
    pub state: TileState,
    pub container: ContainerId,
    pub selected: bool,
}

/// Tiles and the containers that own them.
///
/// Tiles are stored by id; each container keeps the order in which tiles were
/// appended to it, which is the order they are laid out in.
#[derive(Clone, Debug)]
pub struct Board {
    platform: Platform,
    pools: Vec<PoolId>,
    tiles: Vec<Tile>,
    pool_contents: Vec<(PoolId, Vec<TileId>)>,
    fridge: Vec<TileId>,
}

impl Board {
    pub fn new(platform: Platform, pools: &[PoolId]) -> Self {
        let pools: Vec<PoolId> = PoolId::ALL
            .into_iter()
            .filter(|pool| pools.contains(pool))
            .collect();
        let pool_contents = pools.iter().map(|pool| (*pool, Vec::new())).collect();
        Self {
            platform,
            pools,
            tiles: Vec::new(),
            pool_contents,
            fridge: Vec::new(),
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn pools(&self) -> &[PoolId] {
        &self.pools
    }

    /// Where tiles go when no specific pool applies: the bottom pool when the
    /// page has one.
    pub fn designated_pool(&self) -> Option<PoolId> {
        if self.pools.contains(&PoolId::Bottom) {
            Some(PoolId::Bottom)
        } else {
            self.pools.first().copied()
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.0 as usize)
    }

    pub fn contents(&self, container: ContainerId) -> &[TileId] {
        match container {
            ContainerId::Fridge => &self.fridge,
            ContainerId::Pool(pool) => self
                .pool_contents
                .iter()
                .find(|(id, _)| *id == pool)
                .map(|(_, tiles)| tiles.as_slice())
                .unwrap_or(&[]),
        }
    }

    pub fn fridge_is_empty(&self) -> bool {
        self.fridge.is_empty()
    }

    /// Placeholder text for the fridge, present only while it holds no tiles.
    pub fn prompt(&self) -> Option<&'static str> {
        if self.fridge_is_empty() {
            Some(self.platform.prompt_text())
        } else {
            None
        }
    }

    /// Replaces all tiles with one pooled tile per word, in shuffled order.
    pub fn seed<R: Rng>(&mut self, mut words: Vec<Word>, rng: &mut R) -> Result<usize, ConfigurationError> {
        if self.pools.is_empty() {
            return Err(ConfigurationError::NoPools);
        }
        words.shuffle(rng);
        self.clear_containers();
        self.tiles = words
            .into_iter()
            .enumerate()
            .map(|(idx, word)| Tile {
                id: TileId(idx as u32),
                word,
                state: TileState::Pooled,
                container: ContainerId::Fridge,
                selected: false,
            })
            .collect();
        let order: Vec<TileId> = self.tiles.iter().map(|tile| tile.id).collect();
        self.distribute(&order);
        Ok(self.tiles.len())
    }

    /// Sends every tile back to the pools in a fresh order.
    pub fn reset_and_reshuffle<R: Rng>(&mut self, rng: &mut R) -> Result<(), ConfigurationError> {
        if self.pools.is_empty() {
            return Err(ConfigurationError::NoPools);
        }
        for tile in &mut self.tiles {
            tile.state = TileState::Pooled;
            tile.selected = false;
        }
        let mut order: Vec<TileId> = self.tiles.iter().map(|tile| tile.id).collect();
        order.shuffle(rng);
        self.clear_containers();
        self.distribute(&order);
        Ok(())
    }

    pub fn place(&mut self, id: TileId, raw_x: f32, raw_y: f32) -> Result<Placement, BoardError> {
        let placement = Placement::placed(raw_x, raw_y);
        self.move_tile(id, ContainerId::Fridge)?;
        self.tile_mut(id)?.state = TileState::Placed(placement);
        Ok(placement)
    }

    pub fn lift(&mut self, id: TileId, raw_x: f32, raw_y: f32) -> Result<Placement, BoardError> {
        let placement = Placement::lifted(raw_x, raw_y);
        if self.tile(id).map(|tile| tile.container) != Some(ContainerId::Fridge) {
            self.move_tile(id, ContainerId::Fridge)?;
        }
        self.tile_mut(id)?.state = TileState::Lifted(placement);
        Ok(placement)
    }

    pub fn place_at_random<R: Rng>(
        &mut self,
        id: TileId,
        canvas: Size,
        tile_width: f32,
        rng: &mut R,
    ) -> Result<Placement, BoardError> {
        let (x, y) = random_slot(rng, canvas, tile_width);
        self.place(id, x, y)
    }

    /// Returns a tile to a pool. Touch layouts always use the designated pool;
    /// otherwise `target` wins when the page has that pool.
    pub fn unplace(&mut self, id: TileId, target: Option<PoolId>) -> Result<PoolId, BoardError> {
        let pool = self.return_pool(target).ok_or(ConfigurationError::NoPools)?;
        self.move_tile(id, ContainerId::Pool(pool))?;
        self.tile_mut(id)?.state = TileState::Pooled;
        Ok(pool)
    }

    pub fn set_selected(&mut self, id: TileId, selected: bool) -> Result<(), BoardError> {
        self.tile_mut(id)?.selected = selected;
        Ok(())
    }

    fn return_pool(&self, target: Option<PoolId>) -> Option<PoolId> {
        if self.platform.is_touch {
            return self.designated_pool();
        }
        match target {
            Some(pool) if self.pools.contains(&pool) => Some(pool),
            _ => self.designated_pool(),
        }
    }

    fn tile_mut(&mut self, id: TileId) -> Result<&mut Tile, BoardError> {
        self.tiles
            .get_mut(id.0 as usize)
            .ok_or(BoardError::UnknownTile(id))
    }

    fn move_tile(&mut self, id: TileId, to: ContainerId) -> Result<(), BoardError> {
        let from = self.tile_mut(id)?.container;
        if let Some(list) = self.contents_mut(from) {
            list.retain(|tile| *tile != id);
        }
        let list = self.contents_mut(to).ok_or(ConfigurationError::NoPools)?;
        list.push(id);
        self.tile_mut(id)?.container = to;
        Ok(())
    }

    fn contents_mut(&mut self, container: ContainerId) -> Option<&mut Vec<TileId>> {
        match container {
            ContainerId::Fridge => Some(&mut self.fridge),
            ContainerId::Pool(pool) => self
                .pool_contents
                .iter_mut()
                .find(|(id, _)| *id == pool)
                .map(|(_, tiles)| tiles),
        }
    }

    fn clear_containers(&mut self) {
        self.fridge.clear();
        for (_, tiles) in &mut self.pool_contents {
            tiles.clear();
        }
    }

    fn distribute(&mut self, order: &[TileId]) {
        let targets: Vec<PoolId> = if self.platform.is_touch {
            self.designated_pool().into_iter().collect()
        } else {
            self.pools.clone()
        };
        if targets.is_empty() {
            return;
        }
        for (idx, id) in order.iter().enumerate() {
            let pool = targets[idx % targets.len()];
            if let Some(tile) = self.tiles.get_mut(id.0 as usize) {
                tile.container = ContainerId::Pool(pool);
            }
            if let Some(list) = self.contents_mut(ContainerId::Pool(pool)) {
                list.push(*id);
            }
        }
    }
}
