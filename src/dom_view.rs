use std::cell::RefCell;
use std::collections::HashMap;

use fridge_poetry_core::{Board, ContainerId, Platform, PoolId, Tile, TileId, TileState};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::app_core::{AppSnapshot, LoadState};
use crate::config::{
    FRIDGE_ID, LOAD_ERROR_TEXT, POOL_BOTTOM_ID, POOL_LEFT_ID, POOL_RIGHT_ID, PROMPT_CLASS,
    SELECTED_CLASS, TILE_CLASS, TILE_ID_ATTR,
};

#[derive(Debug, thiserror::Error)]
pub(crate) enum ViewError {
    #[error("missing #{0} element")]
    MissingElement(&'static str),
    #[error("could not create <{0}> element")]
    CreateElement(&'static str),
}

/// Applies board state to the host page. Tile elements are created once per
/// tile and then only moved between containers and restyled.
pub(crate) struct DomView {
    document: Document,
    platform: Platform,
    fridge: HtmlElement,
    pools: Vec<(PoolId, HtmlElement)>,
    prompt: Element,
    error_banner: Element,
    tiles: RefCell<HashMap<TileId, HtmlElement>>,
}

impl DomView {
    pub(crate) fn attach(document: &Document, platform: Platform) -> Result<Self, ViewError> {
        let fridge = html_element_by_id(document, FRIDGE_ID).ok_or(ViewError::MissingElement(FRIDGE_ID))?;
        let pools = [
            (PoolId::Bottom, POOL_BOTTOM_ID),
            (PoolId::Left, POOL_LEFT_ID),
            (PoolId::Right, POOL_RIGHT_ID),
        ]
        .into_iter()
        .filter_map(|(pool, id)| {
            let element = html_element_by_id(document, id);
            if element.is_none() {
                gloo::console::warn!(format!("#{id} not found; {pool:?} pool is unavailable"));
            }
            element.map(|element| (pool, element))
        })
        .collect();
        Self::with_elements(document, platform, fridge, pools)
    }

    pub(crate) fn with_elements(
        document: &Document,
        platform: Platform,
        fridge: HtmlElement,
        pools: Vec<(PoolId, HtmlElement)>,
    ) -> Result<Self, ViewError> {
        // Reuse a prompt the page already ships with.
        let prompt = match fridge.query_selector(&format!(".{PROMPT_CLASS}")).ok().flatten() {
            Some(prompt) => prompt,
            None => {
                let prompt = document
                    .create_element("p")
                    .map_err(|_| ViewError::CreateElement("p"))?;
                let _ = prompt.set_attribute("class", PROMPT_CLASS);
                prompt
            }
        };
        let error_banner = document
            .create_element("span")
            .map_err(|_| ViewError::CreateElement("span"))?;
        let _ = error_banner.set_attribute("class", "load-error");
        let _ = error_banner.set_attribute("style", "color: red;");
        error_banner.set_text_content(Some(LOAD_ERROR_TEXT));
        Ok(Self {
            document: document.clone(),
            platform,
            fridge,
            pools,
            prompt,
            error_banner,
            tiles: RefCell::new(HashMap::new()),
        })
    }

    pub(crate) fn pool_ids(&self) -> Vec<PoolId> {
        self.pools.iter().map(|(pool, _)| *pool).collect()
    }

    pub(crate) fn fridge(&self) -> &HtmlElement {
        &self.fridge
    }

    pub(crate) fn pools(&self) -> &[(PoolId, HtmlElement)] {
        &self.pools
    }

    pub(crate) fn tile_element(&self, id: TileId) -> Option<HtmlElement> {
        self.tiles.borrow().get(&id).cloned()
    }

    /// Container holding `element`, if any.
    pub(crate) fn container_of(&self, element: &Element) -> Option<ContainerId> {
        if self.fridge.contains(Some(element.as_ref())) {
            return Some(ContainerId::Fridge);
        }
        self.pools
            .iter()
            .find(|(_, pool)| pool.contains(Some(element.as_ref())))
            .map(|(pool, _)| ContainerId::Pool(*pool))
    }

    pub(crate) fn render(&self, snapshot: &AppSnapshot) {
        let board = &snapshot.board;
        self.sync_tiles(board);
        self.layout_container(board, ContainerId::Fridge, &self.fridge);
        for (pool, element) in &self.pools {
            self.layout_container(board, ContainerId::Pool(*pool), element);
        }
        match board.prompt() {
            Some(text) => {
                self.prompt.set_text_content(Some(text));
                if !self.fridge.contains(Some(self.prompt.as_ref())) {
                    let _ = self.fridge.append_child(&self.prompt);
                }
            }
            None => self.prompt.remove(),
        }
        match &snapshot.load {
            LoadState::Failed(_) => {
                if let Some(host) = self.banner_host(board) {
                    let _ = host.append_child(&self.error_banner);
                }
            }
            LoadState::Loading | LoadState::Ready => self.error_banner.remove(),
        }
    }

    fn banner_host(&self, board: &Board) -> Option<&HtmlElement> {
        let pool = board.designated_pool()?;
        self.pools
            .iter()
            .find(|(id, _)| *id == pool)
            .map(|(_, element)| element)
    }

    fn sync_tiles(&self, board: &Board) {
        let mut tiles = self.tiles.borrow_mut();
        tiles.retain(|id, element| {
            let keep = board.tile(*id).is_some();
            if !keep {
                element.remove();
            }
            keep
        });
        for tile in board.tiles() {
            let element = match tiles.get(&tile.id) {
                Some(element) => element.clone(),
                None => match self.create_tile_element(tile) {
                    Some(element) => {
                        tiles.insert(tile.id, element.clone());
                        element
                    }
                    None => {
                        gloo::console::warn!(format!("could not create tile {}", tile.id));
                        continue;
                    }
                },
            };
            if element.text_content().as_deref() != Some(tile.word.as_str()) {
                element.set_text_content(Some(tile.word.as_str()));
            }
            apply_tile_style(&element, tile);
        }
    }

    fn create_tile_element(&self, tile: &Tile) -> Option<HtmlElement> {
        let element = self
            .document
            .create_element("div")
            .ok()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        let _ = element.set_attribute("class", TILE_CLASS);
        let _ = element.set_attribute(TILE_ID_ATTR, &tile.id.to_string());
        if !self.platform.is_touch {
            let _ = element.set_attribute("draggable", "true");
        }
        Some(element)
    }

    fn layout_container(&self, board: &Board, container: ContainerId, host: &HtmlElement) {
        let tiles = self.tiles.borrow();
        for id in board.contents(container) {
            if let Some(element) = tiles.get(id) {
                let _ = host.append_child(element);
            }
        }
    }
}

fn apply_tile_style(element: &HtmlElement, tile: &Tile) {
    let style = element.style();
    match tile.state {
        TileState::Pooled => {
            for property in ["position", "left", "top", "transform", "pointer-events"] {
                let _ = style.remove_property(property);
            }
        }
        TileState::Placed(placement) | TileState::Lifted(placement) => {
            let _ = style.set_property("position", "absolute");
            let _ = style.set_property("left", &format!("{}px", placement.left));
            let _ = style.set_property("top", &format!("{}px", placement.top));
            let _ = style.set_property("transform", &format!("scale({})", placement.scale));
            // A lifted tile sits under the finger; let hit tests see through it.
            if matches!(tile.state, TileState::Lifted(_)) {
                let _ = style.set_property("pointer-events", "none");
            } else {
                let _ = style.remove_property("pointer-events");
            }
        }
    }
    let _ = element
        .class_list()
        .toggle_with_force(SELECTED_CLASS, tile.selected);
}

fn html_element_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
}

/// Tile id and element for an event target inside a tile.
pub(crate) fn tile_from_target(target: &Element) -> Option<(TileId, HtmlElement)> {
    let element = target.closest(&format!(".{TILE_CLASS}")).ok().flatten()?;
    let id = element.get_attribute(TILE_ID_ATTR)?.parse::<u32>().ok()?;
    let element = element.dyn_into::<HtmlElement>().ok()?;
    Some((TileId(id), element))
}
