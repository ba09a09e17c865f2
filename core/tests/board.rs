use fridge_poetry_core::{
    Board, ConfigurationError, ContainerId, Platform, PoolId, Size, TileId, TileState, Word,
    BoardError, DRAG_PROMPT, PLACED_SCALE, ROW_HEIGHT, TAP_PROMPT,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn words(count: usize) -> Vec<Word> {
    (0..count).map(|idx| Word::new(&format!("w{idx}"))).collect()
}

fn seeded_board(platform: Platform, pools: &[PoolId], count: usize) -> (Board, StdRng) {
    let mut rng = StdRng::seed_from_u64(7);
    let mut board = Board::new(platform, pools);
    board.seed(words(count), &mut rng).expect("seed");
    (board, rng)
}

fn assert_ownership_consistent(board: &Board) {
    let mut seen = Vec::new();
    let mut containers = vec![ContainerId::Fridge];
    containers.extend(board.pools().iter().map(|pool| ContainerId::Pool(*pool)));
    for container in containers {
        for id in board.contents(container) {
            let tile = board.tile(*id).expect("tile");
            assert_eq!(tile.container, container);
            seen.push(*id);
        }
    }
    seen.sort();
    let expected: Vec<TileId> = board.tiles().iter().map(|tile| tile.id).collect();
    assert_eq!(seen, expected);
}

#[test]
fn seeding_spreads_tiles_round_robin() {
    for count in [0usize, 1, 2, 3, 7, 10, 31] {
        let (board, _) = seeded_board(
            Platform::POINTER,
            &[PoolId::Bottom, PoolId::Left, PoolId::Right],
            count,
        );
        let floor = count / 3;
        let ceil = count.div_ceil(3);
        for pool in PoolId::ALL {
            let len = board.contents(ContainerId::Pool(pool)).len();
            assert!(len == floor || len == ceil, "{pool:?} got {len} of {count}");
        }
        assert_eq!(board.tiles().len(), count);
        assert_ownership_consistent(&board);
    }
}

#[test]
fn seeding_uses_only_present_pools() {
    let (board, _) = seeded_board(Platform::POINTER, &[PoolId::Right, PoolId::Left], 9);
    assert_eq!(board.pools(), &[PoolId::Left, PoolId::Right]);
    assert_eq!(board.contents(ContainerId::Pool(PoolId::Bottom)).len(), 0);
    let left = board.contents(ContainerId::Pool(PoolId::Left)).len();
    let right = board.contents(ContainerId::Pool(PoolId::Right)).len();
    assert_eq!((left, right), (5, 4));
}

#[test]
fn touch_seeding_fills_designated_pool() {
    let (board, _) = seeded_board(
        Platform::TOUCH,
        &[PoolId::Bottom, PoolId::Left, PoolId::Right],
        12,
    );
    assert_eq!(board.contents(ContainerId::Pool(PoolId::Bottom)).len(), 12);
    assert!(board.contents(ContainerId::Pool(PoolId::Left)).is_empty());
    assert!(board.contents(ContainerId::Pool(PoolId::Right)).is_empty());
}

#[test]
fn designated_pool_falls_back_without_bottom() {
    let board = Board::new(Platform::TOUCH, &[PoolId::Right, PoolId::Left]);
    assert_eq!(board.designated_pool(), Some(PoolId::Left));
}

#[test]
fn seeding_keeps_every_word() {
    let (board, _) = seeded_board(Platform::POINTER, &[PoolId::Bottom], 20);
    let mut seen: Vec<String> = board
        .tiles()
        .iter()
        .map(|tile| tile.word.to_string())
        .collect();
    seen.sort();
    let mut expected: Vec<String> = words(20).iter().map(Word::to_string).collect();
    expected.sort();
    assert_eq!(seen, expected);
}

#[test]
fn seeding_without_pools_creates_nothing() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut board = Board::new(Platform::POINTER, &[]);
    assert_eq!(
        board.seed(words(5), &mut rng),
        Err(ConfigurationError::NoPools)
    );
    assert!(board.tiles().is_empty());
    assert_eq!(
        board.reset_and_reshuffle(&mut rng),
        Err(ConfigurationError::NoPools)
    );
}

#[test]
fn place_snaps_vertically_and_keeps_horizontal() {
    let (mut board, _) = seeded_board(Platform::POINTER, &[PoolId::Bottom], 3);
    let id = TileId(1);
    let placement = board.place(id, -12.5, 61.0).expect("place");
    assert_eq!(placement.left, -12.5);
    assert_eq!(placement.top, 70.0);
    assert_eq!(placement.scale, PLACED_SCALE);
    let tile = board.tile(id).expect("tile");
    assert_eq!(tile.container, ContainerId::Fridge);
    assert!(matches!(tile.state, TileState::Placed(_)));
    assert_eq!(board.contents(ContainerId::Fridge), &[id]);
    assert_eq!(board.prompt(), None);
    assert_ownership_consistent(&board);
}

#[test]
fn unplace_returns_to_dropped_pool_and_restores_prompt() {
    let (mut board, _) = seeded_board(
        Platform::POINTER,
        &[PoolId::Bottom, PoolId::Left, PoolId::Right],
        6,
    );
    let id = TileId(0);
    board.place(id, 10.0, 10.0).expect("place");
    let pool = board.unplace(id, Some(PoolId::Right)).expect("unplace");
    assert_eq!(pool, PoolId::Right);
    let tile = board.tile(id).expect("tile");
    assert_eq!(tile.state, TileState::Pooled);
    assert_eq!(tile.container, ContainerId::Pool(PoolId::Right));
    assert_eq!(
        board.contents(ContainerId::Pool(PoolId::Right)).last(),
        Some(&id)
    );
    assert_eq!(board.prompt(), Some(DRAG_PROMPT));
    assert_ownership_consistent(&board);
}

#[test]
fn unplace_on_touch_ignores_target_pool() {
    let (mut board, _) = seeded_board(
        Platform::TOUCH,
        &[PoolId::Bottom, PoolId::Left],
        4,
    );
    let id = TileId(2);
    board.place(id, 0.0, 0.0).expect("place");
    assert_eq!(board.unplace(id, Some(PoolId::Left)), Ok(PoolId::Bottom));
    assert_eq!(board.prompt(), Some(TAP_PROMPT));
}

#[test]
fn unplace_to_missing_pool_uses_designated() {
    let (mut board, _) = seeded_board(Platform::POINTER, &[PoolId::Left], 2);
    board.place(TileId(0), 0.0, 0.0).expect("place");
    assert_eq!(board.unplace(TileId(0), Some(PoolId::Right)), Ok(PoolId::Left));
}

#[test]
fn prompt_stays_hidden_while_any_tile_is_placed() {
    let (mut board, _) = seeded_board(Platform::POINTER, &[PoolId::Bottom], 3);
    board.place(TileId(0), 0.0, 0.0).expect("place");
    board.place(TileId(1), 40.0, 0.0).expect("place");
    board.unplace(TileId(0), None).expect("unplace");
    assert_eq!(board.prompt(), None);
    board.unplace(TileId(1), None).expect("unplace");
    assert_eq!(board.prompt(), Some(DRAG_PROMPT));
}

#[test]
fn unknown_tile_is_an_error() {
    let (mut board, _) = seeded_board(Platform::POINTER, &[PoolId::Bottom], 1);
    assert_eq!(
        board.place(TileId(9), 0.0, 0.0),
        Err(BoardError::UnknownTile(TileId(9)))
    );
    assert_eq!(
        board.unplace(TileId(9), None),
        Err(BoardError::UnknownTile(TileId(9)))
    );
}

#[test]
fn random_placement_stays_on_canvas_rows() {
    let (mut board, mut rng) = seeded_board(Platform::TOUCH, &[PoolId::Bottom], 1);
    let canvas = Size::new(300.0, 200.0);
    let tile_width = 60.0;
    for _ in 0..200 {
        let placement = board
            .place_at_random(TileId(0), canvas, tile_width, &mut rng)
            .expect("place");
        assert!(placement.left >= 0.0);
        assert!(placement.left <= canvas.width - tile_width * PLACED_SCALE);
        let row = placement.top / ROW_HEIGHT;
        assert_eq!(row, row.trunc());
        assert!(row < 5.0, "row {row} outside 200px canvas");
        assert!(matches!(board.tile(TileId(0)).expect("tile").state, TileState::Placed(_)));
    }
}

#[test]
fn random_placement_on_tiny_canvas_uses_origin() {
    let (mut board, mut rng) = seeded_board(Platform::TOUCH, &[PoolId::Bottom], 1);
    let placement = board
        .place_at_random(TileId(0), Size::new(20.0, 10.0), 60.0, &mut rng)
        .expect("place");
    assert_eq!((placement.left, placement.top), (0.0, 0.0));
}

#[test]
fn lift_tracks_without_placing() {
    let (mut board, _) = seeded_board(Platform::TOUCH, &[PoolId::Bottom], 2);
    let placement = board.lift(TileId(0), 33.0, 100.0).expect("lift");
    assert_eq!(placement.top, 105.0);
    assert_eq!(placement.scale, 1.0);
    let tile = board.tile(TileId(0)).expect("tile");
    assert!(!matches!(tile.state, TileState::Placed(_)));
    assert_eq!(tile.container, ContainerId::Fridge);
    board.lift(TileId(0), 40.0, 0.0).expect("lift");
    assert_eq!(board.contents(ContainerId::Fridge), &[TileId(0)]);
    assert_ownership_consistent(&board);
}

#[test]
fn refresh_returns_everything_to_pools() {
    let (mut board, mut rng) = seeded_board(
        Platform::POINTER,
        &[PoolId::Bottom, PoolId::Left, PoolId::Right],
        8,
    );
    board.place(TileId(0), 5.0, 5.0).expect("place");
    board.place(TileId(3), 50.0, 90.0).expect("place");
    board.set_selected(TileId(4), true).expect("select");
    board.reset_and_reshuffle(&mut rng).expect("refresh");

    assert!(board.fridge_is_empty());
    assert_eq!(board.prompt(), Some(DRAG_PROMPT));
    for tile in board.tiles() {
        assert_eq!(tile.state, TileState::Pooled);
        assert!(!tile.selected);
        assert!(matches!(tile.container, ContainerId::Pool(_)));
    }
    for pool in PoolId::ALL {
        let len = board.contents(ContainerId::Pool(pool)).len();
        assert!(len == 2 || len == 3);
    }
    assert_eq!(board.tiles().len(), 8);
    assert_ownership_consistent(&board);
}
