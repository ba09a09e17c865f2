use rand::Rng;

pub const ROW_HEIGHT: f32 = 35.0;
pub const PLACED_SCALE: f32 = 1.05;
pub(crate) const LIFTED_SCALE: f32 = 1.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Position of a tile on the fridge, relative to its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub left: f32,
    pub top: f32,
    pub scale: f32,
}

impl Placement {
    pub fn placed(raw_x: f32, raw_y: f32) -> Self {
        Self {
            left: raw_x,
            top: snap_top(raw_y),
            scale: PLACED_SCALE,
        }
    }

    pub fn lifted(raw_x: f32, raw_y: f32) -> Self {
        Self {
            left: raw_x,
            top: snap_top(raw_y),
            scale: LIFTED_SCALE,
        }
    }
}

/// Snaps a vertical offset to the nearest row, never above the first one.
pub fn snap_top(raw_y: f32) -> f32 {
    let snapped = (raw_y / ROW_HEIGHT).round() * ROW_HEIGHT;
    if snapped.is_nan() || snapped <= 0.0 {
        0.0
    } else {
        snapped
    }
}

pub fn row_count(canvas_height: f32) -> u32 {
    if canvas_height.is_nan() || canvas_height <= 0.0 {
        return 0;
    }
    (canvas_height / ROW_HEIGHT).floor() as u32
}

/// Canvas-relative origin that centers a tile under a viewport point.
pub fn centered_in_canvas(pointer: (f32, f32), canvas_origin: (f32, f32), tile: Size) -> (f32, f32) {
    (
        pointer.0 - canvas_origin.0 - tile.width * 0.5,
        pointer.1 - canvas_origin.1 - tile.height * 0.5,
    )
}

/// Picks a row-aligned slot on the canvas for tap-to-place.
pub fn random_slot<R: Rng>(rng: &mut R, canvas: Size, tile_width: f32) -> (f32, f32) {
    let max_x = canvas.width - tile_width * PLACED_SCALE;
    let x = if max_x > 0.0 {
        rng.random_range(0.0..=max_x)
    } else {
        0.0
    };
    let rows = row_count(canvas.height);
    let row = if rows > 0 { rng.random_range(0..rows) } else { 0 };
    (x, row as f32 * ROW_HEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snaps_to_nearest_row() {
        assert_eq!(snap_top(0.0), 0.0);
        assert_eq!(snap_top(17.0), 0.0);
        assert_eq!(snap_top(18.0), 35.0);
        assert_eq!(snap_top(52.0), 35.0);
        assert_eq!(snap_top(53.0), 70.0);
    }

    #[test]
    fn negative_and_nan_clamp_to_first_row() {
        assert_eq!(snap_top(-100.0), 0.0);
        assert_eq!(snap_top(-0.1), 0.0);
        assert_eq!(snap_top(f32::NAN), 0.0);
    }

    #[test]
    fn row_count_floors() {
        assert_eq!(row_count(0.0), 0);
        assert_eq!(row_count(34.9), 0);
        assert_eq!(row_count(35.0), 1);
        assert_eq!(row_count(350.0), 10);
        assert_eq!(row_count(f32::NAN), 0);
    }

    #[test]
    fn centers_tile_under_pointer() {
        let pos = centered_in_canvas((150.0, 120.0), (100.0, 50.0), Size::new(40.0, 20.0));
        assert_eq!(pos, (30.0, 60.0));
    }
}
