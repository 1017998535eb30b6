//! Splitting an image in rectangular tiles.

/// A rectangle of pixels, `[x_start; x_end[ x [y_start; y_end[`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub x_start: u32,
    pub x_end: u32,
    pub y_start: u32,
    pub y_end: u32,
}

impl Tile {
    pub fn width(&self) -> u32 {
        self.x_end - self.x_start
    }
    pub fn height(&self) -> u32 {
        self.y_end - self.y_start
    }
    pub fn len(&self) -> usize {
        self.width() as usize * self.height() as usize
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pixel coordinates, row by row
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32)> {
        let Tile {
            x_start,
            x_end,
            y_start,
            y_end,
        } = *self;
        (y_start..y_end).flat_map(move |y| (x_start..x_end).map(move |x| (x, y)))
    }
}

/// Cuts a `width` x `height` image in tiles of at most `tile_size` x `tile_size` pixels.
///
/// Tiles are numbered row by row, starting from the top left corner. The last row and column
/// may be narrower.
#[derive(Debug, Clone, Copy)]
pub struct Tiler {
    pub width: u32,
    pub height: u32,
    pub tile_size: u32,
}

impl Tiler {
    /// Number of tiles along x and y
    pub fn tile_dimensions(&self) -> (u32, u32) {
        if self.tile_size == 0 {
            return (0, 0);
        }
        (
            self.width.div_ceil(self.tile_size),
            self.height.div_ceil(self.tile_size),
        )
    }

    pub fn tile_count(&self) -> usize {
        let (cols, rows) = self.tile_dimensions();
        cols as usize * rows as usize
    }

    pub fn tile(&self, idx: usize) -> Option<Tile> {
        if idx >= self.tile_count() {
            return None;
        }
        let (cols, _) = self.tile_dimensions();
        let x = (idx % cols as usize) as u32;
        let y = (idx / cols as usize) as u32;

        Some(Tile {
            x_start: x * self.tile_size,
            x_end: u32::min(self.width, (x + 1) * self.tile_size),
            y_start: y * self.tile_size,
            y_end: u32::min(self.height, (y + 1) * self.tile_size),
        })
    }

    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        (0..self.tile_count()).filter_map(|idx| self.tile(idx))
    }
}
