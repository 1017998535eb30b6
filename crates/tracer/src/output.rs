//! The 8 bit RGB buffer a frame renders into.

use crate::tile::Tile;

pub const BYTES_PER_PIXEL: usize = 3;

/// A `width` x `height` RGB image, 3 bytes per pixel, rows stored top to bottom
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl OutputImage {
    /// A black image
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * BYTES_PER_PIXEL],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Size of the buffer, in bytes
    pub fn size(&self) -> usize {
        self.data.len()
    }

    fn row_range(&self, y: u32) -> std::ops::Range<usize> {
        let stride = self.width as usize * BYTES_PER_PIXEL;
        let start = y as usize * stride;
        start..start + stride
    }

    /// Mutable access to row `y`. Panics if `y` is out of the image.
    pub fn row(&mut self, y: u32) -> &mut [u8] {
        let range = self.row_range(y);
        &mut self.data[range]
    }

    pub fn row_ref(&self, y: u32) -> &[u8] {
        &self.data[self.row_range(y)]
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let row: &[[u8; 3]] = bytemuck::cast_slice(self.row_ref(y));
        row[x as usize]
    }

    /// Copy the pixels of `tile`, given row by row, into the image
    pub fn write_tile(&mut self, tile: &Tile, pixels: &[[u8; 3]]) {
        debug_assert_eq!(pixels.len(), tile.len());
        let width = tile.width() as usize;
        if width == 0 {
            return;
        }
        for (y, src) in (tile.y_start..tile.y_end).zip(pixels.chunks_exact(width)) {
            let row: &mut [[u8; 3]] = bytemuck::cast_slice_mut(self.row(y));
            row[tile.x_start as usize..tile.x_end as usize].copy_from_slice(src);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::OutputImage;
    use crate::tile::Tile;

    #[test]
    fn layout() {
        let mut image = OutputImage::new(4, 3);
        assert_eq!(image.size(), 4 * 3 * 3);
        assert_eq!(image.row(1).len(), 12);

        image.row(2)[3..6].copy_from_slice(&[1, 2, 3]);
        assert_eq!(image.pixel(1, 2), [1, 2, 3]);
        assert_eq!(&image.data()[2 * 12 + 3..2 * 12 + 6], &[1, 2, 3]);
    }

    #[test]
    fn tiles_land_at_their_place() {
        let mut image = OutputImage::new(4, 4);
        let tile = Tile {
            x_start: 2,
            x_end: 4,
            y_start: 1,
            y_end: 3,
        };
        let pixels = [[10, 0, 0], [20, 0, 0], [30, 0, 0], [40, 0, 0]];
        image.write_tile(&tile, &pixels);

        assert_eq!(image.pixel(2, 1), [10, 0, 0]);
        assert_eq!(image.pixel(3, 1), [20, 0, 0]);
        assert_eq!(image.pixel(2, 2), [30, 0, 0]);
        assert_eq!(image.pixel(3, 2), [40, 0, 0]);
        assert_eq!(image.pixel(1, 1), [0, 0, 0]);
        assert_eq!(image.pixel(2, 3), [0, 0, 0]);
    }
}
