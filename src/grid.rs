use crate::{LifeError, Result};

/// Selects one of the two cell buffers owned by a [`Grid`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Buffer {
    /// The generation that is read while stepping.
    Current,
    /// The generation that is being written while stepping.
    Next,
}

/// Bounded field with a double buffer.
///
/// Each buffer is a row-major `(width + 2) x (height + 2)` array whose outer
/// ring is a border of dead cells, so every interior cell has 8 addressable
/// neighbors. Public accessors take logical coordinates `0..width` x `0..height`.
#[derive(Clone)]
pub struct Grid {
    cells_curr: Vec<bool>,
    cells_next: Vec<bool>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Creates a field filled with dead cells.
    pub fn blank(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(LifeError::InvalidDimensions { width, height });
        }
        let size = width
            .checked_add(2)
            .zip(height.checked_add(2))
            .and_then(|(w, h)| w.checked_mul(h))
            .ok_or(LifeError::Allocation { width, height })?;
        Ok(Self {
            cells_curr: alloc_buffer(size, width, height)?,
            cells_next: alloc_buffer(size, width, height)?,
            width,
            height,
        })
    }

    /// Creates a field with random cells.
    ///
    /// `seed` - random seed (if `None`, then random seed is generated)
    ///
    /// # Panics
    ///
    /// If `fill_rate` is outside of `[0, 1]`.
    pub fn random(width: usize, height: usize, seed: Option<u64>, fill_rate: f64) -> Result<Self> {
        use rand::{Rng, SeedableRng};

        let mut rng = if let Some(x) = seed {
            rand_chacha::ChaCha8Rng::seed_from_u64(x)
        } else {
            rand_chacha::ChaCha8Rng::from_entropy()
        };
        let mut result = Self::blank(width, height)?;
        for y in 0..height {
            for x in 0..width {
                result.set(x, y, rng.gen_bool(fill_rate));
            }
        }
        Ok(result)
    }

    /// `(width, height)` of the field, border excluded
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Row length of the padded buffers.
    pub(crate) fn stride(&self) -> usize {
        self.width + 2
    }

    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "({}, {}) is outside of the {}x{} world",
            x,
            y,
            self.width,
            self.height
        );
        x + 1 + (y + 1) * self.stride()
    }

    pub fn get_cell(&self, buffer: Buffer, x: usize, y: usize) -> bool {
        let idx = self.index(x, y);
        match buffer {
            Buffer::Current => self.cells_curr[idx],
            Buffer::Next => self.cells_next[idx],
        }
    }

    pub fn set_cell(&mut self, buffer: Buffer, x: usize, y: usize, alive: bool) {
        let idx = self.index(x, y);
        match buffer {
            Buffer::Current => self.cells_curr[idx] = alive,
            Buffer::Next => self.cells_next[idx] = alive,
        }
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.get_cell(Buffer::Current, x, y)
    }

    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        self.set_cell(Buffer::Current, x, y, alive);
    }

    /// Row-major snapshot of the current generation, border excluded.
    pub fn get_cells(&self) -> Vec<bool> {
        let stride = self.stride();
        self.cells_curr
            .chunks_exact(stride)
            .skip(1)
            .take(self.height)
            .flat_map(|row| row[1..=self.width].iter().copied())
            .collect()
    }

    /// Overwrites the current generation from a row-major vector of states.
    pub fn set_cells(&mut self, states: &[bool]) {
        assert_eq!(states.len(), self.width * self.height);
        let (w, stride) = (self.width, self.stride());
        for (y, row) in states.chunks_exact(w).enumerate() {
            let start = 1 + (y + 1) * stride;
            self.cells_curr[start..start + w].copy_from_slice(row);
        }
    }

    /// Number of alive cells in the current generation.
    pub fn population(&self) -> usize {
        self.cells_curr.iter().filter(|&&c| c).count()
    }

    /// Exchanges the roles of the two buffers without copying cells.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.cells_curr, &mut self.cells_next);
    }

    /// Frees both buffers at once.
    pub fn release(self) {
        drop(self);
    }

    /// Checks that the padding ring of both buffers holds only dead cells.
    pub fn border_is_dead(&self) -> bool {
        let (stride, rows) = (self.stride(), self.height + 2);
        [&self.cells_curr, &self.cells_next].iter().all(|cells| {
            cells.chunks_exact(stride).enumerate().all(|(y, row)| {
                if y == 0 || y == rows - 1 {
                    row.iter().all(|&c| !c)
                } else {
                    !row[0] && !row[stride - 1]
                }
            })
        })
    }

    pub(crate) fn current(&self) -> &[bool] {
        &self.cells_curr
    }

    /// Read access to the current buffer together with write access to the next one.
    pub(crate) fn split_buffers(&mut self) -> (&[bool], &mut [bool]) {
        (&self.cells_curr, &mut self.cells_next)
    }
}

fn alloc_buffer(size: usize, width: usize, height: usize) -> Result<Vec<bool>> {
    let mut cells = Vec::new();
    cells
        .try_reserve_exact(size)
        .map_err(|_| LifeError::Allocation { width, height })?;
    cells.resize(size, false);
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_is_dead() {
        let grid = Grid::blank(7, 5).unwrap();
        assert_eq!(grid.size(), (7, 5));
        assert_eq!(grid.population(), 0);
        assert_eq!(grid.current().len(), 9 * 7);
        assert!(grid.border_is_dead());
    }

    #[test]
    fn test_zero_dimensions() {
        assert!(matches!(
            Grid::blank(0, 3),
            Err(LifeError::InvalidDimensions { width: 0, height: 3 })
        ));
        assert!(matches!(
            Grid::blank(3, 0),
            Err(LifeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_size_overflow() {
        assert!(matches!(
            Grid::blank(usize::MAX - 2, 2),
            Err(LifeError::Allocation { .. })
        ));
    }

    #[test]
    fn test_buffers_are_independent() {
        let mut grid = Grid::blank(4, 4).unwrap();
        grid.set_cell(Buffer::Current, 1, 2, true);
        grid.set_cell(Buffer::Next, 3, 0, true);

        assert!(grid.get_cell(Buffer::Current, 1, 2));
        assert!(!grid.get_cell(Buffer::Next, 1, 2));
        assert!(grid.get_cell(Buffer::Next, 3, 0));
        assert!(!grid.get_cell(Buffer::Current, 3, 0));

        grid.swap();
        assert!(grid.get(3, 0));
        assert!(!grid.get(1, 2));
        assert!(grid.get_cell(Buffer::Next, 1, 2));
    }

    #[test]
    fn test_edge_cells_leave_border_untouched() {
        let mut grid = Grid::blank(3, 2).unwrap();
        for y in 0..2 {
            for x in 0..3 {
                grid.set(x, y, true);
            }
        }
        assert_eq!(grid.population(), 6);
        assert!(grid.border_is_dead());
    }

    #[test]
    fn test_get_set_cells() {
        let (w, h) = (5, 3);
        let mut grid = Grid::random(w, h, Some(42), 0.5).unwrap();
        let cells = grid.get_cells();
        assert_eq!(cells.len(), w * h);
        for y in 0..h {
            for x in 0..w {
                assert_eq!(cells[x + y * w], grid.get(x, y), "x={} y={}", x, y);
            }
        }

        let flipped = cells.iter().map(|c| !c).collect::<Vec<_>>();
        grid.set_cells(&flipped);
        assert_eq!(grid.get_cells(), flipped);
        assert!(grid.border_is_dead());
    }

    #[test]
    fn test_random_is_reproducible() {
        let a = Grid::random(16, 16, Some(7), 0.3).unwrap();
        let b = Grid::random(16, 16, Some(7), 0.3).unwrap();
        assert_eq!(a.get_cells(), b.get_cells());
    }

    #[test]
    #[should_panic]
    fn test_random_fill_rate_out_of_range() {
        let _ = Grid::random(4, 4, Some(1), 1.5);
    }

    #[test]
    #[should_panic(expected = "outside of the 2x2 world")]
    fn test_out_of_range_access() {
        let grid = Grid::blank(2, 2).unwrap();
        grid.get(2, 0);
    }
}
