use crate::{Grid, LifeError, Result};

/// B3/S23: a cell is alive in the next generation if it has exactly 3 alive
/// neighbors, or exactly 2 and is alive already.
pub fn next_state(neighbors: u8, alive: bool) -> bool {
    neighbors == 3 || (neighbors == 2 && alive)
}

/// Sum of the 8 cells around `idx`; `idx` must not lie on the border.
#[inline]
fn neighbors_at(cells: &[bool], idx: usize, stride: usize) -> u8 {
    cells[idx - stride - 1] as u8
        + cells[idx - stride] as u8
        + cells[idx - stride + 1] as u8
        + cells[idx - 1] as u8
        + cells[idx + 1] as u8
        + cells[idx + stride - 1] as u8
        + cells[idx + stride] as u8
        + cells[idx + stride + 1] as u8
}

/// Computes row `y` (border-inclusive) of the next generation into `dst`.
///
/// The first and the last cell of `dst` belong to the border and are not written.
fn update_row(curr: &[bool], dst: &mut [bool], y: usize, width: usize, stride: usize) {
    for x in 1..=width {
        let idx = x + y * stride;
        dst[x] = next_state(neighbors_at(curr, idx, stride), curr[idx]);
    }
}

impl Grid {
    /// Number of alive neighbors of a cell in the current generation.
    ///
    /// Coordinates are border-inclusive: `1 <= x <= width`, `1 <= y <= height`.
    /// Border cells do not have 8 neighbors, asking for them is an
    /// [`LifeError::InvariantViolation`].
    pub fn count_neighbors(&self, x: usize, y: usize) -> Result<u8> {
        let (w, h) = self.size();
        if x == 0 || y == 0 || x > w || y > h {
            return Err(LifeError::InvariantViolation { x, y });
        }
        let stride = self.stride();
        Ok(neighbors_at(self.current(), x + y * stride, stride))
    }

    /// State the cell at border-inclusive `(x, y)` will have in the next generation.
    pub fn next_state_of(&self, x: usize, y: usize) -> Result<bool> {
        let neighbors = self.count_neighbors(x, y)?;
        Ok(next_state(neighbors, self.get(x - 1, y - 1)))
    }

    /// Writes the whole next generation, then swaps the buffers.
    pub fn advance_generation(&mut self) {
        let ((w, h), stride) = (self.size(), self.stride());
        let (curr, next) = self.split_buffers();
        for y in 1..=h {
            update_row(curr, &mut next[y * stride..(y + 1) * stride], y, w, stride);
        }
        self.swap();
    }

    /// Same as [`Grid::advance_generation`], but the rows of the next generation
    /// are split into contiguous bands computed on up to `threads` scoped threads.
    ///
    /// Every worker reads the current buffer and owns a disjoint band of the next one.
    pub fn advance_generation_parallel(&mut self, threads: usize) {
        let ((w, h), stride) = (self.size(), self.stride());
        let threads = threads.clamp(1, h);
        if threads == 1 {
            self.advance_generation();
            return;
        }
        let rows_per_worker = h.div_ceil(threads);
        let (curr, next) = self.split_buffers();
        let interior = &mut next[stride..(h + 1) * stride];
        std::thread::scope(|s| {
            for (i, band) in interior.chunks_mut(rows_per_worker * stride).enumerate() {
                s.spawn(move || {
                    let y0 = 1 + i * rows_per_worker;
                    for (k, dst) in band.chunks_exact_mut(stride).enumerate() {
                        update_row(curr, dst, y0 + k, w, stride);
                    }
                });
            }
        });
        self.swap();
    }

    /// Advances the field by `generations` steps using `threads` workers per step.
    pub fn update(&mut self, generations: usize, threads: usize) {
        for i in 0..generations {
            if threads > 1 {
                self.advance_generation_parallel(threads);
            } else {
                self.advance_generation();
            }
            log::debug!("generation {}: population {}", i + 1, self.population());
        }
    }
}
