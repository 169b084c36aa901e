// Occupancy bitset keyed by `row * cols + col`

/// Tracks which grid cells already belong to a block
#[derive(Debug, Clone)]
pub struct Occupancy {
    cols: u32,
    rows: u32,
    words: Vec<u64>,
}

impl Occupancy {
    pub fn new(cols: u32, rows: u32) -> Self {
        let cells = cols as usize * rows as usize;
        Self {
            cols,
            rows,
            words: vec![0; cells.div_ceil(64)],
        }
    }

    fn index(&self, col: u32, row: u32) -> Option<usize> {
        if col < self.cols && row < self.rows {
            Some(row as usize * self.cols as usize + col as usize)
        } else {
            None
        }
    }

    /// Out-of-grid cells count as occupied
    pub fn is_set(&self, col: u32, row: u32) -> bool {
        match self.index(col, row) {
            Some(i) => self.words[i / 64] & (1 << (i % 64)) != 0,
            None => true,
        }
    }

    pub fn set(&mut self, col: u32, row: u32) {
        if let Some(i) = self.index(col, row) {
            self.words[i / 64] |= 1 << (i % 64);
        }
    }

    /// Mark every cell of a `w × h` block anchored at `(col, row)`
    pub fn mark_block(&mut self, col: u32, row: u32, w: u32, h: u32) {
        for r in row..row + h {
            for c in col..col + w {
                self.set(c, r);
            }
        }
    }

    pub fn count(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }
}
