use super::{Color, MeanColor};

/// Moore neighborhood offsets, (0, 0) excluded
#[rustfmt::skip]
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// Result of scanning a cell's Moore neighborhood
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Neighborhood {
    /// Number of living neighbors (0-8)
    pub count: u8,
    /// Mean color of the living neighbors, black when there are none
    pub mean: MeanColor,
}

/// Grid is a square N×N board of colored cells, stored row-major.
/// The size is fixed for the lifetime of the grid.
#[derive(Clone, PartialEq, Debug)]
pub struct Grid {
    size: usize,
    cells: Vec<Color>,
}

impl Grid {
    /// Create a new grid with all cells initially dead
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Color::DEAD; size * size],
        }
    }

    /// Side length N
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Convert (row, column) to the flat index, panicking when out of range
    fn index(&self, i: usize, j: usize) -> usize {
        assert!(
            i < self.size && j < self.size,
            "cell ({i}, {j}) is outside the {n}x{n} grid",
            n = self.size
        );
        i * self.size + j
    }

    /// Get cell at position (with bounds checking)
    pub fn get(&self, i: usize, j: usize) -> Option<Color> {
        (i < self.size && j < self.size).then(|| self.cells[i * self.size + j])
    }

    /// Set cell at position.
    ///
    /// # Panics
    /// If `i` or `j` is not below the grid size.
    pub fn set(&mut self, i: usize, j: usize, color: Color) {
        let idx = self.index(i, j);
        self.cells[idx] = color;
    }

    /// Neighbor position at the given offset, if it lies on the grid.
    /// The plane does not wrap at either edge.
    fn offset(&self, i: usize, j: usize, (di, dj): (isize, isize)) -> Option<(usize, usize)> {
        let ni = i.checked_add_signed(di).filter(|&n| n < self.size)?;
        let nj = j.checked_add_signed(dj).filter(|&n| n < self.size)?;
        Some((ni, nj))
    }

    /// Count living neighbors of (i, j) and average their colors.
    /// Off-grid neighbors are skipped, so edge cells see at most 5
    /// candidates and corner cells at most 3.
    pub fn living_neighbors(&self, i: usize, j: usize) -> Neighborhood {
        let alive = move || {
            NEIGHBOR_OFFSETS
                .iter()
                .filter_map(move |&d| self.offset(i, j, d))
                .map(move |(ni, nj)| self.cells[ni * self.size + nj])
                .filter(|c| c.is_alive())
        };

        Neighborhood {
            count: alive().count() as u8,
            mean: MeanColor::of(alive()),
        }
    }

    /// One row of cells
    pub fn row(&self, i: usize) -> &[Color] {
        let start = self.index(i, 0);
        &self.cells[start..start + self.size]
    }

    /// Rows as slices, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> + '_ {
        self.cells.chunks(self.size.max(1))
    }

    /// Raw row-major cells, used to write a whole generation at once
    pub(crate) fn cells_mut(&mut self) -> &mut [Color] {
        &mut self.cells
    }

    /// Number of living cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = Color::DEAD);
    }

    /// Iterate over all cells with their positions
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Color)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, &c)| (idx / self.size, idx % self.size, c))
    }
}
