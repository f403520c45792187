//! Cloud-view grid packing.
//!
//! Places each asset into a fixed 10×10 cell grid, one cell per percentage
//! point. A heuristic, not an optimizer: near-square blocks first, then a
//! greedy row-major fill of whatever free cells remain. Oversubscribed
//! inputs (percentages summing past 100) are not validated against; the
//! overflow simply fails to place.

use crate::models::Asset;

/// Cells per grid side.
pub const GRID_SIZE: usize = 10;
/// Total cells in the grid.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// A packed 10×10 grid; each cell holds the index of the asset occupying it.
#[derive(Debug)]
pub struct GridLayout {
    cells: Vec<Option<usize>>,
}

/// A contiguous rectangular region of one asset, for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    /// Index into the packed asset slice.
    pub asset: usize,
    pub row: usize,
    pub col: usize,
    pub width: usize,
    pub height: usize,
}

impl GridLayout {
    /// Pack assets into the grid, largest percentage first to reduce
    /// fragmentation. Asset indices in the result refer to `assets`.
    pub fn pack(assets: &[Asset]) -> Self {
        let mut layout = GridLayout { cells: vec![None; CELL_COUNT] };

        let mut order: Vec<usize> = (0..assets.len()).collect();
        order.sort_by(|a, b| {
            assets[*b]
                .percentage
                .partial_cmp(&assets[*a].percentage)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        for index in order {
            let requested = cell_request(assets[index].percentage);
            layout.place(index, requested);
        }

        layout
    }

    /// Occupant of a cell.
    pub fn cell(&self, row: usize, col: usize) -> Option<usize> {
        self.cells[row * GRID_SIZE + col]
    }

    /// Number of cells an asset actually occupies (≤ its request).
    pub fn placed_cells(&self, asset: usize) -> usize {
        self.cells.iter().filter(|c| **c == Some(asset)).count()
    }

    /// Extract rectangular render blocks, row-major.
    ///
    /// A block starts at any cell whose upper and left neighbors belong to
    /// a different asset; its width runs along the start row and its height
    /// extends while any cell in the width span still belongs to the asset.
    pub fn blocks(&self) -> Vec<Block> {
        let mut blocks = Vec::new();
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let Some(asset) = self.cell(row, col) else {
                    continue;
                };
                if !self.is_block_start(row, col, asset) {
                    continue;
                }
                let (width, height) = self.block_dimensions(row, col, asset);
                blocks.push(Block { asset, row, col, width, height });
            }
        }
        blocks
    }

    fn is_block_start(&self, row: usize, col: usize, asset: usize) -> bool {
        let top_edge = row == 0 || self.cell(row - 1, col) != Some(asset);
        let left_edge = col == 0 || self.cell(row, col - 1) != Some(asset);
        top_edge && left_edge
    }

    fn block_dimensions(&self, row: usize, col: usize, asset: usize) -> (usize, usize) {
        let mut width = 0;
        for c in col..GRID_SIZE {
            if self.cell(row, c) == Some(asset) {
                width += 1;
            } else {
                break;
            }
        }

        let mut height = 0;
        for r in row..GRID_SIZE {
            let any_in_span = (col..col + width).any(|c| self.cell(r, c) == Some(asset));
            if any_in_span {
                height += 1;
            } else {
                break;
            }
        }

        (width, height)
    }

    fn place(&mut self, asset: usize, requested: usize) {
        if requested == 0 {
            return;
        }

        let (width, height) = best_fit_dimensions(requested);
        for row in 0..=GRID_SIZE.saturating_sub(height) {
            for col in 0..=GRID_SIZE.saturating_sub(width) {
                if self.is_free(row, col, width, height) {
                    self.fill(row, col, width, height, asset, requested);
                    return;
                }
            }
        }

        self.fallback_fill(asset, requested);
    }

    fn is_free(&self, row: usize, col: usize, width: usize, height: usize) -> bool {
        (row..row + height).all(|r| (col..col + width).all(|c| self.cell(r, c).is_none()))
    }

    fn fill(&mut self, row: usize, col: usize, width: usize, height: usize, asset: usize, max_cells: usize) {
        let mut filled = 0;
        for r in row..row + height {
            for c in col..col + width {
                if filled >= max_cells {
                    return;
                }
                self.cells[r * GRID_SIZE + c] = Some(asset);
                filled += 1;
            }
        }
    }

    /// Greedy row-major fill of remaining free cells.
    fn fallback_fill(&mut self, asset: usize, requested: usize) {
        let mut placed = 0;
        for cell in self.cells.iter_mut() {
            if placed >= requested {
                break;
            }
            if cell.is_none() {
                *cell = Some(asset);
                placed += 1;
            }
        }
    }
}

/// Cells an asset asks for: one per percentage point, rounded.
fn cell_request(percentage: f64) -> usize {
    let cells = (percentage / 100.0 * CELL_COUNT as f64).round();
    if cells <= 0.0 {
        0
    } else {
        cells as usize
    }
}

/// Near-square bounding box: width = ceil(sqrt(n)), height = ceil(n/width).
fn best_fit_dimensions(area: usize) -> (usize, usize) {
    let width = (area as f64).sqrt().ceil() as usize;
    let height = area.div_ceil(width);
    (width.min(GRID_SIZE), height.min(GRID_SIZE))
}
