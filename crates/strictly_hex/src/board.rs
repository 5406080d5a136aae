//! Board state: cell ownership and hexagonal adjacency.

use super::types::{CellId, Player};
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

/// Smallest supported board edge length.
///
/// On a 1x1 board the lone cell lies on all four edges, so both players'
/// terminals would start out connected.
pub const MIN_BOARD_SIZE: usize = 2;

/// Largest supported board edge length.
pub const MAX_BOARD_SIZE: usize = 32;

/// Row/column offsets of the six hexagonal neighbours.
///
/// In id terms: `-1`, `+1`, `-N`, `+N`, `-N+1`, `+N-1`.
const NEIGHBOR_OFFSETS: [(isize, isize); 6] = [
    (0, -1),
    (0, 1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (1, -1),
];

/// Errors raised by board operations.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardError {
    /// Cell id outside `1..=N²`.
    #[display("Cell {cell} is not between 1 and {cell_count}")]
    OutOfRange {
        /// Offending id.
        cell: CellId,
        /// Number of cells on the board.
        cell_count: usize,
    },

    /// Cell already has an owner.
    #[display("Cell {cell} is already owned by player {owner}")]
    Occupied {
        /// Offending id.
        cell: CellId,
        /// Current owner.
        owner: Player,
    },

    /// Board size outside `MIN_BOARD_SIZE..=MAX_BOARD_SIZE`.
    #[display("Board size {size} is not between {} and {}", MIN_BOARD_SIZE, MAX_BOARD_SIZE)]
    InvalidSize {
        /// Requested size.
        size: usize,
    },
}

impl std::error::Error for BoardError {}

/// `N x N` Hex board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Edge length `N`.
    size: usize,
    /// Owners in row-major order; index `id - 1`.
    cells: Vec<Option<Player>>,
}

impl Board {
    /// Creates an empty board with edge length `size`.
    #[instrument]
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(BoardError::InvalidSize { size });
        }
        Ok(Self {
            size,
            cells: vec![None; size * size],
        })
    }

    /// Edge length `N`.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells, `N²`.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Validates `cell` and returns its zero-based index.
    pub fn check(&self, cell: CellId) -> Result<usize, BoardError> {
        let id = cell.get();
        if id < 1 || id > self.cells.len() {
            return Err(BoardError::OutOfRange {
                cell,
                cell_count: self.cells.len(),
            });
        }
        Ok(id - 1)
    }

    /// Returns true if the cell has an owner.
    pub fn is_occupied(&self, cell: CellId) -> Result<bool, BoardError> {
        Ok(self.owner(cell)?.is_some())
    }

    /// Returns the owner of the cell, if any.
    pub fn owner(&self, cell: CellId) -> Result<Option<Player>, BoardError> {
        let index = self.check(cell)?;
        Ok(self.cells[index])
    }

    /// Claims an unowned cell for `player`.
    ///
    /// Owned cells are never overwritten; the board is unchanged on error.
    #[instrument(skip(self), fields(size = self.size))]
    pub fn set_owner(&mut self, cell: CellId, player: Player) -> Result<(), BoardError> {
        let index = self.check(cell)?;
        if let Some(owner) = self.cells[index] {
            return Err(BoardError::Occupied { cell, owner });
        }
        self.cells[index] = Some(player);
        trace!("Cell claimed");
        Ok(())
    }

    /// Clears every cell.
    ///
    /// The paired [`Connectivity`](crate::Connectivity) must be reset in the
    /// same operation; [`GameState::reset`](crate::GameState::reset) does both.
    #[instrument(skip(self), fields(size = self.size))]
    pub fn reset(&mut self) {
        self.cells.fill(None);
    }

    /// Zero-based `(row, col)` of a cell.
    pub fn coords(&self, cell: CellId) -> Result<(usize, usize), BoardError> {
        let index = self.check(cell)?;
        Ok((index / self.size, index % self.size))
    }

    /// Cell at zero-based `(row, col)`, if on the board.
    pub fn cell_at(&self, row: usize, col: usize) -> Option<CellId> {
        (row < self.size && col < self.size).then(|| CellId::new(row * self.size + col + 1))
    }

    /// The up-to-six hexagonal neighbours of a cell.
    ///
    /// Interior cells have six, non-corner edge cells four, the obtuse
    /// corners (`N`, `N²-N+1`) three and the acute corners (`1`, `N²`) two.
    pub fn neighbors(&self, cell: CellId) -> Result<Vec<CellId>, BoardError> {
        let (row, col) = self.coords(cell)?;
        Ok(NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(dr, dc)| {
                let r = row.checked_add_signed(dr)?;
                let c = col.checked_add_signed(dc)?;
                self.cell_at(r, c)
            })
            .collect())
    }

    /// All cells with their owners, in id order.
    pub fn cells(&self) -> impl Iterator<Item = (CellId, Option<Player>)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, owner)| (CellId::new(index + 1), *owner))
    }

    /// Unowned cells in id order.
    pub fn empty_cells(&self) -> Vec<CellId> {
        self.cells()
            .filter(|(_, owner)| owner.is_none())
            .map(|(cell, _)| cell)
            .collect()
    }

    /// Number of owned cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|owner| owner.is_some()).count()
    }

    /// Returns true if no cell is owned.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Conventional opening cell: the centre of the rhombus.
    pub fn center_cell(&self) -> CellId {
        let count = self.cells.len();
        if count % 2 == 1 {
            CellId::new(count / 2 + 1)
        } else {
            CellId::new(count / 2 + self.size / 2)
        }
    }

    /// Formats the board as a skewed ASCII rhombus.
    ///
    /// Empty cells show `.`, owned cells show the player letter.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..self.size {
            result.push_str(&" ".repeat(row));
            for col in 0..self.size {
                let symbol = match self.cells[row * self.size + col] {
                    None => '.',
                    Some(Player::A) => 'A',
                    Some(Player::B) => 'B',
                };
                result.push(symbol);
                if col + 1 < self.size {
                    result.push(' ');
                }
            }
            if row + 1 < self.size {
                result.push('\n');
            }
        }
        result
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(cells: &[CellId]) -> Vec<usize> {
        let mut ids: Vec<usize> = cells.iter().map(|c| c.get()).collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn test_invalid_sizes_rejected() {
        assert_eq!(Board::new(0), Err(BoardError::InvalidSize { size: 0 }));
        assert_eq!(Board::new(1), Err(BoardError::InvalidSize { size: 1 }));
        assert!(Board::new(MAX_BOARD_SIZE + 1).is_err());
        assert!(Board::new(MAX_BOARD_SIZE).is_ok());
    }

    #[test]
    fn test_out_of_range_fails_fast() {
        let board = Board::new(3).unwrap();
        for id in [0, 10, 100] {
            let err = board.owner(CellId::new(id)).unwrap_err();
            assert_eq!(
                err,
                BoardError::OutOfRange {
                    cell: CellId::new(id),
                    cell_count: 9
                }
            );
        }
        assert!(board.is_occupied(CellId::new(9)).is_ok());
    }

    #[test]
    fn test_owner_never_overwritten() {
        let mut board = Board::new(3).unwrap();
        board.set_owner(CellId::new(5), Player::A).unwrap();
        let err = board.set_owner(CellId::new(5), Player::B).unwrap_err();
        assert_eq!(
            err,
            BoardError::Occupied {
                cell: CellId::new(5),
                owner: Player::A
            }
        );
        assert_eq!(board.owner(CellId::new(5)), Ok(Some(Player::A)));
    }

    #[test]
    fn test_reset_clears_all_cells() {
        let mut board = Board::new(3).unwrap();
        board.set_owner(CellId::new(1), Player::A).unwrap();
        board.set_owner(CellId::new(9), Player::B).unwrap();
        board.reset();
        assert!(board.is_empty());
        assert_eq!(board.empty_cells().len(), 9);
    }

    #[test]
    fn test_interior_has_six_neighbors() {
        let board = Board::new(3).unwrap();
        assert_eq!(ids(&board.neighbors(CellId::new(5)).unwrap()), vec![2, 3, 4, 6, 7, 8]);
    }

    #[test]
    fn test_corner_neighbors() {
        let board = Board::new(3).unwrap();
        // Acute corners.
        assert_eq!(ids(&board.neighbors(CellId::new(1)).unwrap()), vec![2, 4]);
        assert_eq!(ids(&board.neighbors(CellId::new(9)).unwrap()), vec![6, 8]);
        // Obtuse corners.
        assert_eq!(ids(&board.neighbors(CellId::new(3)).unwrap()), vec![2, 5, 6]);
        assert_eq!(ids(&board.neighbors(CellId::new(7)).unwrap()), vec![4, 5, 8]);
    }

    #[test]
    fn test_edge_cells_have_four_neighbors() {
        let board = Board::new(4).unwrap();
        // top, bottom, left, right
        assert_eq!(ids(&board.neighbors(CellId::new(2)).unwrap()), vec![1, 3, 5, 6]);
        assert_eq!(ids(&board.neighbors(CellId::new(15)).unwrap()), vec![11, 12, 14, 16]);
        assert_eq!(ids(&board.neighbors(CellId::new(5)).unwrap()), vec![1, 2, 6, 9]);
        assert_eq!(ids(&board.neighbors(CellId::new(8)).unwrap()), vec![4, 7, 11, 12]);
    }

    #[test]
    fn test_neighbors_never_wrap_rows() {
        let board = Board::new(5).unwrap();
        for (cell, _) in board.cells() {
            let (row, col) = board.coords(cell).unwrap();
            for neighbor in board.neighbors(cell).unwrap() {
                let (r, c) = board.coords(neighbor).unwrap();
                assert!(r.abs_diff(row) <= 1 && c.abs_diff(col) <= 1, "{cell} -> {neighbor}");
                // Adjacency is symmetric.
                assert!(board.neighbors(neighbor).unwrap().contains(&cell));
            }
        }
    }

    #[test]
    fn test_smallest_board_is_fully_connected() {
        let board = Board::new(2).unwrap();
        assert_eq!(ids(&board.neighbors(CellId::new(1)).unwrap()), vec![2, 3]);
        assert_eq!(ids(&board.neighbors(CellId::new(2)).unwrap()), vec![1, 3, 4]);
    }

    #[test]
    fn test_center_cell() {
        assert_eq!(Board::new(3).unwrap().center_cell(), CellId::new(5));
        assert_eq!(Board::new(11).unwrap().center_cell(), CellId::new(61));
        assert_eq!(Board::new(4).unwrap().center_cell(), CellId::new(10));
    }

    #[test]
    fn test_display() {
        let mut board = Board::new(2).unwrap();
        board.set_owner(CellId::new(1), Player::A).unwrap();
        board.set_owner(CellId::new(4), Player::B).unwrap();
        assert_eq!(board.display(), "A .\n . B");
    }
}
