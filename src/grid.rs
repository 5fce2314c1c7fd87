use std::ops::{Index, IndexMut};

/// A representation of a square 2d grid.
///
/// For indexing operations on this grid, `(0, 0)` is the top left corner,
/// and points are given as `(row, col)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    n: usize,
    cells: Vec<T>,
}

impl<T> Grid<T>
where
    T: Default + Clone,
{
    pub fn new(n: usize) -> Self {
        Grid {
            n,
            cells: vec![T::default(); n * n],
        }
    }
}

impl<T> Grid<T> {
    /// Build a grid from cells already laid out in row-major order.
    ///
    /// The caller must guarantee that `cells.len() == n * n`.
    pub(crate) fn from_cells(n: usize, cells: Vec<T>) -> Self {
        debug_assert_eq!(cells.len(), n * n, "cells must fill the grid exactly");
        Grid { n, cells }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// Get the internal index where the desired value is stored,
    /// or `None` if it is out of bounds.
    pub fn idx(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.n && col < self.n).then_some((row * self.n) + col)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.idx(row, col).map(|idx| &self.cells[idx])
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        self.idx(row, col).map(|idx| &mut self.cells[idx])
    }

    /// The cells of a single row, or `None` if it is out of bounds.
    pub fn row(&self, row: usize) -> Option<&[T]> {
        (row < self.n).then(|| &self.cells[row * self.n..(row + 1) * self.n])
    }

    /// Iterate over the rows of this grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // `chunks` panics on a zero chunk size
        self.cells.chunks(self.n.max(1))
    }

    /// Iterate over the cells of a single column, top to bottom.
    ///
    /// Yields nothing if the column is out of bounds.
    pub fn column(&self, col: usize) -> impl Iterator<Item = &T> {
        let n = self.n;
        let len = if col < n { self.cells.len() } else { 0 };
        self.cells[..len].iter().skip(col).step_by(n.max(1))
    }

    /// Iterate over every cell along with its `(row, col)` position.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &T)> {
        let n = self.n;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, value)| ((idx / n, idx % n), value))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = ((usize, usize), &mut T)> {
        let n = self.n;
        self.cells
            .iter_mut()
            .enumerate()
            .map(move |(idx, value)| ((idx / n, idx % n), value))
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        self.get(row, col).unwrap()
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        self.get_mut(row, col).unwrap()
    }
}
