//! Maximum bipartite matching over the zeros of a matrix.
//!
//! Rows and columns form the two vertex sets; every zero cell `(r, c)` is an edge
//! between row `r` and column `c`.

use std::collections::VecDeque;

use crate::matrix::SquareMatrix;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZeroMatching {
    row_to_col: Vec<Option<usize>>,
    col_to_row: Vec<Option<usize>>,
}

impl ZeroMatching {
    fn empty(n: usize) -> Self {
        Self {
            row_to_col: vec![None; n],
            col_to_row: vec![None; n],
        }
    }

    /// Compute a maximum matching over the zeros of `matrix`.
    pub fn maximum(matrix: &SquareMatrix) -> Self {
        Self::seeded(matrix, std::iter::empty())
    }

    /// Compute a maximum matching over the zeros of `matrix`, starting from the
    /// given `(row, col)` pairs.
    ///
    /// Seed pairs which are not zero cells, or which conflict with an earlier
    /// seed pair, are ignored.
    pub fn seeded(matrix: &SquareMatrix, seed: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let n = matrix.n();
        let mut matching = Self::empty(n);

        for (row, col) in seed {
            if row < n
                && col < n
                && matrix[(row, col)] == 0
                && matching.row_to_col[row].is_none()
                && matching.col_to_row[col].is_none()
            {
                matching.pair(row, col);
            }
        }

        for row in 0..n {
            if matching.row_to_col[row].is_none() {
                matching.augment_from(matrix, row);
            }
        }

        matching
    }

    fn pair(&mut self, row: usize, col: usize) {
        self.row_to_col[row] = Some(col);
        self.col_to_row[col] = Some(row);
    }

    /// Breadth-first search for an augmenting path starting at a free row.
    ///
    /// Returns `true` and flips the path if one exists.
    fn augment_from(&mut self, matrix: &SquareMatrix, start: usize) -> bool {
        let n = matrix.n();
        // the row from which each column was first reached
        let mut parent = vec![None; n];
        let mut queue = VecDeque::from([start]);
        let mut free_col = None;

        'bfs: while let Some(row) = queue.pop_front() {
            for col in matrix.zeros_in_row(row) {
                if parent[col].is_some() {
                    continue;
                }
                parent[col] = Some(row);
                match self.col_to_row[col] {
                    Some(next_row) => queue.push_back(next_row),
                    None => {
                        free_col = Some(col);
                        break 'bfs;
                    }
                }
            }
        }

        let Some(mut col) = free_col else {
            return false;
        };

        // walk back along the path, shifting each row onto the column it reached
        while let Some(row) = parent[col] {
            let previous = self.row_to_col[row];
            self.pair(row, col);
            match previous {
                Some(previous) => col = previous,
                None => break,
            }
        }
        true
    }

    /// The number of matched pairs.
    pub fn size(&self) -> usize {
        self.row_to_col.iter().flatten().count()
    }

    /// `true` when every row is matched.
    pub fn is_perfect(&self) -> bool {
        self.row_to_col.iter().all(Option::is_some)
    }

    pub fn col_for_row(&self, row: usize) -> Option<usize> {
        self.row_to_col.get(row).copied().flatten()
    }

    pub fn row_for_col(&self, col: usize) -> Option<usize> {
        self.col_to_row.get(col).copied().flatten()
    }

    pub fn unmatched_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.row_to_col
            .iter()
            .enumerate()
            .filter_map(|(row, col)| col.is_none().then_some(row))
    }

    /// The matched column of each row, indexed by row.
    pub fn into_row_assignments(self) -> Vec<Option<usize>> {
        self.row_to_col
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix<const N: usize>(rows: [[i64; N]; N]) -> SquareMatrix {
        SquareMatrix::from_rows(rows).unwrap()
    }

    fn assert_consistent(matching: &ZeroMatching, matrix: &SquareMatrix) {
        for row in 0..matrix.n() {
            if let Some(col) = matching.col_for_row(row) {
                assert_eq!(matrix[(row, col)], 0, "matched cell must be a zero");
                assert_eq!(matching.row_for_col(col), Some(row));
            }
        }
    }

    #[test]
    fn identity_zeros_match_perfectly() {
        let m = matrix([[0, 9, 9], [9, 0, 9], [9, 9, 0]]);
        let matching = ZeroMatching::maximum(&m);
        assert!(matching.is_perfect());
        assert_eq!(
            matching.into_row_assignments(),
            vec![Some(0), Some(1), Some(2)]
        );
    }

    #[test]
    fn augmenting_path_reassigns_earlier_rows() {
        // row 0 greedily takes column 0, but row 1 can only use column 0
        let m = matrix([[0, 0, 5], [0, 5, 5], [5, 5, 0]]);
        let matching = ZeroMatching::maximum(&m);
        assert!(matching.is_perfect());
        assert_eq!(matching.col_for_row(0), Some(1));
        assert_eq!(matching.col_for_row(1), Some(0));
        assert_consistent(&matching, &m);
    }

    #[test]
    fn deficient_zero_pattern() {
        // rows 0 and 1 both only have a zero in column 0
        let m = matrix([[0, 3, 3], [0, 3, 3], [0, 0, 0]]);
        let matching = ZeroMatching::maximum(&m);
        assert_eq!(matching.size(), 2);
        assert!(!matching.is_perfect());
        assert_eq!(matching.unmatched_rows().count(), 1);
        assert_consistent(&matching, &m);
    }

    #[test]
    fn seeds_are_respected_and_filtered() {
        let m = matrix([[0, 0], [0, 0]]);
        let matching = ZeroMatching::seeded(&m, [(0, 1), (1, 1), (5, 0)]);
        assert!(matching.is_perfect());
        assert_eq!(matching.col_for_row(0), Some(1));
        assert_eq!(matching.col_for_row(1), Some(0));
    }

    #[test]
    fn seeds_on_nonzero_cells_are_ignored() {
        let m = matrix([[1, 0], [0, 1]]);
        let matching = ZeroMatching::seeded(&m, [(0, 0)]);
        assert!(matching.is_perfect());
        assert_eq!(matching.col_for_row(0), Some(1));
    }
}
