use std::{
    fmt,
    ops::{Index, IndexMut},
};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::{cover::Line, error::Error, grid::Grid};

/// A square matrix of integer costs.
///
/// Entry `(r, c)` is the cost of assigning agent `r` to task `c`. The dimension
/// is fixed at construction and is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquareMatrix {
    values: Grid<i64>,
}

impl SquareMatrix {
    /// Create an `n x n` matrix filled with zeros.
    pub fn new(n: usize) -> Result<Self, Error> {
        if n == 0 {
            return Err(Error::EmptyMatrix);
        }
        Ok(Self {
            values: Grid::new(n),
        })
    }

    /// Build a matrix from its rows.
    ///
    /// Every row must have exactly as many entries as there are rows.
    pub fn from_rows<Rows, Row>(rows: Rows) -> Result<Self, Error>
    where
        Rows: IntoIterator<Item = Row>,
        Row: AsRef<[i64]>,
    {
        let rows: Vec<Row> = rows.into_iter().collect();
        let n = rows.len();
        if n == 0 {
            return Err(Error::EmptyMatrix);
        }

        let mut cells = Vec::with_capacity(n * n);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != n {
                return Err(Error::NonSquareInput {
                    row,
                    len: values.len(),
                    n,
                });
            }
            cells.extend_from_slice(values);
        }

        Ok(Self {
            values: Grid::from_cells(n, cells),
        })
    }

    /// Create an `n x n` matrix of values drawn uniformly from `low..=high`.
    ///
    /// See [`fill_uniform_random`][Self::fill_uniform_random].
    pub fn random(n: usize, low: i64, high: i64, seed: u64) -> Result<Self, Error> {
        let mut matrix = Self::new(n)?;
        matrix.fill_uniform_random(low, high, seed)?;
        Ok(matrix)
    }

    /// The number of rows (and columns) of this matrix.
    pub fn n(&self) -> usize {
        self.values.n()
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<(), Error> {
        let n = self.n();
        if row < n && col < n {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange { row, col, n })
        }
    }

    fn check_line(&self, line: Line) -> Result<(), Error> {
        let n = self.n();
        if line.index() < n {
            Ok(())
        } else {
            Err(Error::LineOutOfRange { line, n })
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Result<i64, Error> {
        self.check_bounds(row, col)?;
        Ok(self.values[(row, col)])
    }

    pub fn set(&mut self, row: usize, col: usize, value: i64) -> Result<(), Error> {
        self.check_bounds(row, col)?;
        self.values[(row, col)] = value;
        Ok(())
    }

    /// The smallest value in the given row.
    pub fn min_of_row(&self, row: usize) -> Result<i64, Error> {
        self.check_line(Line::Row(row))?;
        Ok(self.line_values(Line::Row(row)).min().unwrap_or_default())
    }

    /// The smallest value in the given column.
    pub fn min_of_col(&self, col: usize) -> Result<i64, Error> {
        self.check_line(Line::Column(col))?;
        Ok(self.line_values(Line::Column(col)).min().unwrap_or_default())
    }

    /// Iterate over the values along a line. Yields nothing if the line is out of range.
    pub(crate) fn line_values(&self, line: Line) -> Box<dyn Iterator<Item = i64> + '_> {
        match line {
            Line::Row(row) => {
                let values = self.values.row(row).unwrap_or_default();
                Box::new(values.iter().copied())
            }
            Line::Column(col) => Box::new(self.values.column(col).copied()),
        }
    }

    /// Iterate over the rows of this matrix, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[i64]> {
        self.values.rows()
    }

    /// Iterate over every value along with its `(row, col)` position.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), i64)> + '_ {
        self.values.iter().map(|(pos, &value)| (pos, value))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = ((usize, usize), &mut i64)> {
        self.values.iter_mut()
    }

    /// The column indices of each zero in the given row.
    pub fn zeros_in_row(&self, row: usize) -> impl Iterator<Item = usize> + '_ {
        self.values
            .row(row)
            .unwrap_or_default()
            .iter()
            .enumerate()
            .filter_map(|(col, &value)| (value == 0).then_some(col))
    }

    /// Count the zeros along a line.
    pub fn count_zeros(&self, line: Line) -> usize {
        self.line_values(line).filter(|&value| value == 0).count()
    }

    /// Overwrite every value with one drawn uniformly from `low..=high`.
    ///
    /// The values depend only on `seed`, so the same seed always produces the same matrix.
    pub fn fill_uniform_random(&mut self, low: i64, high: i64, seed: u64) -> Result<(), Error> {
        if low > high {
            return Err(Error::InvalidRange { low, high });
        }
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        for (_, value) in self.values.iter_mut() {
            *value = rng.random_range(low..=high);
        }
        Ok(())
    }
}

impl Index<(usize, usize)> for SquareMatrix {
    type Output = i64;

    fn index(&self, point: (usize, usize)) -> &Self::Output {
        &self.values[point]
    }
}

impl IndexMut<(usize, usize)> for SquareMatrix {
    fn index_mut(&mut self, point: (usize, usize)) -> &mut Self::Output {
        &mut self.values[point]
    }
}

impl fmt::Display for SquareMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, values) in self.rows().enumerate() {
            write!(f, "Machine {row} [")?;
            for value in values {
                write!(f, "\t{value}\t")?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample() -> SquareMatrix {
        SquareMatrix::from_rows([[4, 1, 3], [2, 0, 5], [3, 2, 2]]).unwrap()
    }

    #[test]
    fn new_is_zeroed() {
        let matrix = SquareMatrix::new(3).unwrap();
        assert_eq!(matrix.n(), 3);
        assert!(matrix.iter().all(|(_, value)| value == 0));
    }

    #[test]
    fn empty_is_rejected() {
        assert_eq!(SquareMatrix::new(0), Err(Error::EmptyMatrix));
        assert_eq!(
            SquareMatrix::from_rows(Vec::<Vec<i64>>::new()),
            Err(Error::EmptyMatrix)
        );
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let result = SquareMatrix::from_rows(vec![vec![1, 2], vec![3]]);
        assert_eq!(
            result,
            Err(Error::NonSquareInput {
                row: 1,
                len: 1,
                n: 2
            })
        );
    }

    #[test]
    fn wide_rows_are_rejected() {
        let result = SquareMatrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]);
        assert!(matches!(result, Err(Error::NonSquareInput { row: 0, .. })));
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 0)]
    #[case(2, 2)]
    fn row_minima(#[case] row: usize, #[case] expected: i64) {
        assert_eq!(sample().min_of_row(row), Ok(expected));
    }

    #[rstest]
    #[case(0, 2)]
    #[case(1, 0)]
    #[case(2, 2)]
    fn col_minima(#[case] col: usize, #[case] expected: i64) {
        assert_eq!(sample().min_of_col(col), Ok(expected));
    }

    #[test]
    fn minima_out_of_range() {
        let matrix = sample();
        assert_eq!(
            matrix.min_of_row(3),
            Err(Error::LineOutOfRange {
                line: Line::Row(3),
                n: 3
            })
        );
        assert_eq!(
            matrix.min_of_col(7),
            Err(Error::LineOutOfRange {
                line: Line::Column(7),
                n: 3
            })
        );
    }

    #[test]
    fn get_and_set_are_bounds_checked() {
        let mut matrix = sample();
        assert_eq!(matrix.get(2, 0), Ok(3));
        matrix.set(2, 0, 11).unwrap();
        assert_eq!(matrix.get(2, 0), Ok(11));
        assert_eq!(
            matrix.get(0, 3),
            Err(Error::IndexOutOfRange { row: 0, col: 3, n: 3 })
        );
        assert_eq!(
            matrix.set(3, 0, 1),
            Err(Error::IndexOutOfRange { row: 3, col: 0, n: 3 })
        );
    }

    #[test]
    fn clones_are_independent() {
        let original = sample();
        let mut working = original.clone();
        working[(0, 0)] = 0;
        assert_eq!(original[(0, 0)], 4);
        assert_ne!(original, working);
    }

    #[test]
    fn zeros_are_found() {
        let matrix = SquareMatrix::from_rows([[0, 1, 0], [2, 0, 5], [0, 0, 0]]).unwrap();
        assert_eq!(matrix.zeros_in_row(0).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(matrix.count_zeros(Line::Row(2)), 3);
        assert_eq!(matrix.count_zeros(Line::Column(1)), 2);
    }

    #[test]
    fn random_fill_is_deterministic() {
        let a = SquareMatrix::random(5, 1, 10, 17).unwrap();
        let b = SquareMatrix::random(5, 1, 10, 17).unwrap();
        let c = SquareMatrix::random(5, 1, 10, 18).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.iter().all(|(_, value)| (1..=10).contains(&value)));
    }

    #[test]
    fn random_fill_rejects_inverted_range() {
        let mut matrix = SquareMatrix::new(2).unwrap();
        assert_eq!(
            matrix.fill_uniform_random(5, 1, 0),
            Err(Error::InvalidRange { low: 5, high: 1 })
        );
    }

    #[test]
    fn display_lists_machines() {
        let matrix = SquareMatrix::from_rows([[1, 2], [3, 4]]).unwrap();
        assert_eq!(
            matrix.to_string(),
            "Machine 0 [\t1\t\t2\t]\nMachine 1 [\t3\t\t4\t]\n"
        );
    }
}
