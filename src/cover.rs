use crate::{error::Error, matching::ZeroMatching, matrix::SquareMatrix};

/// A single horizontal or vertical line through the matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Line {
    Row(usize),
    Column(usize),
}

impl Line {
    /// The row or column index of this line.
    pub fn index(self) -> usize {
        match self {
            Line::Row(idx) | Line::Column(idx) => idx,
        }
    }
}

/// How the zeros of a reduced matrix are covered by lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CoverStrategy {
    /// A minimum cover derived from a maximum matching of the zeros.
    #[default]
    Exact,
    /// Cover whichever of a zero's row or column holds more zeros.
    ///
    /// This always covers every zero but may use more lines than necessary,
    /// in which case the solve is not guaranteed to terminate.
    Greedy,
}

/// The rows and columns currently covered by a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverSet {
    rows: Vec<bool>,
    cols: Vec<bool>,
}

impl CoverSet {
    /// An empty cover for an `n x n` matrix.
    pub fn new(n: usize) -> Self {
        Self {
            rows: vec![false; n],
            cols: vec![false; n],
        }
    }

    /// Cover the given line. Lines outside the matrix are ignored.
    pub fn cover(&mut self, line: Line) {
        let slot = match line {
            Line::Row(row) => self.rows.get_mut(row),
            Line::Column(col) => self.cols.get_mut(col),
        };
        if let Some(slot) = slot {
            *slot = true;
        }
    }

    pub fn is_covered(&self, line: Line) -> bool {
        match line {
            Line::Row(row) => self.rows.get(row).copied().unwrap_or_default(),
            Line::Column(col) => self.cols.get(col).copied().unwrap_or_default(),
        }
    }

    /// How many lines pass through the cell: 0, 1 or 2.
    pub fn coverage(&self, row: usize, col: usize) -> u8 {
        u8::from(self.is_covered(Line::Row(row)))
            + u8::from(self.is_covered(Line::Column(col)))
    }

    /// Iterate over the covered lines, rows first.
    pub fn lines(&self) -> impl Iterator<Item = Line> + '_ {
        let rows = self
            .rows
            .iter()
            .enumerate()
            .filter_map(|(row, &covered)| covered.then_some(Line::Row(row)));
        let cols = self
            .cols
            .iter()
            .enumerate()
            .filter_map(|(col, &covered)| covered.then_some(Line::Column(col)));
        rows.chain(cols)
    }

    /// The number of covered rows plus covered columns.
    pub fn len(&self) -> usize {
        self.lines().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn row_covered(&self) -> &[bool] {
        &self.rows
    }

    pub fn col_covered(&self) -> &[bool] {
        &self.cols
    }

    /// `true` when every zero of `matrix` lies on at least one covered line.
    pub fn covers_all_zeros(&self, matrix: &SquareMatrix) -> bool {
        matrix
            .iter()
            .all(|((row, col), value)| value != 0 || self.coverage(row, col) > 0)
    }
}

/// `true` when the cover uses at least `n` lines, so an assignment among the zeros exists.
pub fn is_assignable(cover: &CoverSet) -> bool {
    cover.len() >= cover.rows.len()
}

/// Cover every zero of `matrix` with lines, using the given strategy.
pub fn cover_zeros(matrix: &SquareMatrix, strategy: CoverStrategy) -> CoverSet {
    let cover = match strategy {
        CoverStrategy::Exact => minimum_cover(matrix),
        CoverStrategy::Greedy => greedy_cover(matrix),
    };
    debug_assert!(cover.covers_all_zeros(matrix), "every zero must be covered");
    cover
}

/// König's construction: starting from every unmatched row, follow alternating
/// paths (zero edges into columns, matched edges back into rows). The unreached
/// rows together with the reached columns form a minimum cover.
fn minimum_cover(matrix: &SquareMatrix) -> CoverSet {
    let n = matrix.n();
    let matching = ZeroMatching::maximum(matrix);

    let mut reached_rows = vec![false; n];
    let mut reached_cols = vec![false; n];
    let mut stack: Vec<usize> = matching.unmatched_rows().collect();

    while let Some(row) = stack.pop() {
        if reached_rows[row] {
            continue;
        }
        reached_rows[row] = true;
        for col in matrix.zeros_in_row(row) {
            if reached_cols[col] {
                continue;
            }
            reached_cols[col] = true;
            // a maximum matching leaves no free column reachable here
            if let Some(next_row) = matching.row_for_col(col) {
                stack.push(next_row);
            }
        }
    }

    let mut cover = CoverSet::new(n);
    for row in (0..n).filter(|&row| !reached_rows[row]) {
        cover.cover(Line::Row(row));
    }
    for col in (0..n).filter(|&col| reached_cols[col]) {
        cover.cover(Line::Column(col));
    }
    debug_assert_eq!(cover.len(), matching.size());
    cover
}

fn greedy_cover(matrix: &SquareMatrix) -> CoverSet {
    let n = matrix.n();
    let mut cover = CoverSet::new(n);

    for row in 0..n {
        let zeros: Vec<usize> = matrix.zeros_in_row(row).collect();
        let row_zeros = zeros.len();

        // most recently found zero first
        for &col in zeros.iter().rev() {
            let col_zeros = matrix.count_zeros(Line::Column(col));
            if col_zeros > row_zeros {
                if !cover.is_covered(Line::Row(row)) {
                    cover.cover(Line::Column(col));
                }
            } else if !cover.is_covered(Line::Column(col)) {
                cover.cover(Line::Row(row));
            }
        }
    }

    cover
}

/// Expose new zeros when the cover is insufficient.
///
/// Subtracts the smallest uncovered value `k` from every uncovered cell and adds
/// it to every cell covered twice. Returns `k`.
pub fn create_zeros(matrix: &mut SquareMatrix, cover: &CoverSet) -> Result<i64, Error> {
    let k = matrix
        .iter()
        .filter(|&((row, col), _)| cover.coverage(row, col) == 0)
        .map(|(_, value)| value)
        .min()
        .ok_or(Error::NoUncoveredCells)?;

    for ((row, col), value) in matrix.iter_mut() {
        *value = match cover.coverage(row, col) {
            0 => value.checked_sub(k),
            2 => value.checked_add(k),
            _ => Some(*value),
        }
        .ok_or(Error::Overflow)?;
    }

    Ok(k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn matrix<const N: usize>(rows: [[i64; N]; N]) -> SquareMatrix {
        SquareMatrix::from_rows(rows).unwrap()
    }

    #[test]
    fn cover_set_bookkeeping() {
        let mut cover = CoverSet::new(3);
        assert!(cover.is_empty());
        cover.cover(Line::Row(1));
        cover.cover(Line::Column(2));
        cover.cover(Line::Column(9));
        assert_eq!(cover.len(), 2);
        assert_eq!(
            cover.lines().collect::<Vec<_>>(),
            vec![Line::Row(1), Line::Column(2)]
        );
        assert_eq!(cover.coverage(1, 2), 2);
        assert_eq!(cover.coverage(1, 0), 1);
        assert_eq!(cover.coverage(0, 2), 1);
        assert_eq!(cover.coverage(0, 0), 0);
        assert!(!cover.is_covered(Line::Row(7)));
    }

    #[rstest]
    #[case::exact(CoverStrategy::Exact)]
    #[case::greedy(CoverStrategy::Greedy)]
    fn identity_needs_every_line(#[case] strategy: CoverStrategy) {
        let m = matrix([[0, 9, 9], [9, 0, 9], [9, 9, 0]]);
        let cover = cover_zeros(&m, strategy);
        assert!(cover.covers_all_zeros(&m));
        assert_eq!(cover.len(), 3);
        assert!(is_assignable(&cover));
    }

    #[test]
    fn exact_cover_is_minimum() {
        // zeros fit in column 0 plus row 2
        let m = matrix([[0, 3, 3], [0, 3, 3], [0, 0, 0]]);
        let cover = cover_zeros(&m, CoverStrategy::Exact);
        assert!(cover.covers_all_zeros(&m));
        assert_eq!(cover.len(), 2);
        assert!(cover.is_covered(Line::Column(0)));
        assert!(cover.is_covered(Line::Row(2)));
        assert!(!is_assignable(&cover));
    }

    #[test]
    fn greedy_covers_a_dense_row() {
        let m = matrix([[0, 0, 0], [1, 2, 3], [4, 5, 6]]);
        let cover = cover_zeros(&m, CoverStrategy::Greedy);
        assert!(cover.covers_all_zeros(&m));
        assert_eq!(cover.lines().collect::<Vec<_>>(), vec![Line::Row(0)]);
    }

    #[test]
    fn greedy_prefers_denser_columns() {
        let m = matrix([[0, 4, 4], [0, 4, 4], [0, 4, 0]]);
        let cover = cover_zeros(&m, CoverStrategy::Greedy);
        assert!(cover.covers_all_zeros(&m));
        assert!(cover.is_covered(Line::Column(0)));
        assert!(!cover.is_covered(Line::Row(0)));
        assert!(!cover.is_covered(Line::Row(1)));
    }

    #[test]
    fn create_zeros_adjusts_by_minimum_uncovered() {
        let mut m = matrix([[0, 3, 3], [0, 3, 3], [0, 0, 0]]);
        let cover = cover_zeros(&m, CoverStrategy::Exact);
        let k = create_zeros(&mut m, &cover).unwrap();
        assert_eq!(k, 3);
        // (2, 0) is covered twice; the rest of row 2 and column 0 once
        assert_eq!(m, matrix([[0, 0, 0], [0, 0, 0], [3, 0, 0]]));
    }

    #[test]
    fn create_zeros_needs_an_uncovered_cell() {
        let mut m = matrix([[1, 2], [3, 4]]);
        let mut cover = CoverSet::new(2);
        cover.cover(Line::Row(0));
        cover.cover(Line::Row(1));
        assert_eq!(create_zeros(&mut m, &cover), Err(Error::NoUncoveredCells));
    }

    #[test]
    fn create_zeros_reports_overflow() {
        let mut m = matrix([[i64::MAX, 1], [1, 2]]);
        let mut cover = CoverSet::new(2);
        cover.cover(Line::Row(0));
        cover.cover(Line::Column(0));
        assert_eq!(create_zeros(&mut m, &cover), Err(Error::Overflow));
    }
}
