use std::fmt;

use crate::{error::Error, matrix::SquareMatrix};

/// The amounts subtracted from each row and column during the initial reduction.
///
/// Zero-creation passes are not recorded here, so the ledger reconstructs the
/// original costs only up to the first such pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReductionLedger {
    row_reduction: Vec<i64>,
    col_reduction: Vec<i64>,
}

impl ReductionLedger {
    pub fn new(n: usize) -> Self {
        Self {
            row_reduction: vec![0; n],
            col_reduction: vec![0; n],
        }
    }

    pub fn row_reduction(&self) -> &[i64] {
        &self.row_reduction
    }

    pub fn col_reduction(&self) -> &[i64] {
        &self.col_reduction
    }

    /// The sum of every row and column reduction.
    pub fn total(&self) -> Result<i64, Error> {
        self.row_reduction
            .iter()
            .chain(&self.col_reduction)
            .try_fold(0i64, |total, &reduction| total.checked_add(reduction))
            .ok_or(Error::Overflow)
    }

    /// Display `matrix` annotated with the reductions applied to each row and column.
    pub fn view<'a>(&'a self, matrix: &'a SquareMatrix) -> ReducedView<'a> {
        ReducedView {
            matrix,
            ledger: self,
        }
    }
}

/// Subtract the minimum of each row from every entry of that row.
pub fn subtract_row_minima(
    matrix: &mut SquareMatrix,
    ledger: &mut ReductionLedger,
) -> Result<(), Error> {
    for row in 0..matrix.n() {
        let smallest = matrix.min_of_row(row)?;
        ledger.row_reduction[row] = smallest;
        for col in 0..matrix.n() {
            let value = &mut matrix[(row, col)];
            *value = value.checked_sub(smallest).ok_or(Error::Overflow)?;
        }
    }
    Ok(())
}

/// Subtract the minimum of each column from every entry of that column.
pub fn subtract_col_minima(
    matrix: &mut SquareMatrix,
    ledger: &mut ReductionLedger,
) -> Result<(), Error> {
    for col in 0..matrix.n() {
        let smallest = matrix.min_of_col(col)?;
        ledger.col_reduction[col] = smallest;
        for row in 0..matrix.n() {
            let value = &mut matrix[(row, col)];
            *value = value.checked_sub(smallest).ok_or(Error::Overflow)?;
        }
    }
    Ok(())
}

/// A matrix shown alongside its [`ReductionLedger`].
pub struct ReducedView<'a> {
    matrix: &'a SquareMatrix,
    ledger: &'a ReductionLedger,
}

impl fmt::Display for ReducedView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\t\t[")?;
        for reduction in self.ledger.col_reduction() {
            write!(f, "\t{reduction}\t")?;
        }
        writeln!(f, "]")?;
        writeln!(f)?;

        let rows = self.matrix.rows().enumerate();
        for ((row, values), reduction) in rows.zip(self.ledger.row_reduction()) {
            write!(f, "Machine {row}: [{reduction}]\t[")?;
            for value in values {
                write!(f, "\t{value}\t")?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
