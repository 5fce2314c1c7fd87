use log::{debug, trace};

use crate::{
    assign::{assign_tasks, Assignment},
    cover::{cover_zeros, create_zeros, is_assignable, CoverSet, CoverStrategy},
    error::Error,
    matrix::SquareMatrix,
    reduce::{subtract_col_minima, subtract_row_minima, ReductionLedger},
};

/// Parameters for a [`Solver`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SolverConfig {
    /// How zeros are covered on each pass.
    pub cover: CoverStrategy,
    /// The maximum number of zero-creation passes before the solve is abandoned.
    ///
    /// If `None`, there is no limit. The exact cover always terminates; a greedy
    /// cover should be given a limit.
    pub max_iterations: Option<usize>,
}

/// The steps of the Hungarian method.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    ReduceRows,
    ReduceCols,
    CoverZeros,
    CreateZeros,
    Assign,
    Complete,
}

/// The result of a successful solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// The task of each agent. Every agent has one, and no task is used twice.
    pub assignment: Assignment,
    /// The cost of the assignment against the original matrix.
    pub total_cost: i64,
    /// The reductions applied before any zero-creation pass.
    pub ledger: ReductionLedger,
    /// How many zero-creation passes were needed.
    pub iterations: usize,
}

impl Solution {
    /// The task of each agent, in agent order.
    pub fn tasks(&self) -> Vec<usize> {
        self.assignment.pairs().map(|(_, task)| task).collect()
    }
}

/// A finite-state machine running the Hungarian method over one cost matrix.
///
/// The original matrix is kept untouched; every step works on an independent copy.
#[derive(Debug, Clone)]
pub struct Solver {
    config: SolverConfig,
    state: State,
    original: SquareMatrix,
    working: SquareMatrix,
    ledger: ReductionLedger,
    cover: Option<CoverSet>,
    solution: Option<Solution>,
    iterations: usize,
}

impl Solver {
    /// Prepare to solve `costs` with the default configuration.
    ///
    /// Fails with `NegativeCost` if any cost is below zero.
    pub fn new(costs: SquareMatrix) -> Result<Self, Error> {
        Self::with_config(costs, SolverConfig::default())
    }

    pub fn with_config(costs: SquareMatrix, config: SolverConfig) -> Result<Self, Error> {
        if let Some(((row, col), value)) = costs.iter().find(|&(_, value)| value < 0) {
            return Err(Error::NegativeCost { row, col, value });
        }

        let n = costs.n();
        Ok(Self {
            config,
            state: State::ReduceRows,
            working: costs.clone(),
            original: costs,
            ledger: ReductionLedger::new(n),
            cover: None,
            solution: None,
            iterations: 0,
        })
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn original(&self) -> &SquareMatrix {
        &self.original
    }

    /// The matrix as transformed by every step so far.
    pub fn working(&self) -> &SquareMatrix {
        &self.working
    }

    pub fn ledger(&self) -> &ReductionLedger {
        &self.ledger
    }

    /// The cover computed by the most recent `CoverZeros` step.
    pub fn cover(&self) -> Option<&CoverSet> {
        self.cover.as_ref()
    }

    pub fn assignment(&self) -> Option<&Assignment> {
        self.solution.as_ref().map(|solution| &solution.assignment)
    }

    /// The result of the `Assign` step, once the solver is complete.
    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    /// The number of zero-creation passes run so far.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Run the current state and advance to the next one.
    ///
    /// Stepping a complete solver does nothing.
    pub fn step(&mut self) -> Result<State, Error> {
        let next = match self.state {
            State::ReduceRows => {
                subtract_row_minima(&mut self.working, &mut self.ledger)?;
                State::ReduceCols
            }
            State::ReduceCols => {
                subtract_col_minima(&mut self.working, &mut self.ledger)?;
                trace!("reduced:\n{}", self.ledger.view(&self.working));
                State::CoverZeros
            }
            State::CoverZeros => {
                let cover = cover_zeros(&self.working, self.config.cover);
                let assignable = is_assignable(&cover);
                debug!(
                    "covered zeros with {} lines; assignable: {assignable}",
                    cover.len()
                );
                self.cover = Some(cover);
                if assignable {
                    State::Assign
                } else {
                    State::CreateZeros
                }
            }
            State::CreateZeros => {
                if let Some(limit) = self.config.max_iterations {
                    if self.iterations >= limit {
                        return Err(Error::ExcessiveIterations { limit });
                    }
                }
                let cover = self.cover.as_ref().ok_or(Error::NoUncoveredCells)?;
                let k = create_zeros(&mut self.working, cover)?;
                self.iterations += 1;
                debug!("created zeros by shifting {k} (pass {})", self.iterations);
                trace!("adjusted:\n{}", self.working);
                State::CoverZeros
            }
            State::Assign => {
                let assignment = assign_tasks(&self.working)?;
                let total_cost = assignment.total_cost(&self.original)?;
                debug!("assigned every agent; total cost {total_cost}");
                self.solution = Some(Solution {
                    assignment,
                    total_cost,
                    ledger: self.ledger.clone(),
                    iterations: self.iterations,
                });
                State::Complete
            }
            State::Complete => State::Complete,
        };

        if next != self.state {
            debug!("state: {:?} -> {next:?}", self.state);
        }
        self.state = next;
        Ok(next)
    }

    /// Step until the solve is complete.
    pub fn run(mut self) -> Result<Solution, Error> {
        loop {
            if let Some(solution) = self.solution.take() {
                return Ok(solution);
            }
            self.step()?;
        }
    }
}

/// Find a minimum-cost assignment of agents (rows) to tasks (columns).
pub fn solve(costs: SquareMatrix) -> Result<Solution, Error> {
    Solver::new(costs)?.run()
}

/// [`solve`] with a custom configuration.
pub fn solve_with(costs: SquareMatrix, config: SolverConfig) -> Result<Solution, Error> {
    Solver::with_config(costs, config)?.run()
}
