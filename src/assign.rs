use std::fmt;

use crate::{error::Error, matching::ZeroMatching, matrix::SquareMatrix};

/// The task chosen for each agent, indexed by agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment(Vec<Option<usize>>);

impl Assignment {
    /// An assignment of `n` agents, none of which has a task yet.
    pub fn unassigned(n: usize) -> Self {
        Self(vec![None; n])
    }

    pub fn task_for(&self, agent: usize) -> Option<usize> {
        self.0.get(agent).copied().flatten()
    }

    pub fn is_complete(&self) -> bool {
        self.0.iter().all(Option::is_some)
    }

    /// The agents which have no task.
    pub fn unassigned_agents(&self) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(agent, task)| task.is_none().then_some(agent))
            .collect()
    }

    /// The task of every agent, or `IncompleteAssignment` if any agent has none.
    pub fn tasks(&self) -> Result<Vec<usize>, Error> {
        self.0
            .iter()
            .copied()
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| Error::IncompleteAssignment {
                unassigned: self.unassigned_agents(),
            })
    }

    /// Iterate over the `(agent, task)` pairs which have been assigned.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(agent, task)| task.map(|task| (agent, task)))
    }

    /// Sum the cost of every assigned pair in `matrix`.
    ///
    /// Every agent must have a task.
    pub fn total_cost(&self, matrix: &SquareMatrix) -> Result<i64, Error> {
        let mut total: i64 = 0;
        for (agent, task) in self.tasks()?.into_iter().enumerate() {
            total = total
                .checked_add(matrix.get(agent, task)?)
                .ok_or(Error::Overflow)?;
        }
        Ok(total)
    }
}

impl From<Vec<Option<usize>>> for Assignment {
    fn from(tasks: Vec<Option<usize>>) -> Self {
        Self(tasks)
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (agent, task) in self.0.iter().enumerate() {
            match task {
                Some(task) => writeln!(f, "Machine {agent} -> Task {task}")?,
                None => writeln!(f, "Machine {agent} -> unassigned")?,
            }
        }
        Ok(())
    }
}

/// Choose a distinct zero cell in every row of a reduced matrix.
///
/// Rows with a single zero take it first; the rest are settled by augmenting
/// paths over the zeros. Fails with `IncompleteAssignment` if the zeros do not
/// admit a perfect matching.
pub fn assign_tasks(matrix: &SquareMatrix) -> Result<Assignment, Error> {
    let forced = (0..matrix.n()).filter_map(|row| {
        let mut zeros = matrix.zeros_in_row(row);
        match (zeros.next(), zeros.next()) {
            (Some(col), None) => Some((row, col)),
            _ => None,
        }
    });

    let matching = ZeroMatching::seeded(matrix, forced);
    let assignment = Assignment::from(matching.into_row_assignments());
    if assignment.is_complete() {
        Ok(assignment)
    } else {
        Err(Error::IncompleteAssignment {
            unassigned: assignment.unassigned_agents(),
        })
    }
}
