//! Shared n-queens fixture for solver tests.

use plancraft_core::domain::{
    EntityDescriptor, PlanningSolution, SolutionDescriptor, VariableDescriptor,
};
use plancraft_core::score::SimpleScore;
use plancraft_scoring::SimpleScoreDirector;

#[derive(Clone, Debug)]
pub struct Queen {
    pub column: i64,
    pub row: Option<i64>,
}

#[derive(Clone, Debug)]
pub struct NQueensSolution {
    pub queens: Vec<Queen>,
    pub score: Option<SimpleScore>,
}

impl PlanningSolution for NQueensSolution {
    type Score = SimpleScore;

    fn score(&self) -> Option<Self::Score> {
        self.score
    }

    fn set_score(&mut self, score: Option<Self::Score>) {
        self.score = score;
    }
}

pub fn queen_count(s: &NQueensSolution) -> usize {
    s.queens.len()
}

pub fn get_queen_row(s: &NQueensSolution, idx: usize) -> Option<i64> {
    s.queens.get(idx).and_then(|q| q.row)
}

pub fn set_queen_row(s: &mut NQueensSolution, idx: usize, v: Option<i64>) {
    if let Some(queen) = s.queens.get_mut(idx) {
        queen.row = v;
    }
}

/// Negated conflict count: 0 is a solved board.
pub fn conflict_score(solution: &NQueensSolution) -> SimpleScore {
    let mut conflicts = 0i64;
    for (i, q1) in solution.queens.iter().enumerate() {
        let Some(row1) = q1.row else { continue };
        for q2 in solution.queens.iter().skip(i + 1) {
            let Some(row2) = q2.row else { continue };
            if row1 == row2 {
                conflicts += 1;
            }
            if (q2.column - q1.column).abs() == (row2 - row1).abs() {
                conflicts += 1;
            }
        }
    }
    SimpleScore::of(-conflicts)
}

/// Sum of assigned rows; a deliberately simple monotone scorer for
/// forager and move tests.
pub fn row_sum_score(solution: &NQueensSolution) -> SimpleScore {
    SimpleScore::of(solution.queens.iter().filter_map(|q| q.row).sum())
}

pub fn nqueens_descriptor() -> SolutionDescriptor<NQueensSolution> {
    SolutionDescriptor::<NQueensSolution>::builder("NQueensSolution")
        .entity(
            EntityDescriptor::new("Queen", queen_count)
                .with_variable(VariableDescriptor::genuine("row").with_value_range("rows")),
        )
        .build()
        .expect("n-queens schema is valid")
}

pub fn uninitialized_solution(n: i64) -> NQueensSolution {
    NQueensSolution {
        queens: (0..n).map(|column| Queen { column, row: None }).collect(),
        score: None,
    }
}

pub type NQueensDirector = SimpleScoreDirector<NQueensSolution, fn(&NQueensSolution) -> SimpleScore>;

pub fn nqueens_director(n: i64) -> NQueensDirector {
    director_from(uninitialized_solution(n), conflict_score)
}

pub fn row_sum_director(solution: NQueensSolution) -> NQueensDirector {
    director_from(solution, row_sum_score)
}

pub fn director_from(
    solution: NQueensSolution,
    calculator: fn(&NQueensSolution) -> SimpleScore,
) -> NQueensDirector {
    SimpleScoreDirector::new(solution, nqueens_descriptor(), calculator)
}
