//! N-queens solved with a construction heuristic followed by hill
//! climbing local search.
//!
//! Run with: `cargo run --example nqueens -- [n]`

use plancraft::prelude::*;

#[derive(Clone, Debug)]
struct Queen {
    column: i64,
    row: Option<i64>,
}

#[derive(Clone, Debug)]
struct NQueens {
    queens: Vec<Queen>,
    score: Option<SimpleScore>,
}

impl PlanningSolution for NQueens {
    type Score = SimpleScore;

    fn score(&self) -> Option<Self::Score> {
        self.score
    }

    fn set_score(&mut self, score: Option<Self::Score>) {
        self.score = score;
    }
}

fn queen_count(s: &NQueens) -> usize {
    s.queens.len()
}

fn get_row(s: &NQueens, idx: usize) -> Option<i64> {
    s.queens.get(idx).and_then(|q| q.row)
}

fn set_row(s: &mut NQueens, idx: usize, v: Option<i64>) {
    if let Some(queen) = s.queens.get_mut(idx) {
        queen.row = v;
    }
}

fn conflict_score(solution: &NQueens) -> SimpleScore {
    let mut conflicts = 0i64;
    for (i, a) in solution.queens.iter().enumerate() {
        let Some(row_a) = a.row else { continue };
        for b in solution.queens.iter().skip(i + 1) {
            let Some(row_b) = b.row else { continue };
            if row_a == row_b || (b.column - a.column).abs() == (row_b - row_a).abs() {
                conflicts += 1;
            }
        }
    }
    SimpleScore::of(-conflicts)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let n: i64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(8);

    let problem = NQueens {
        queens: (0..n).map(|column| Queen { column, row: None }).collect(),
        score: None,
    };

    let descriptor = SolutionDescriptor::<NQueens>::builder("NQueens")
        .entity(
            EntityDescriptor::new("Queen", queen_count)
                .with_variable(VariableDescriptor::genuine("row").with_value_range("rows")),
        )
        .build()
        .expect("valid n-queens schema");

    let director = SimpleScoreDirector::new(problem, descriptor, conflict_score);

    let construction = ConstructionPhase::new(
        QueuedEntityPlacer::new(
            FromSolutionEntitySelector::new(0),
            StaticValueSelector::new((0..n).collect()),
            get_row,
            set_row,
            "row",
        ),
        BestScoreForager::new(),
        NoTermination,
    );

    let local_search = LocalSearchPhase::new(
        ChangeMoveSelector::new(
            FromSolutionEntitySelector::new(0),
            StaticValueSelector::new((0..n).collect()),
            get_row,
            set_row,
            "row",
        ),
        HillClimbingAcceptor::new(),
        AcceptedCountForager::new(),
        UnimprovedStepCountTermination::new(2 * n as u64),
    )
    .with_phase_index(1);

    let mut config = SolverConfig::new();
    config.random_seed = Some(0);

    let mut solver = Solver::new((construction, local_search))
        .with_termination(TimeTermination::seconds(10))
        .with_config(config);

    let solution = solver.solve(director);

    println!("{}-queens best score: {}", n, solution.score.unwrap());
    for queen in &solution.queens {
        let row = queen.row.unwrap_or(-1);
        let line: String = (0..n).map(|c| if c == row { '♛' } else { '·' }).collect();
        println!("{}", line);
    }
}
