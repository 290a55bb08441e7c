use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    board::Board,
    topology::{Hole, Jump, Topology},
    visit_map::{DeadBoards, SharedVisitMap, VisitMap},
    SolveError,
};

/// A single move, identified by the hole the peg leaves and the hole it
/// lands in. The jumped-over hole follows from the topology.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Serialize, Deserialize)]
pub struct Move {
    pub start: Hole,
    pub end: Hole,
}

impl From<Jump> for Move {
    fn from(jump: Jump) -> Self {
        Move {
            start: jump.start,
            end: jump.end,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// An ordered sequence of moves that leaves exactly one peg on the board.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Solution {
    moves: Vec<Move>,
}

impl Solution {
    pub fn new(moves: Vec<Move>) -> Self {
        Self { moves }
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Play the solution from `start` and return every board on the way,
    /// starting with `start` itself.
    pub fn replay(&self, topology: &Topology, start: Board) -> Result<Vec<Board>, SolveError> {
        let mut board = start;
        let mut boards = Vec::with_capacity(self.moves.len() + 1);
        boards.push(board);

        for mv in &self.moves {
            let jump = topology
                .jump(mv.start, mv.end)
                .filter(|&jump| board.can_jump(jump))
                .ok_or(SolveError::IllegalMove {
                    start: mv.start,
                    end: mv.end,
                })?;
            board.apply_jump(jump);
            boards.push(board);
        }

        Ok(boards)
    }
}

/// Optional budgets for a search run. The default is unlimited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum number of search nodes to enter.
    pub max_nodes: Option<u64>,
    /// Maximum wall-clock time.
    pub time_limit: Option<Duration>,
    /// Maximum number of solutions to collect.
    pub max_solutions: Option<u64>,
}

impl SearchLimits {
    pub fn is_unlimited(&self) -> bool {
        self.max_nodes.is_none() && self.time_limit.is_none() && self.max_solutions.is_none()
    }
}

/// Largest side length that may be searched without any [`SearchLimits`].
/// The 21-hole board of side 6 already has more solutions than fit in
/// memory.
pub const MAX_UNLIMITED_SIDE: usize = 5;

/// Caller-side handle to abort a running search.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbortReason {
    Cancelled,
    NodeLimit,
    TimeLimit,
    SolutionLimit,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortReason::Cancelled => write!(f, "cancelled"),
            AbortReason::NodeLimit => write!(f, "node limit reached"),
            AbortReason::TimeLimit => write!(f, "time limit reached"),
            AbortReason::SolutionLimit => write!(f, "solution limit reached"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The whole move tree was searched.
    Exhausted,
    /// The search stopped early. The solutions found so far are kept.
    Aborted(AbortReason),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub explored: u64,
    pub hash_skipped: u64,
    pub dead_boards: usize,
    pub solutions: usize,
    pub elapsed: Duration,
}

#[derive(Clone, Debug)]
pub struct SearchReport {
    pub outcome: Outcome,
    pub solutions: Vec<Solution>,
    pub stats: SearchStats,
}

impl SearchReport {
    pub fn is_exhausted(&self) -> bool {
        self.outcome == Outcome::Exhausted
    }
}

/// Enumerate every solution from `board`, without limits. Boards larger than
/// [`MAX_UNLIMITED_SIDE`] are rejected.
pub fn solve(topology: &Topology, board: Board) -> Result<Vec<Solution>, SolveError> {
    Solver::new(topology).run(board).map(|report| report.solutions)
}

/// Exhaustive search over the move tree of one topology.
///
/// Boards from which no solution is reachable are remembered for the rest of
/// the run and never entered again. Boards that do lead to solutions are
/// always searched again, since every path through them is a distinct
/// solution.
pub struct Solver<'a> {
    topology: &'a Topology,
    limits: SearchLimits,
    cancel: Option<CancelToken>,
}

impl<'a> Solver<'a> {
    pub fn new(topology: &'a Topology) -> Self {
        Self {
            topology,
            limits: SearchLimits::default(),
            cancel: None,
        }
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    fn check_start(&self, start: Board) -> Result<(), SolveError> {
        start.validate(self.topology)?;
        if self.limits.is_unlimited() && self.topology.size() > MAX_UNLIMITED_SIDE {
            return Err(SolveError::InvalidBoardSize {
                size: self.topology.size(),
                max: MAX_UNLIMITED_SIDE,
            });
        }
        Ok(())
    }

    /// Search on the current thread.
    pub fn run(&self, start: Board) -> Result<SearchReport, SolveError> {
        self.check_start(start)?;
        log::info!(
            "searching size {} from {} pegs",
            self.topology.size(),
            start.count()
        );

        let started = Instant::now();
        let counters = Counters::new(0);
        let guard = self.guard(started, &counters);
        let mut search = Search::new(
            self.topology.jumps(),
            VisitMap::for_topology(self.topology),
            guard,
        );

        if start.count() == 1 {
            search.record_solution();
        } else {
            let mut board = start;
            search.search_inner(&mut board);
        }

        let outcome = match search.aborted {
            Some(reason) => Outcome::Aborted(reason),
            None => Outcome::Exhausted,
        };
        let stats = SearchStats {
            explored: search.explored,
            hash_skipped: search.hash_skipped,
            dead_boards: search.dead.len(),
            solutions: search.solutions.len(),
            elapsed: started.elapsed(),
        };
        Ok(finish(outcome, search.solutions, stats))
    }

    /// Search with one rayon task per legal first move.
    ///
    /// The shards share one dead-board table. Their results are concatenated
    /// in first-move order, which is the order the sequential search reports
    /// them in.
    pub fn run_parallel(&self, start: Board) -> Result<SearchReport, SolveError> {
        self.check_start(start)?;
        if start.count() <= 1 {
            return self.run(start);
        }
        log::info!(
            "searching size {} from {} pegs on {} threads",
            self.topology.size(),
            start.count(),
            rayon::current_num_threads()
        );

        let started = Instant::now();
        // the root counts as one node
        let counters = Counters::new(1);
        let dead = SharedVisitMap::for_topology(self.topology);
        let jumps = self.topology.jumps();

        let first_moves: Vec<Jump> = jumps
            .iter()
            .copied()
            .filter(|&jump| start.can_jump(jump))
            .collect();

        let shards: Vec<_> = first_moves
            .par_iter()
            .map(|&jump| {
                let mut search = Search::new(jumps, &dead, self.guard(started, &counters));
                let mut board = start;
                let found = search.explore_jump(&mut board, jump);
                log::debug!(
                    "shard {} found {found} solutions in {} nodes",
                    Move::from(jump),
                    search.explored
                );
                search
            })
            .collect();

        let mut solutions = Vec::new();
        let mut stats = SearchStats {
            explored: 1,
            ..SearchStats::default()
        };
        let mut aborted = None;
        for shard in shards {
            stats.explored += shard.explored;
            stats.hash_skipped += shard.hash_skipped;
            aborted = aborted.or(shard.aborted);
            solutions.extend(shard.solutions);
        }
        stats.dead_boards = dead.len();
        stats.solutions = solutions.len();
        stats.elapsed = started.elapsed();

        let outcome = match aborted {
            Some(reason) => Outcome::Aborted(reason),
            None => Outcome::Exhausted,
        };
        Ok(finish(outcome, solutions, stats))
    }

    fn guard<'g>(&'g self, started: Instant, counters: &'g Counters) -> Guard<'g> {
        Guard {
            limits: self.limits,
            cancel: self.cancel.as_ref(),
            started,
            counters,
        }
    }
}

fn finish(outcome: Outcome, solutions: Vec<Solution>, stats: SearchStats) -> SearchReport {
    match outcome {
        Outcome::Exhausted => log::info!(
            "found {} solutions. explored {} positions, skipped {}, {} dead boards, in {}s",
            solutions.len(),
            stats.explored,
            stats.hash_skipped,
            stats.dead_boards,
            stats.elapsed.as_secs_f32()
        ),
        Outcome::Aborted(reason) => log::warn!(
            "search {reason} after {} positions with {} solutions so far",
            stats.explored,
            solutions.len()
        ),
    }

    SearchReport {
        outcome,
        solutions,
        stats,
    }
}

/// How often the clock is read, in nodes.
const CLOCK_INTERVAL: u64 = 1024;

/// Node and solution counts of one run, shared by all shards.
struct Counters {
    nodes: AtomicU64,
    solutions: AtomicU64,
}

impl Counters {
    fn new(nodes: u64) -> Self {
        Self {
            nodes: AtomicU64::new(nodes),
            solutions: AtomicU64::new(0),
        }
    }
}

/// Limits and cancellation, checked on entry to every search node.
#[derive(Clone, Copy)]
struct Guard<'a> {
    limits: SearchLimits,
    cancel: Option<&'a CancelToken>,
    started: Instant,
    counters: &'a Counters,
}

impl Guard<'_> {
    fn check(&self) -> Option<AbortReason> {
        if self.cancel.is_some_and(CancelToken::is_cancelled) {
            return Some(AbortReason::Cancelled);
        }
        // stop every shard once the solution budget is used up
        if let Some(max) = self.limits.max_solutions {
            if self.counters.solutions.load(Ordering::Relaxed) >= max {
                return Some(AbortReason::SolutionLimit);
            }
        }

        let nodes = self.counters.nodes.fetch_add(1, Ordering::Relaxed) + 1;
        if self.limits.max_nodes.is_some_and(|max| nodes > max) {
            return Some(AbortReason::NodeLimit);
        }
        if let Some(limit) = self.limits.time_limit {
            if nodes % CLOCK_INTERVAL == 0 && self.started.elapsed() >= limit {
                return Some(AbortReason::TimeLimit);
            }
        }

        None
    }

    /// Claim a slot for one more solution.
    fn claim_solution(&self) -> Option<AbortReason> {
        let solutions = self.counters.solutions.fetch_add(1, Ordering::Relaxed) + 1;
        if self.limits.max_solutions.is_some_and(|max| solutions > max) {
            return Some(AbortReason::SolutionLimit);
        }
        None
    }
}

struct Search<'a, D> {
    jumps: &'a [Jump],
    dead: D,
    guard: Guard<'a>,
    path: Vec<Move>,
    solutions: Vec<Solution>,
    explored: u64,
    hash_skipped: u64,
    aborted: Option<AbortReason>,
}

impl<'a, D: DeadBoards> Search<'a, D> {
    fn new(jumps: &'a [Jump], dead: D, guard: Guard<'a>) -> Self {
        Self {
            jumps,
            dead,
            guard,
            path: vec![],
            solutions: vec![],
            explored: 0,
            hash_skipped: 0,
            aborted: None,
        }
    }

    /// Try every legal jump from `board`. Returns the number of solutions
    /// found below it. The board is restored before returning.
    fn search_inner(&mut self, board: &mut Board) -> u64 {
        if self.aborted.is_some() {
            return 0;
        }
        if let Some(reason) = self.guard.check() {
            self.aborted = Some(reason);
            return 0;
        }
        self.explored += 1;

        let jumps = self.jumps;
        let mut found = 0;
        for &jump in jumps {
            if !board.can_jump(jump) {
                continue;
            }

            found += self.explore_jump(board, jump);
            if self.aborted.is_some() {
                break;
            }
        }

        found
    }

    /// Apply `jump`, record or descend into the resulting board, then undo it.
    fn explore_jump(&mut self, board: &mut Board, jump: Jump) -> u64 {
        board.apply_jump(jump);
        self.path.push(jump.into());

        let found = if board.count() == 1 {
            self.record_solution()
        } else if self.dead.is_dead(*board) {
            self.hash_skipped += 1;
            0
        } else {
            let found = self.search_inner(board);
            // an interrupted subtree proves nothing
            if found == 0 && self.aborted.is_none() {
                self.dead.mark_dead(*board);
            }
            found
        };

        self.path.pop();
        board.apply_jump_inverse(jump);
        found
    }

    /// Store the current path as a solution, unless the solution limit is
    /// used up. Returns the number of solutions stored.
    fn record_solution(&mut self) -> u64 {
        if let Some(reason) = self.guard.claim_solution() {
            self.aborted = Some(reason);
            return 0;
        }
        self.solutions.push(Solution::new(self.path.clone()));
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::build_topology;

    fn standard(n: usize) -> (Topology, Board) {
        let topology = build_topology(n).unwrap();
        let board = Board::default_start(&topology);
        (topology, board)
    }

    #[test]
    fn test_standard_board_solutions() {
        let (topology, start) = standard(5);
        let report = Solver::new(&topology).run(start).unwrap();
        assert!(report.is_exhausted());
        assert!(!report.solutions.is_empty());
        assert!(report.stats.dead_boards > 0);

        for solution in &report.solutions {
            assert_eq!(solution.len(), 13);
            let boards = solution.replay(&topology, start).unwrap();
            assert_eq!(boards.last().unwrap().count(), 1);
            for (i, board) in boards.iter().enumerate() {
                assert_eq!(board.count() as usize, 14 - i);
            }
        }
    }

    #[test]
    fn test_solutions_are_distinct() {
        let (topology, start) = standard(5);
        let mut solutions = solve(&topology, start).unwrap();
        let total = solutions.len();
        solutions.sort_by(|a, b| a.moves().cmp(b.moves()));
        solutions.dedup();
        assert_eq!(solutions.len(), total);
    }

    #[test]
    fn test_search_is_deterministic() {
        let (topology, start) = standard(5);
        let first = solve(&topology, start).unwrap();
        let second = solve(&topology, start).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_first_solution_starts_with_lowest_jump() {
        let (topology, start) = standard(5);
        let solutions = solve(&topology, start).unwrap();
        // the only open jumps are 4 -> 1 and 6 -> 1, tried in (start, end) order
        let first = solutions[0].moves()[0];
        assert_eq!((first.start.number(), first.end.number()), (4, 1));
        let last = solutions.last().unwrap().moves()[0];
        assert_eq!((last.start.number(), last.end.number()), (6, 1));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let (topology, start) = standard(5);
        let sequential = Solver::new(&topology).run(start).unwrap();
        let parallel = Solver::new(&topology).run_parallel(start).unwrap();
        assert!(parallel.is_exhausted());
        assert_eq!(sequential.solutions, parallel.solutions);
    }

    #[test]
    fn test_other_starting_hole() {
        let topology = build_topology(5).unwrap();
        let start = Board::standard_start(&topology, topology.hole(5).unwrap());
        let solutions = solve(&topology, start).unwrap();
        assert!(!solutions.is_empty());
        for solution in &solutions {
            let boards = solution.replay(&topology, start).unwrap();
            assert_eq!(boards.last().unwrap().count(), 1);
        }
    }

    #[test]
    fn test_single_hole_board_has_no_solution() {
        let (topology, start) = standard(1);
        assert_eq!(start.count(), 0);
        let report = Solver::new(&topology).run(start).unwrap();
        assert!(report.is_exhausted());
        assert!(report.solutions.is_empty());
    }

    #[test]
    fn test_no_jumps_on_two_row_board() {
        let (topology, start) = standard(2);
        assert_eq!(start.count(), 2);
        let report = Solver::new(&topology).run(start).unwrap();
        assert!(report.is_exhausted());
        assert!(report.solutions.is_empty());
        assert_eq!(report.stats.explored, 1);
    }

    #[test]
    fn test_three_row_board_is_a_dead_end() {
        // every opening on the six-hole board strands two pegs
        let (topology, start) = standard(3);
        let report = Solver::new(&topology).run(start).unwrap();
        assert!(report.is_exhausted());
        assert!(report.solutions.is_empty());
    }

    #[test]
    fn test_three_row_board_from_custom_position() {
        let topology = build_topology(3).unwrap();
        let start = Board::from_holes(&topology, [3, 4, 5]).unwrap();
        let solutions = solve(&topology, start).unwrap();
        assert_eq!(solutions.len(), 1);

        let moves: Vec<_> = solutions[0]
            .moves()
            .iter()
            .map(|m| (m.start.number(), m.end.number()))
            .collect();
        assert_eq!(moves, vec![(4, 6), (6, 1)]);

        let counts: Vec<_> = solutions[0]
            .replay(&topology, start)
            .unwrap()
            .iter()
            .map(Board::count)
            .collect();
        assert_eq!(counts, vec![3, 2, 1]);
    }

    #[test]
    fn test_single_peg_is_already_solved() {
        let topology = build_topology(4).unwrap();
        let start = Board::from_holes(&topology, [7]).unwrap();
        let solutions = solve(&topology, start).unwrap();
        assert_eq!(solutions, vec![Solution::default()]);
    }

    #[test]
    fn test_malformed_board_is_rejected() {
        let topology = build_topology(3).unwrap();
        let result = Solver::new(&topology).run(Board(1 << 10));
        assert!(matches!(result, Err(SolveError::MalformedInitialBoard(_))));
        let result = Solver::new(&topology).run_parallel(Board(1 << 10));
        assert!(matches!(result, Err(SolveError::MalformedInitialBoard(_))));
    }

    #[test]
    fn test_cancelled_search_is_aborted() {
        let (topology, start) = standard(5);
        let cancel = CancelToken::new();
        cancel.cancel();
        let report = Solver::new(&topology)
            .with_cancel(cancel)
            .run(start)
            .unwrap();
        assert_eq!(report.outcome, Outcome::Aborted(AbortReason::Cancelled));
        assert!(report.solutions.is_empty());
    }

    #[test]
    fn test_node_limit_keeps_partial_results() {
        let (topology, start) = standard(5);
        let limits = SearchLimits {
            max_nodes: Some(500),
            ..SearchLimits::default()
        };
        let report = Solver::new(&topology).with_limits(limits).run(start).unwrap();
        assert_eq!(report.outcome, Outcome::Aborted(AbortReason::NodeLimit));
        assert!(report.stats.explored <= 500);

        let full = solve(&topology, start).unwrap();
        assert!(report.solutions.len() < full.len());
        assert_eq!(report.solutions[..], full[..report.solutions.len()]);
    }

    #[test]
    fn test_zero_time_limit_aborts() {
        let (topology, start) = standard(5);
        let limits = SearchLimits {
            time_limit: Some(Duration::ZERO),
            ..SearchLimits::default()
        };
        let report = Solver::new(&topology)
            .with_limits(limits)
            .run_parallel(start)
            .unwrap();
        assert_eq!(report.outcome, Outcome::Aborted(AbortReason::TimeLimit));
    }

    #[test]
    fn test_large_board_needs_a_budget() {
        let (topology, start) = standard(6);
        let size_error = |result: Result<SearchReport, SolveError>| {
            matches!(
                result,
                Err(SolveError::InvalidBoardSize {
                    size: 6,
                    max: MAX_UNLIMITED_SIDE
                })
            )
        };
        assert!(size_error(Solver::new(&topology).run(start)));
        assert!(size_error(Solver::new(&topology).run_parallel(start)));
        assert!(solve(&topology, start).is_err());

        // a cancel token alone is not a budget
        let solver = Solver::new(&topology).with_cancel(CancelToken::new());
        assert!(size_error(solver.run(start)));
    }

    #[test]
    fn test_solution_limit_on_large_board() {
        let (topology, start) = standard(6);
        let limits = SearchLimits {
            max_solutions: Some(10),
            ..SearchLimits::default()
        };
        let solver = Solver::new(&topology).with_limits(limits);

        let report = solver.run(start).unwrap();
        assert_eq!(report.outcome, Outcome::Aborted(AbortReason::SolutionLimit));
        assert_eq!(report.solutions.len(), 10);
        assert_eq!(report.stats.solutions, 10);
        for solution in &report.solutions {
            assert_eq!(solution.len(), 19);
            let boards = solution.replay(&topology, start).unwrap();
            assert_eq!(boards.last().unwrap().count(), 1);
        }

        let report = solver.run_parallel(start).unwrap();
        assert_eq!(report.outcome, Outcome::Aborted(AbortReason::SolutionLimit));
        assert_eq!(report.solutions.len(), 10);
        assert_eq!(report.stats.solutions, 10);
    }

    #[test]
    fn test_solution_limit_keeps_a_prefix() {
        let (topology, start) = standard(5);
        let full = solve(&topology, start).unwrap();
        let limits = SearchLimits {
            max_solutions: Some(100),
            ..SearchLimits::default()
        };
        let report = Solver::new(&topology).with_limits(limits).run(start).unwrap();
        assert_eq!(report.outcome, Outcome::Aborted(AbortReason::SolutionLimit));
        assert_eq!(report.solutions[..], full[..100]);

        // a limit above the total is never hit
        let limits = SearchLimits {
            max_solutions: Some(full.len() as u64 + 1),
            ..SearchLimits::default()
        };
        let report = Solver::new(&topology).with_limits(limits).run(start).unwrap();
        assert!(report.is_exhausted());
        assert_eq!(report.solutions, full);
    }

    #[test]
    fn test_stats_count_solutions() {
        let (topology, start) = standard(5);
        let report = Solver::new(&topology).run(start).unwrap();
        assert_eq!(report.stats.solutions, report.solutions.len());
        let report = Solver::new(&topology).run_parallel(start).unwrap();
        assert_eq!(report.stats.solutions, report.solutions.len());

        let topology = build_topology(4).unwrap();
        let start = Board::from_holes(&topology, [7]).unwrap();
        assert_eq!(Solver::new(&topology).run(start).unwrap().stats.solutions, 1);
    }

    #[test]
    fn test_cancel_from_another_thread_during_parallel_search() {
        let (topology, start) = standard(6);
        let limits = SearchLimits {
            time_limit: Some(Duration::from_secs(600)),
            ..SearchLimits::default()
        };
        let cancel = CancelToken::new();
        let canceller = {
            let cancel = cancel.clone();
            std::thread::spawn(move || {
                std::thread::sleep(Duration::from_millis(50));
                cancel.cancel();
            })
        };

        let report = Solver::new(&topology)
            .with_limits(limits)
            .with_cancel(cancel)
            .run_parallel(start)
            .unwrap();
        canceller.join().unwrap();
        assert_eq!(report.outcome, Outcome::Aborted(AbortReason::Cancelled));
        assert_eq!(report.stats.solutions, report.solutions.len());

        // shards are concatenated in first-move order
        let first_moves: Vec<Move> = report.solutions.iter().map(|s| s.moves()[0]).collect();
        assert!(first_moves.windows(2).all(|pair| pair[0] <= pair[1]));

        // each shard kept a prefix of what a full search below its first
        // move finds
        for chunk in report.solutions.chunk_by(|a, b| a.moves()[0] == b.moves()[0]) {
            let first = chunk[0].moves()[0];
            let jump = topology.jump(first.start, first.end).unwrap();
            let limits = SearchLimits {
                max_solutions: Some(chunk.len() as u64),
                ..SearchLimits::default()
            };
            let below = Solver::new(&topology)
                .with_limits(limits)
                .run(start.with_jump(jump))
                .unwrap();
            assert_eq!(below.solutions.len(), chunk.len());
            for (kept, tail) in chunk.iter().zip(&below.solutions) {
                assert_eq!(kept.moves()[1..], tail.moves()[..]);
            }
        }
    }

    #[test]
    fn test_replay_rejects_illegal_move() {
        let (topology, start) = standard(5);
        let hole = |n| topology.hole(n).unwrap();
        let solution = Solution::new(vec![Move {
            start: hole(11),
            end: hole(4),
        }]);
        assert!(matches!(
            solution.replay(&topology, start),
            Err(SolveError::IllegalMove { .. })
        ));
        let not_a_jump = Solution::new(vec![Move {
            start: hole(2),
            end: hole(1),
        }]);
        assert!(not_a_jump.replay(&topology, start).is_err());
    }
}
