use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

use common::{
    build_topology, export,
    print::{render_board, render_jump, render_numbers, Rating},
    Board, Outcome, SearchLimits, SearchReport, Solution, Solver, Topology, MAX_UNLIMITED_SIDE,
};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Side length of the triangle (the Cracker Barrel board is 5)
    #[arg(short = 'n', long, default_value_t = 5, value_name = "N")]
    size: usize,
    /// Hole left empty at the start
    #[arg(short, long, default_value_t = 1, value_name = "HOLE")]
    empty: usize,
    /// Print a sample solution move by move
    #[arg(short, long)]
    print: bool,
    /// Pick the printed sample at random instead of taking the first one
    #[arg(long, value_name = "SEED")]
    sample_seed: Option<u64>,
    /// Write every solution to a comma-separated file
    #[arg(short, long, value_name = "PATH")]
    save: Option<PathBuf>,
    /// Write every solution to a JSON file
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,
    /// Stop after entering this many positions
    #[arg(long, value_name = "NUM")]
    max_nodes: Option<u64>,
    /// Stop after collecting this many solutions
    #[arg(short = 'm', long, value_name = "NUM")]
    max_solutions: Option<u64>,
    /// Stop after this many seconds
    #[arg(short, long, value_name = "SECS")]
    timeout: Option<u64>,
    /// Split the search over all cores
    #[arg(long)]
    parallel: bool,
    /// More logging, repeat for more
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let topology = build_topology(cli.size).context("Failed to build the board")?;
    let empty = topology.hole(cli.empty).with_context(|| {
        format!(
            "Hole {} is not on a board with {} holes",
            cli.empty,
            topology.hole_count()
        )
    })?;
    let start = Board::standard_start(&topology, empty);

    let limits = SearchLimits {
        max_nodes: cli.max_nodes,
        time_limit: cli.timeout.map(Duration::from_secs),
        max_solutions: cli.max_solutions,
    };
    let solver = Solver::new(&topology).with_limits(limits);
    let report = if cli.parallel {
        solver.run_parallel(start)
    } else {
        solver.run(start)
    }
    .with_context(|| {
        if limits.is_unlimited() && topology.size() > MAX_UNLIMITED_SIDE {
            format!(
                "Boards larger than {MAX_UNLIMITED_SIDE} need --max-solutions, --max-nodes or --timeout"
            )
        } else {
            "Search failed".to_string()
        }
    })?;
    print_summary(&report);

    if cli.print {
        println!("\n{0}x{0} board hole numbers:", topology.size());
        println!("{}", render_numbers(&topology));
        println!("starting board:");
        println!("{}", render_board(&topology, start));
        match pick_sample(&report.solutions, cli.sample_seed) {
            Some(solution) => print_solution(&topology, start, solution)?,
            None => println!("No solution"),
        }
    }

    if let Some(path) = cli.save {
        export::save_delimited(&path, &report.solutions)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("saved {} solutions to {}", report.solutions.len(), path.display());
    }
    if let Some(path) = cli.json {
        export::save_json(&path, &report.solutions)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("saved {} solutions to {}", report.solutions.len(), path.display());
    }

    Ok(())
}

fn print_summary(report: &SearchReport) {
    let stats = &report.stats;
    let status = match report.outcome {
        Outcome::Exhausted => "searched exhaustively".to_string(),
        Outcome::Aborted(reason) => format!("stopped early, {reason}"),
    };
    println!(
        "{} solutions, {status}. explored {} positions, skipped {}, in {:.3}s",
        stats.solutions,
        stats.explored,
        stats.hash_skipped,
        stats.elapsed.as_secs_f32()
    );
}

fn pick_sample(solutions: &[Solution], seed: Option<u64>) -> Option<&Solution> {
    if solutions.is_empty() {
        return None;
    }
    let idx = match seed {
        Some(seed) => Pcg64Mcg::seed_from_u64(seed).random_range(..solutions.len()),
        None => 0,
    };
    solutions.get(idx)
}

fn print_solution(topology: &Topology, start: Board, solution: &Solution) -> Result<()> {
    let boards = solution
        .replay(topology, start)
        .context("Solution does not replay on the starting board")?;

    for (i, (mv, board)) in solution.moves().iter().zip(&boards[1..]).enumerate() {
        let jump = topology
            .jump(mv.start, mv.end)
            .context("Solution contains an unknown jump")?;
        println!("move {}: {mv}", i + 1);
        println!("{}", render_jump(topology, *board, jump));
    }

    let moves: Vec<String> = solution.moves().iter().map(ToString::to_string).collect();
    println!("solution: {}", moves.join(" "));
    if let Some(last) = boards.last() {
        println!("{} peg left: {}", last.count(), Rating::from_pegs(last.count()));
    }
    Ok(())
}
