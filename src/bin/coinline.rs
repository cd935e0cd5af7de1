use std::io::Read;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use coinline::eval::{evaluate_json, parse_coins};
use coinline::{
    random_coins, succ, terminal, utility, winner, CoinError, SearchOptions, Side, Solver, State,
    Strategy,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TurnOpt {
    Player,
    Ai,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyOpt {
    Recursive,
    Stack,
    Parallel,
}

#[derive(Debug, Parser)]
#[command(name = "coinline", about = "Exact minimax solver for the coin line game")]
struct Args {
    /// Coin line, leftmost first, as a comma-separated list (e.g. 3,1,3)
    #[arg(long, conflicts_with = "random")]
    coins: Option<String>,

    /// Generate a random line of this many coins instead of --coins
    #[arg(long)]
    random: Option<usize>,

    /// Largest coin value for random lines (values are 1..=max)
    #[arg(long, default_value_t = 9)]
    max_coin: u32,

    /// Seed for random lines (deterministic)
    #[arg(long, default_value_t = 0x00C0FFEEu64)]
    seed: u64,

    /// Side to move first
    #[arg(long, value_enum, default_value_t = TurnOpt::Player)]
    turn: TurnOpt,

    /// Tree walk: recursive | stack | parallel (all give identical results)
    #[arg(long, value_enum, default_value_t = StrategyOpt::Recursive)]
    strategy: StrategyOpt,

    /// Skip principal variation reconstruction
    #[arg(long, default_value_t = false)]
    no_pv: bool,

    /// Play the game out with both sides following the optimal line
    #[arg(long, default_value_t = false)]
    play: bool,

    /// Read a JSON state from stdin and print one JSON evaluation line to stdout
    #[arg(long, default_value_t = false, conflicts_with_all = ["coins", "random", "play"])]
    eval_state: bool,

    /// Solve this many random lines of length --random and print outcome counts
    #[arg(long, requires = "random", conflicts_with_all = ["play", "eval_state"])]
    sweep: Option<u64>,

    /// Suppress diagnostics on stderr
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

impl Args {
    fn options(&self) -> SearchOptions {
        SearchOptions {
            strategy: match self.strategy {
                StrategyOpt::Recursive => Strategy::Recursive,
                StrategyOpt::Stack => Strategy::Stack,
                StrategyOpt::Parallel => Strategy::Parallel,
            },
            principal_variation: !self.no_pv,
        }
    }

    fn first_turn(&self) -> Side {
        match self.turn {
            TurnOpt::Player => Side::Player,
            TurnOpt::Ai => Side::Ai,
        }
    }
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("[coinline] error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let options = args.options();

    if args.eval_state {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        let out = evaluate_json(&buf, options)?;
        println!("{}", serde_json::to_string(&out)?);
        return Ok(());
    }

    if let Some(games) = args.sweep {
        let len = args.random.unwrap_or(0);
        run_sweep(args, games, len)?;
        return Ok(());
    }

    let coins = match (&args.coins, args.random) {
        (Some(text), _) => parse_coins(text)?,
        (None, Some(len)) => random_coins(args.seed, 0, len, args.max_coin),
        (None, None) => return Err("one of --coins, --random or --eval-state is required".into()),
    };
    if !args.quiet {
        eprintln!("[coinline] line {:?} ({} coins), {} to move", coins, coins.len(), args.first_turn());
    }
    let state = State::with_turn(coins, args.first_turn());

    if args.play {
        return play_out(args, state);
    }

    let start = Instant::now();
    let mut solver = Solver::new(options);
    let res = solver.search(&state)?;
    if !args.quiet {
        eprintln!(
            "[coinline] solved: nodes={} elapsed_ms={}",
            res.nodes,
            start.elapsed().as_millis()
        );
    }

    let pv: Vec<String> = res.principal_variation.iter().map(ToString::to_string).collect();
    println!(
        "value={} best_action={} pv=[{}]",
        res.value,
        res.best_action.map_or_else(|| "None".to_string(), |a| a.to_string()),
        pv.join(" ")
    );
    Ok(())
}

fn play_out(args: &Args, mut state: State) -> Result<(), Box<dyn std::error::Error>> {
    let mut solver = Solver::new(SearchOptions {
        principal_variation: false,
        ..args.options()
    });
    let mut ply = 0u32;
    while !terminal(&state) {
        let res = solver.search(&state)?;
        let Some(action) = res.best_action else { break };
        let mover = state.turn;
        let next = succ(&state, action)?;
        let gained = next.score_of(mover) - state.score_of(mover);
        ply += 1;
        println!(
            "[play] {ply}: {mover} takes {action} for {gained} (player={} ai={}, value={})",
            next.player_score, next.ai_score, res.value
        );
        state = next;
    }
    match winner(&state) {
        Some(side) => println!("[play] winner: {side} (utility {})", utility(&state)),
        None => println!("[play] tie (utility {})", utility(&state)),
    }
    if !args.quiet {
        eprintln!("[coinline] play finished in {ply} moves, nodes={}", solver.nodes());
    }
    Ok(())
}

/// Solve many random lines in parallel, one independent solver per line.
fn run_sweep(args: &Args, games: u64, len: usize) -> Result<(), CoinError> {
    let options = args.options();
    let first = args.first_turn();

    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(games)
    };
    pb.set_style(
        ProgressStyle::with_template("[sweep] {bar:40} {pos}/{len} lines ({elapsed})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let ai_wins = AtomicU64::new(0);
    let player_wins = AtomicU64::new(0);
    let ties = AtomicU64::new(0);
    let nodes = AtomicU64::new(0);

    (0..games).into_par_iter().try_for_each(|line_id| {
        let coins = random_coins(args.seed, line_id, len, args.max_coin);
        let state = State::with_turn(coins, first);
        let res = Solver::new(options).search(&state)?;
        nodes.fetch_add(res.nodes, Ordering::Relaxed);
        let bucket = match res.value.signum() {
            1 => &ai_wins,
            -1 => &player_wins,
            _ => &ties,
        };
        bucket.fetch_add(1, Ordering::Relaxed);
        pb.inc(1);
        Ok::<(), CoinError>(())
    })?;
    pb.finish_and_clear();

    println!(
        "lines={} len={} ai_wins={} player_wins={} ties={} nodes={}",
        games,
        len,
        ai_wins.load(Ordering::Relaxed),
        player_wins.load(Ordering::Relaxed),
        ties.load(Ordering::Relaxed),
        nodes.load(Ordering::Relaxed)
    );
    Ok(())
}
