use std::process;

use clap::{App, Arg, ArgGroup, ArgMatches};
use log::debug;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use fifteen_solver::config::{Limits, Method};
use fifteen_solver::solvability::Parity;
use fifteen_solver::{heuristic, random_solvable, scramble, Board, LoadBoard, Moves, Solve};

fn main() {
    env_logger::init();

    let matches = App::new("fifteen-solver")
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .about("Finds shortest solutions of the 15-puzzle")
        .arg(
            Arg::with_name("board")
                .multiple(true)
                .help("16 numbers, row by row, 0 is the blank"),
        )
        .arg(
            Arg::with_name("file")
                .short("f")
                .long("file")
                .takes_value(true)
                .value_name("PATH")
                .help("read the board from a file"),
        )
        .arg(
            Arg::with_name("scramble")
                .short("s")
                .long("scramble")
                .takes_value(true)
                .value_name("K")
                .help("scramble the goal with K random moves"),
        )
        .arg(
            Arg::with_name("random")
                .short("r")
                .long("random")
                .help("uniformly random solvable board"),
        )
        .group(
            ArgGroup::with_name("input")
                .args(&["board", "file", "scramble", "random"])
                .required(true),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .takes_value(true)
                .value_name("SEED")
                .help("seed for --scramble and --random"),
        )
        .arg(
            Arg::with_name("astar")
                .short("a")
                .long("astar")
                .help("use A* with manhattan distance and linear conflict (default)"),
        )
        .arg(
            Arg::with_name("bfs")
                .short("b")
                .long("bfs")
                .help("use breadth-first search"),
        )
        .arg(
            Arg::with_name("bidirectional")
                .short("d")
                .long("bidirectional")
                .help("use bidirectional breadth-first search"),
        )
        .group(ArgGroup::with_name("method").args(&["astar", "bfs", "bidirectional"]))
        .arg(
            Arg::with_name("max-expansions")
                .short("m")
                .long("max-expansions")
                .takes_value(true)
                .value_name("N")
                .help("give up after expanding N states (default 10,000,000)"),
        )
        .arg(
            Arg::with_name("timeout")
                .short("t")
                .long("timeout")
                .takes_value(true)
                .value_name("SECS")
                .help("give up after SECS seconds"),
        )
        .arg(
            Arg::with_name("replay")
                .long("replay")
                .takes_value(true)
                .value_name("MOVES")
                .help("apply blank moves (e.g. \"ulldr\") instead of solving"),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .long("quiet")
                .help("don't print progress while searching"),
        )
        .get_matches();

    let board = load_board(&matches);
    println!("{}", board);
    println!("{}", Parity::of(&board));
    println!("Heuristic: {}", heuristic(&board));
    println!();

    if let Some(replay) = matches.value_of("replay") {
        let moves: Moves = replay.parse().unwrap_or_else(|err| {
            eprintln!("Failed to parse moves: {}", err);
            process::exit(1);
        });
        let end = board.replay(&moves).unwrap_or_else(|err| {
            eprintln!("{}", err);
            process::exit(1);
        });
        println!("After {} moves:", moves.len());
        println!("{}", end);
        println!("{}", if end.is_goal() { "Solved" } else { "Not solved" });
        return;
    }

    let method = if matches.is_present("bfs") {
        Method::Bfs
    } else if matches.is_present("bidirectional") {
        Method::Bidirectional
    } else {
        Method::AStar
    };
    let limits = load_limits(&matches);

    println!("Solving using {} ({})...", method, limits);
    let report = board.solve(method, limits, !matches.is_present("quiet"));
    debug!("{:?}", report.outcome);
    print!("{}", report);
}

fn load_board(matches: &ArgMatches<'_>) -> Board {
    if let Some(path) = matches.value_of("file") {
        return path.load_board().unwrap_or_else(|err| {
            eprintln!("Can't load board from {}: {}", path, err);
            process::exit(1);
        });
    }

    if let Some(steps) = matches.value_of("scramble") {
        let steps = parse_number("scramble", steps);
        let mut rng = seeded_rng(matches);
        let (board, moves) = scramble(steps, true, &mut rng);
        println!("Scrambled with: {}", moves);
        return board;
    }

    if matches.is_present("random") {
        return random_solvable(&mut seeded_rng(matches));
    }

    let text = matches
        .values_of("board")
        .map(|values| values.collect::<Vec<_>>().join(" "))
        .unwrap_or_default();
    text.parse().unwrap_or_else(|err| {
        eprintln!("Failed to parse board: {}", err);
        process::exit(1);
    })
}

fn seeded_rng(matches: &ArgMatches<'_>) -> SmallRng {
    // print the seed even when it's random so any board can be recreated
    let seed = match matches.value_of("seed") {
        Some(seed) => parse_number("seed", seed),
        None => rand::random(),
    };
    println!("Seed: {}", seed);
    SmallRng::seed_from_u64(seed)
}

fn load_limits(matches: &ArgMatches<'_>) -> Limits {
    let mut limits = Limits::default();
    if let Some(max) = matches.value_of("max-expansions") {
        // allow 10_000 and 10,000
        let max: String = max.chars().filter(|&c| c != '_' && c != ',').collect();
        limits = limits.with_max_expansions(parse_number("max-expansions", &max));
    }
    if let Some(secs) = matches.value_of("timeout") {
        let secs: f64 = secs.parse().unwrap_or_else(|err| {
            eprintln!("Invalid timeout {}: {}", secs, err);
            process::exit(1);
        });
        limits = limits.with_timeout_secs(secs);
    }
    limits
}

fn parse_number<T>(name: &str, value: &str) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().unwrap_or_else(|err| {
        eprintln!("Invalid {} {}: {}", name, value, err);
        process::exit(1);
    })
}
