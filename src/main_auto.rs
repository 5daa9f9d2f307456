// Copyright (C) 2020-2024 Andy Kurnia.

use lexiplay::{
    bag, board, error, game_config, game_runner, game_state, lexicon, move_picker, stats,
};
use rand::prelude::*;
use std::sync::Arc;

static STRATEGIES: &[&str] = &["pass", "random", "highest", "most-tiles", "score-and-tiles"];

const DEFAULT_GAMES_PER_PAIRING: usize = 10;

// One game of a pairing. Both seat orders of the same game share a seed,
// so they start from the same racks and bag.
struct Job {
    pairing: usize,
    game: usize,
    swapped: bool,
    seed: u64,
}

#[derive(Debug)]
struct GameResult {
    pairing: usize,
    game: usize,
    swapped: bool,
    went_first: Option<usize>,
    // in pairing order, not seat order
    scores: [i32; 2],
    num_turns: usize,
}

// Per-pairing tallies, plus how many games could not be played.
struct Summary {
    tallies: Vec<stats::MatchTally>,
    completed: usize,
    failed: usize,
}

impl Summary {
    fn new(num_pairings: usize) -> Self {
        Self {
            tallies: vec![stats::MatchTally::default(); num_pairings],
            completed: 0,
            failed: 0,
        }
    }

    // Returns the game back if it finished.
    fn absorb(&mut self, result: error::Returns<GameResult>) -> Option<GameResult> {
        match result {
            Ok(game) => {
                self.tallies[game.pairing].record(game.scores[0], game.scores[1]);
                self.completed += 1;
                Some(game)
            }
            Err(e) => {
                log::error!("game failed: {}", e);
                self.failed += 1;
                None
            }
        }
    }

    fn processed(&self) -> usize {
        self.completed + self.failed
    }
}

fn play_job(
    game_config: &Arc<game_config::GameConfig>,
    board: &board::Board,
    pairings: &[(usize, usize)],
    job: &Job,
) -> error::Returns<GameResult> {
    let (a, b) = pairings[job.pairing];
    let seated = if job.swapped { [b, a] } else { [a, b] };
    let mut strategies = seated
        .iter()
        .enumerate()
        .map(|(seat, &i)| {
            move_picker::make_strategy(
                STRATEGIES[i],
                Box::new(rand_chacha::ChaCha20Rng::seed_from_u64(
                    job.seed ^ (seat as u64 + 1),
                )),
            )
        })
        .collect::<error::Returns<Vec<_>>>()?;
    let mut state = game_state::GameState::new(
        Arc::clone(game_config),
        board.clone(),
        bag::make_scrabble_tiles(),
        vec![game_state::Player::new(0), game_state::Player::new(1)],
    )?;
    let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(job.seed);
    let turns = game_runner::run_game(&mut state, &mut strategies, true, &mut rng)?;
    let seat_scores = state.scores();
    let scores = if job.swapped {
        [seat_scores[1], seat_scores[0]]
    } else {
        [seat_scores[0], seat_scores[1]]
    };
    let went_first = turns.first().map(|t| seated[t.seat as usize]);
    Ok(GameResult {
        pairing: job.pairing,
        game: job.game,
        swapped: job.swapped,
        went_first,
        scores,
        num_turns: turns.len(),
    })
}

pub fn main() -> error::Returns<()> {
    let _logger = flexi_logger::Logger::try_with_env_or_str("info")?.start()?;

    let args = std::env::args().collect::<Vec<_>>();
    if args.len() <= 1 {
        return Err("usage: auto WORDLIST [GAMES_PER_PAIRING] [SEED]".into());
    }
    let lexicon = lexicon::Lexicon::from_path(&args[1])?;
    log::info!("loaded {} words from {}", lexicon.len(), args[1]);
    let games_per_pairing = match args.get(2) {
        Some(s) => s.parse::<usize>()?,
        None => DEFAULT_GAMES_PER_PAIRING,
    };
    let base_seed = match args.get(3) {
        Some(s) => s.parse::<u64>()?,
        None => rand_chacha::ChaCha20Rng::from_os_rng().next_u64(),
    };
    log::info!("seed {}", base_seed);

    let game_config = Arc::new(game_config::make_scrabble_game_config(Arc::new(lexicon)));
    let board = Arc::new(board::make_scrabble_board()?);
    let strategy_names = STRATEGIES
        .iter()
        .map(|name| {
            Ok(move_picker::make_strategy(
                name,
                Box::new(rand_chacha::ChaCha20Rng::seed_from_u64(0)),
            )?
            .name())
        })
        .collect::<error::Returns<Vec<_>>>()?;

    let mut pairings = Vec::new();
    for a in 0..STRATEGIES.len() {
        for b in a + 1..STRATEGIES.len() {
            pairings.push((a, b));
        }
    }
    let pairings = Arc::new(pairings);
    let mut jobs = Vec::with_capacity(pairings.len() * games_per_pairing * 2);
    for pairing in 0..pairings.len() {
        for game in 0..games_per_pairing {
            let seed = base_seed ^ (((pairing as u64) << 32) | game as u64);
            for swapped in [false, true] {
                jobs.push(Job {
                    pairing,
                    game,
                    swapped,
                    seed,
                });
            }
        }
    }
    let jobs = Arc::new(jobs);

    let num_threads = num_cpus::get();
    let next_job = Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let mut threads = vec![];
    let (tx, rx) = std::sync::mpsc::channel();
    for _ in 0..num_threads {
        let tx = tx.clone();
        let game_config = Arc::clone(&game_config);
        let board = Arc::clone(&board);
        let pairings = Arc::clone(&pairings);
        let jobs = Arc::clone(&jobs);
        let next_job = Arc::clone(&next_job);
        threads.push(std::thread::spawn(move || {
            loop {
                let i = next_job.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                let Some(job) = jobs.get(i) else {
                    break;
                };
                if tx
                    .send(play_job(&game_config, &board, &pairings, job))
                    .is_err()
                {
                    break;
                }
            }
        }));
    }
    drop(tx);

    let epoch_secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs();
    let csv_path = format!("games-{:08x}.csv", epoch_secs);
    println!("logging to {}", csv_path);
    let mut csv_game = csv::Writer::from_path(&csv_path)?;
    csv_game.serialize((
        "strategy", "opponent", "game", "swapped", "first", "score", "oppscore", "turns",
    ))?;
    let mut summary = Summary::new(pairings.len());
    let t0 = std::time::Instant::now();
    let report_every = (jobs.len() / 10).max(1);
    for result in rx.iter() {
        let game = summary.absorb(result);
        if summary.processed() % report_every == 0 {
            log::info!(
                "{}/{} games after {} seconds",
                summary.processed(),
                jobs.len(),
                t0.elapsed().as_secs()
            );
        }
        let Some(result) = game else {
            continue;
        };
        let (a, b) = pairings[result.pairing];
        csv_game.serialize((
            &strategy_names[a],
            &strategy_names[b],
            result.game,
            result.swapped,
            result.went_first.map(|i| strategy_names[i].as_str()).unwrap_or(""),
            result.scores[0],
            result.scores[1],
            result.num_turns,
        ))?;
    }
    csv_game.flush()?;

    for thread in threads {
        if let Err(e) = thread.join() {
            log::error!("worker panicked: {:?}", e);
        }
    }

    println!(
        "{:<36} {:<36} {:>5} {:>5} {:>5} {:>6} {:>8} {:>8} {:>8}",
        "strategy", "opponent", "won", "lost", "tied", "win%", "avg", "oppavg", "spread"
    );
    for (&(a, b), tally) in pairings.iter().zip(summary.tallies.iter()) {
        println!(
            "{:<36} {:<36} {:>5} {:>5} {:>5} {:>6.1} {:>8.1} {:>8.1} {:>8.1}",
            strategy_names[a],
            strategy_names[b],
            tally.wins,
            tally.losses,
            tally.ties,
            tally.win_rate() * 100.0,
            tally.score.mean(),
            tally.opponent_score.mean(),
            tally.spread.mean()
        );
    }
    println!(
        "{} games in {} seconds, {} failed",
        summary.completed,
        t0.elapsed().as_secs(),
        summary.failed
    );

    Ok(())
}
