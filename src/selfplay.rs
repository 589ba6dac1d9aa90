//! Self-play game generation.
//!
//! Deals a random board, then lets the engine play every color in turn
//! until one color holds the whole map or the turn limit is reached. Games
//! run sequentially or in parallel on a rayon pool; records are written as
//! JSON lines.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::warn;

use crate::board::{Color, GameState, ALL_COLORS, ALL_TERRITORIES, COLOR_COUNT};
use crate::config::SearchConfig;
use crate::engine::Game;
use crate::movegen::Action;

/// Configuration for self-play game generation.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Turns (one color each) before a game is called unfinished.
    pub max_turns: usize,
    /// Troops each color starts with, the one per claimed territory included.
    pub starting_army: u32,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress output.
    pub quiet: bool,
    pub search: SearchConfig,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 4,
            max_turns: 40,
            starting_army: 30,
            threads: 4,
            seed: 0,
            quiet: false,
            search: SearchConfig::default(),
        }
    }
}

/// One committed turn.
#[derive(Debug, Clone, Serialize)]
pub struct TurnRecord {
    pub turn: usize,
    pub color: Color,
    pub actions: Vec<Action>,
    pub card_bonus: u32,
    pub score: f64,
    pub territories: usize,
    pub troops: u32,
}

/// A complete self-play game record.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    /// Sequential game ID.
    pub game_id: usize,
    /// The color holding every territory, if any.
    pub winner: Option<Color>,
    pub turns: Vec<TurnRecord>,
    /// Territories per color at the end, in turn order.
    pub final_territories: [usize; COLOR_COUNT],
    /// Troops per color at the end, in turn order.
    pub final_troops: [u32; COLOR_COUNT],
    /// Set when a turn failed and the game was abandoned.
    pub error: Option<String>,
}

/// Deals every territory round-robin in random order with one troop, then
/// spreads the rest of each color's starting army over its territories at
/// random.
pub fn deal(rng: &mut SmallRng, starting_army: u32) -> GameState {
    let mut order = ALL_TERRITORIES.to_vec();
    order.shuffle(rng);

    let mut state = GameState::empty();
    for (i, t) in order.into_iter().enumerate() {
        state.claim(t, ALL_COLORS[i % COLOR_COUNT], 1);
    }

    for color in ALL_COLORS {
        let owned = state.owned_by(color);
        let spare = starting_army.saturating_sub(owned.len() as u32);
        for _ in 0..spare {
            if let Some(&t) = owned.choose(rng) {
                state.place_troops(t, color, 1);
            }
        }
    }
    state
}

fn territory_counts(state: &GameState) -> [usize; COLOR_COUNT] {
    let mut counts = [0usize; COLOR_COUNT];
    for color in ALL_COLORS {
        counts[color as usize] = state.territory_count(color);
    }
    counts
}

/// Plays one game to completion or the turn limit.
pub fn play_game(config: &SelfPlayConfig, game_id: usize, rng: &mut SmallRng) -> GameRecord {
    let state = deal(rng, config.starting_army);
    let mut game = Game::with_state(state, config.search.clone(), rng.gen_range(1..u64::MAX));
    let mut null_out = std::io::sink();
    let mut turns = Vec::new();
    let mut error = None;

    for turn in 0..config.max_turns {
        if game.state.is_terminal() {
            break;
        }
        match game.play_turn(&mut null_out) {
            Ok(report) => turns.push(TurnRecord {
                turn,
                color: report.color,
                actions: report.actions,
                card_bonus: report.card_bonus,
                score: report.score,
                territories: report.territories,
                troops: report.troops,
            }),
            Err(e) => {
                warn!(game_id, turn, error = %e, "abandoning game");
                error = Some(e.to_string());
                break;
            }
        }
    }

    let winner = ALL_COLORS.into_iter().find(|c| game.state.is_won_by(*c));
    GameRecord {
        game_id,
        winner,
        turns,
        final_territories: territory_counts(&game.state),
        final_troops: game.state.troops_by_color(),
        error,
    }
}

fn outcome(game: &GameRecord) -> String {
    match (game.winner, &game.error) {
        (Some(w), _) => format!("{} wins", w.name()),
        (None, Some(_)) => "abandoned".to_string(),
        (None, None) => "unfinished".to_string(),
    }
}

/// Runs self-play and collects every game.
pub fn run_self_play(config: &SelfPlayConfig) -> Vec<GameRecord> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, |game| {
        games.push(game);
    });
    games.sort_by_key(|g| g.game_id);
    games
}

/// Runs self-play and hands each game to `on_game` as it finishes.
pub fn run_self_play_with_callback<F>(config: &SelfPlayConfig, on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    if config.threads > 1 {
        run_self_play_parallel(config, on_game);
    } else {
        run_self_play_sequential(config, on_game);
    }
}

fn run_self_play_sequential<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord),
{
    let mut rng = if config.seed != 0 {
        SmallRng::seed_from_u64(config.seed)
    } else {
        SmallRng::from_entropy()
    };

    for i in 0..config.num_games {
        let game_start = Instant::now();
        let game = play_game(config, i, &mut rng);
        if !config.quiet {
            eprintln!(
                "Game {}/{}: {} after {} turns ({:.1}s)",
                i + 1,
                config.num_games,
                outcome(&game),
                game.turns.len(),
                game_start.elapsed().as_secs_f64(),
            );
        }
        on_game(game);
    }
}

fn run_self_play_parallel<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let pool = match rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
    {
        Ok(pool) => pool,
        Err(e) => {
            warn!(error = %e, "thread pool unavailable, playing sequentially");
            return run_self_play_sequential(config, on_game);
        }
    };

    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<GameRecord>();
    let config_clone = config.clone();
    let handle = std::thread::spawn(move || {
        pool.install(|| {
            (0..config_clone.num_games)
                .into_par_iter()
                .for_each_with(tx, |tx, i| {
                    let mut rng = if config_clone.seed != 0 {
                        SmallRng::seed_from_u64(config_clone.seed.wrapping_add(i as u64))
                    } else {
                        SmallRng::from_entropy()
                    };
                    let game_start = Instant::now();
                    let game = play_game(&config_clone, i, &mut rng);
                    if !config_clone.quiet {
                        let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                        eprintln!(
                            "Game {}/{}: {} after {} turns ({:.1}s)",
                            n,
                            config_clone.num_games,
                            outcome(&game),
                            game.turns.len(),
                            game_start.elapsed().as_secs_f64(),
                        );
                    }
                    let _ = tx.send(game);
                });
        });
    });

    for game in rx {
        on_game(game);
    }

    if handle.join().is_err() {
        warn!("self-play worker thread panicked");
    }
}

/// Writes games as JSON lines.
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Prints a summary of self-play results to stderr.
pub fn print_summary(games: &[GameRecord]) {
    let total = games.len();
    let mut win_counts = [0usize; COLOR_COUNT];
    let mut unfinished = 0usize;
    let mut abandoned = 0usize;
    let mut total_turns = 0usize;

    for game in games {
        total_turns += game.turns.len();
        match game.winner {
            Some(w) => win_counts[w as usize] += 1,
            None if game.error.is_some() => abandoned += 1,
            None => unfinished += 1,
        }
    }

    eprintln!("=== Self-Play Summary ===");
    eprintln!("Games: {}", total);
    eprintln!(
        "Avg turns/game: {:.1}",
        total_turns as f64 / total.max(1) as f64
    );
    eprintln!("Unfinished: {}", unfinished);
    eprintln!("Abandoned: {}", abandoned);
    eprintln!("Win distribution:");
    for color in ALL_COLORS {
        let wins = win_counts[color as usize];
        let pct = 100.0 * wins as f64 / total.max(1) as f64;
        eprintln!("  {:>10}: {} ({:.1}%)", color.name(), wins, pct);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config() -> SelfPlayConfig {
        SelfPlayConfig {
            num_games: 1,
            max_turns: 4,
            threads: 1,
            seed: 42,
            quiet: true,
            search: SearchConfig {
                trials: 200,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn deal_covers_board() {
        let mut rng = SmallRng::seed_from_u64(1);
        let state = deal(&mut rng, 30);
        assert!(state.validate().is_ok());
        let counts = territory_counts(&state);
        assert_eq!(counts, [11, 11, 10, 10]);
        for color in ALL_COLORS {
            assert_eq!(state.total_troops(color), 30);
        }
    }

    #[test]
    fn small_army_still_claims_one_each() {
        let mut rng = SmallRng::seed_from_u64(1);
        let state = deal(&mut rng, 5);
        assert!(state.validate().is_ok());
        assert_eq!(state.total_troops(Color::Red), 11);
    }

    #[test]
    fn play_single_game_completes() {
        let config = fast_config();
        let mut rng = SmallRng::seed_from_u64(42);
        let game = play_game(&config, 0, &mut rng);

        assert!(game.error.is_none(), "{:?}", game.error);
        assert!(!game.turns.is_empty());
        assert!(game.turns.len() <= config.max_turns);
        assert_eq!(game.final_territories.iter().sum::<usize>(), 42);
        assert_eq!(game.turns[0].color, Color::Red);
    }

    #[test]
    fn seeded_games_repeat() {
        let config = fast_config();
        let a = play_game(&config, 0, &mut SmallRng::seed_from_u64(9));
        let b = play_game(&config, 0, &mut SmallRng::seed_from_u64(9));
        assert_eq!(a.final_troops, b.final_troops);
        assert_eq!(a.final_territories, b.final_territories);
    }

    #[test]
    fn sequential_run_produces_correct_count() {
        let config = SelfPlayConfig {
            num_games: 2,
            ..fast_config()
        };
        let games = run_self_play(&config);
        assert_eq!(games.len(), 2);
    }

    #[test]
    fn parallel_run_produces_correct_count() {
        let config = SelfPlayConfig {
            num_games: 3,
            threads: 2,
            ..fast_config()
        };
        let games = run_self_play(&config);
        assert_eq!(games.len(), 3);
        let ids: Vec<usize> = games.iter().map(|g| g.game_id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn jsonl_output_is_valid() {
        let games = run_self_play(&fast_config());
        let mut buf = Vec::new();
        write_jsonl(&games, &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();

        assert_eq!(output.lines().count(), 1);
        for line in output.lines() {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(value["game_id"], 0);
            assert!(value["turns"].is_array());
            assert!(value["final_troops"].is_array());
        }
    }
}
