//! End-to-end scenarios for the conquest library.
//!
//! Exercises allocation, odds, card trades, fortification, and the full
//! turn search on dealt and hand-built boards.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use conquest::board::{
    trade_cards, Card, CardKind, Color, Deck, GameState, Territory, ALL_COLORS, ALL_TERRITORIES,
};
use conquest::config::SearchConfig;
use conquest::engine::Game;
use conquest::eval::{evaluate, EvalWeights};
use conquest::movegen::{
    allocate_even, apply_attack_outcome, fortify_weakest, Action, ActionKind,
    ALL_ATTACK_STRATEGIES, MAX_ATTACK_BRANCHES,
};
use conquest::resolve::estimate_win_probability;
use conquest::search::search;
use conquest::selfplay::deal;

fn fast_config() -> SearchConfig {
    SearchConfig {
        trials: 500,
        ..Default::default()
    }
}

#[test]
fn even_allocation_is_exact() {
    let pool = &ALL_TERRITORIES[..9];
    for total in 0..60 {
        for len in 1..=pool.len() {
            let result = allocate_even(total, &pool[..len]);
            let sum: u32 = result.iter().map(|(_, n)| n).sum();
            assert_eq!(sum, total, "total {total} over {len}");
        }
    }
}

#[test]
fn odds_grow_with_attackers() {
    let mut prev = 0.0;
    for attackers in 2..=14 {
        let mut rng = SmallRng::seed_from_u64(17);
        let p = estimate_win_probability(attackers, 4, 20_000, &mut rng);
        assert!(p + 0.02 >= prev, "{attackers} attackers: {p} after {prev}");
        prev = p;
    }
    assert!(prev > 0.9);
}

#[test]
fn odds_are_stable_for_a_seed() {
    let a = estimate_win_probability(6, 3, 50_000, &mut SmallRng::seed_from_u64(3));
    let b = estimate_win_probability(6, 3, 50_000, &mut SmallRng::seed_from_u64(4));
    assert!((a - b).abs() < 0.02, "{a} vs {b}");
}

#[test]
fn trade_bonus_ladder() {
    let expected = [4, 6, 8, 10, 12, 12];
    for (matches_made, want) in expected.iter().enumerate() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut hand = vec![
            Card::new(Territory::Peru, CardKind::Infantry),
            Card::new(Territory::Egypt, CardKind::Infantry),
            Card::new(Territory::Congo, CardKind::Infantry),
        ];
        let mut deck = Deck::from_cards(Vec::new());
        let mut matches = matches_made as u32;
        let bonus = trade_cards(&mut hand, &mut deck, |_| false, &mut matches, &mut rng);
        assert_eq!(bonus, *want);
        assert_eq!(matches, matches_made as u32 + 1);
        assert!(hand.is_empty());
        assert_eq!(deck.len(), 3);
        assert_eq!(deck.count_of(&Card::new(Territory::Peru, CardKind::Infantry)), 1);
    }
}

#[test]
fn green_trades_first_match() {
    let mut state = GameState::empty();
    for (i, t) in ALL_TERRITORIES.iter().enumerate() {
        state.claim(*t, ALL_COLORS[i % 2], 3);
    }
    state.claim(Territory::China, Color::Green, 6);
    state.claim(Territory::Siam, Color::Green, 2);

    let mut game = Game::with_state(state, fast_config(), 5);
    let siam = Card::new(Territory::Siam, CardKind::Cavalry);
    game.hands[Color::Green as usize] = vec![
        siam,
        Card::new(Territory::NorthAfrica, CardKind::Infantry),
        Card::wild(),
        siam,
    ];
    game.deck = Deck::from_cards(Vec::new());

    let green = &mut game.hands[Color::Green as usize];
    let owned = |t: Territory| matches!(t, Territory::China | Territory::Siam);
    let mut rng = SmallRng::seed_from_u64(2);
    let bonus = trade_cards(green, &mut game.deck, owned, &mut game.matches_made, &mut rng);

    assert!(bonus > 0);
    assert_eq!(game.matches_made, 1);
    assert_eq!(game.hand(Color::Green), &[siam]);
    assert_eq!(game.deck.len(), 3);
}

#[test]
fn fortification_conserves_troops() {
    for seed in 1..20 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let state = deal(&mut rng, 30);
        for color in ALL_COLORS {
            let (next, transfers) = fortify_weakest(&state, color, 0.5);
            assert_eq!(next.troops_by_color(), state.troops_by_color());
            assert!(ALL_TERRITORIES.iter().all(|t| next.troops_on(*t) >= 1));
            for tr in &transfers {
                assert!(tr.troops > 0);
                assert_eq!(next.owner_of(tr.from), Some(color));
                assert_eq!(next.owner_of(tr.to), Some(color));
            }
        }
    }
}

#[test]
fn search_respects_depth_limit() {
    let mut rng = SmallRng::seed_from_u64(11);
    let state = deal(&mut rng, 30);
    for depth in 2..=5 {
        let config = SearchConfig {
            max_depth: depth,
            ..fast_config()
        };
        let result = search(Color::Red, &state, 0, &config, &mut rng, &mut Vec::new());
        assert!(result.layers <= depth);
        assert!(!result.actions.is_empty());
        assert!(result.actions.len() < depth as usize);
        let fortify_at = result
            .actions
            .iter()
            .position(|a| a.kind() == ActionKind::Fortify);
        if let Some(i) = fortify_at {
            assert_eq!(i, result.actions.len() - 1, "fortify must end the turn");
        }
        assert!(result.final_state.validate().is_ok());
    }
}

#[test]
fn single_troop_cannot_attack() {
    let mut state = GameState::empty();
    for t in ALL_TERRITORIES {
        state.claim(t, Color::Black, 5);
    }
    for t in [Territory::China, Territory::Siam, Territory::India, Territory::Mongolia] {
        state.claim(t, Color::Green, 1);
    }
    for strategy in ALL_ATTACK_STRATEGIES {
        assert!(strategy
            .candidates(Color::Green, &state, MAX_ATTACK_BRANCHES)
            .is_empty());
    }

    let config = SearchConfig {
        max_depth: 3,
        ..fast_config()
    };
    let mut rng = SmallRng::seed_from_u64(1);
    let result = search(Color::Green, &state, 0, &config, &mut rng, &mut Vec::new());
    assert!(result.actions.iter().all(|a| a.kind() != ActionKind::Attack));
}

#[test]
fn emptied_defender_changes_hands() {
    let mut state = GameState::empty();
    for t in ALL_TERRITORIES {
        state.claim(t, Color::Red, 2);
    }
    state.claim(Territory::China, Color::Green, 3);
    state.claim(Territory::India, Color::Red, 1);

    let (next, won) = apply_attack_outcome(&state, Territory::China, Territory::India, 0.4);
    assert!(won);
    assert_eq!(next.owner_of(Territory::India), Some(Color::Green));
    assert_eq!(next.troops_on(Territory::India), 1);
    assert_eq!(next.attack_counts[Territory::India as usize], 1);

    let edge = Action::Attack {
        from: Territory::China,
        to: Territory::India,
        won,
        probability: 0.4,
        strategy: ALL_ATTACK_STRATEGIES[0],
    };
    assert_eq!(edge.conquest(), Some((Territory::China, Territory::India)));
}

#[test]
fn winning_reward_dominates_evaluation() {
    let mut won = GameState::empty();
    for t in ALL_TERRITORIES {
        won.claim(t, Color::Green, 1_000);
    }
    let score = evaluate(&won, Color::Green, &EvalWeights::default());
    assert!(score.is_finite());
    assert!(score < f64::INFINITY);
}

#[test]
fn several_turns_keep_board_valid() {
    let mut rng = SmallRng::seed_from_u64(21);
    let state = deal(&mut rng, 30);
    let mut game = Game::with_state(state, fast_config(), 21);
    for _ in 0..8 {
        if game.state.is_terminal() {
            break;
        }
        let report = game.play_turn(&mut Vec::new()).unwrap();
        assert!(!report.actions.is_empty());
        assert!(game.state.validate().is_ok());
    }
    let held: usize = ALL_COLORS.iter().map(|c| game.state.territory_count(*c)).sum();
    assert_eq!(held, 42);
}
