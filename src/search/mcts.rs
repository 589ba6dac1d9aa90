//! UCB tree search over one turn.
//!
//! Each cycle selects a node by UCB, expands its legal actions, estimates
//! its value with a short random descent, and backpropagates the reward.
//! The search stops when the tree reaches its depth limit or right after a
//! fortification branch is backpropagated. The committed turn follows the
//! most visited child from the root down to a leaf.

use std::collections::HashSet;
use std::io::Write;
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::Rng;
use tracing::{debug, trace};

use crate::board::{Color, GameState, Territory};
use crate::config::SearchConfig;
use crate::eval::evaluate;
use crate::movegen::{
    apply_attack_outcome, apply_placements, base_placement, fortify_weakest, post_win_transfer,
    Action, ActionKind,
};
use crate::resolve::ProbabilityTable;

use super::legal::legal_actions;
use super::tree::{NodeId, SearchTree};

/// Outcome of a turn search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Actions on the committed path, root first.
    pub actions: Vec<Action>,
    /// Board after the last committed action.
    pub final_state: GameState,
    /// Evaluation of `final_state`.
    pub score: f64,
    /// Nodes in the tree when the search stopped.
    pub nodes: usize,
    /// Select/expand/simulate/backpropagate cycles run.
    pub iterations: u32,
    /// Layers of the tree, root included.
    pub layers: u32,
}

/// UCB score of a child: its evaluation plus an exploration bonus.
/// A parent that was never visited counts as visited once.
#[inline]
pub fn ucb_score(score: f64, parent_visits: u64, child_visits: u64, exploration: f64) -> f64 {
    let n = child_visits.max(1) as f64;
    let big_n = parent_visits.max(1) as f64;
    score + exploration * (big_n.ln() / n).sqrt()
}

/// Descends from the root and returns the node to expand.
///
/// Fortification children never compete: they are only entered when they
/// are a node's sole child. The first unvisited candidate is taken as is;
/// otherwise the best UCB score wins, earliest child first on ties. Every
/// node entered gains one visit.
pub fn select(tree: &mut SearchTree, exploration: f64) -> NodeId {
    let mut current = tree.root();
    loop {
        let node = tree.get(current);
        if node.is_leaf() {
            return current;
        }
        let candidates: Vec<NodeId> = node
            .children
            .iter()
            .copied()
            .filter(|c| tree.get(*c).kind() != Some(ActionKind::Fortify))
            .collect();

        if let Some(&fresh) = candidates.iter().find(|c| tree.get(**c).visits == 0) {
            tree.get_mut(fresh).visits = 1;
            return fresh;
        }

        let next = if candidates.is_empty() {
            node.children[0]
        } else {
            let parent_visits = node.visits;
            let mut best = candidates[0];
            let mut best_score = f64::NEG_INFINITY;
            for &c in &candidates {
                let child = tree.get(c);
                let s = ucb_score(child.score, parent_visits, child.visits, exploration);
                if s > best_score {
                    best_score = s;
                    best = c;
                }
            }
            best
        };
        tree.get_mut(next).visits += 1;
        current = next;
    }
}

/// Estimates the value of `id` by descending through random children until
/// a leaf. Returns the reward and the number of steps taken. A leaf where
/// `color` holds the whole map is worth `+inf`. With no legal actions the
/// node's own evaluation is returned with zero steps.
pub fn simulate(
    tree: &SearchTree,
    id: NodeId,
    legal: usize,
    color: Color,
    rng: &mut impl Rng,
) -> (f64, u64) {
    if legal == 0 {
        return (tree.get(id).score, 0);
    }
    let mut current = id;
    let mut steps = 0u64;
    loop {
        let node = tree.get(current);
        if node.is_leaf() {
            break;
        }
        current = node.children[rng.gen_range(0..node.children.len())];
        steps += 1;
    }
    let leaf = tree.get(current);
    if leaf.state.is_won_by(color) {
        (f64::INFINITY, steps)
    } else {
        (leaf.score, steps)
    }
}

/// Per-search context: the color to move, its card bonus, and the combat
/// odds memo.
struct Planner<'a> {
    color: Color,
    card_bonus: u32,
    config: &'a SearchConfig,
    odds: ProbabilityTable,
    tree: SearchTree,
}

impl<'a> Planner<'a> {
    fn new(color: Color, state: &GameState, card_bonus: u32, config: &'a SearchConfig) -> Self {
        let score = evaluate(state, color, &config.eval);
        Planner {
            color,
            card_bonus,
            config,
            odds: ProbabilityTable::new(config.trials),
            tree: SearchTree::new(state.clone(), score),
        }
    }

    fn score(&self, state: &GameState) -> f64 {
        evaluate(state, self.color, &self.config.eval)
    }

    /// Generates the children of `id`. Returns the number of legal action
    /// kinds, which is zero for nodes already expanded.
    fn expand(&mut self, id: NodeId, rng: &mut SmallRng) -> usize {
        let node = self.tree.get(id);
        if node.expanded {
            return 0;
        }
        let remaining = self.config.max_depth.saturating_sub(1 + node.depth);
        let kinds = legal_actions(node.kind(), remaining);
        let state = node.state.clone();
        let prev = node.action.clone();

        let mut children: Vec<(Action, GameState)> = Vec::new();
        for &kind in &kinds {
            match kind {
                ActionKind::Place => self.expand_place(&state, &mut children),
                ActionKind::Attack => self.expand_attack(&state, rng, &mut children),
                ActionKind::AttackContinue => {
                    if let Some((from, to)) = prev.as_ref().and_then(Action::conquest) {
                        if let Some((next, troops)) =
                            post_win_transfer(&state, from, to, &self.config.transfer)
                        {
                            children.push((Action::AttackContinue { from, to, troops }, next));
                        }
                    }
                }
                ActionKind::Fortify => {
                    let (next, transfers) =
                        fortify_weakest(&state, self.color, self.config.fortify_share);
                    children.push((Action::Fortify { transfers }, next));
                }
            }
        }

        for (action, next) in children {
            let score = self.score(&next);
            self.tree.add_child(id, action, next, score);
        }
        self.tree.get_mut(id).expanded = true;
        kinds.len()
    }

    fn expand_place(&self, state: &GameState, children: &mut Vec<(Action, GameState)>) {
        let troops = base_placement(state, self.color) + self.card_bonus;
        let placements = self.config.reinforcement.allocate(troops, state, self.color);
        if placements.is_empty() {
            return;
        }
        let mut next = state.clone();
        apply_placements(&mut next, self.color, &placements);
        children.push((
            Action::Place {
                troops,
                card_bonus: self.card_bonus,
                placements,
            },
            next,
        ));
    }

    /// Adds one child per distinct `(from, to)` pair. A pair proposed by
    /// several strategies keeps the first strategy's label.
    fn expand_attack(
        &mut self,
        state: &GameState,
        rng: &mut SmallRng,
        children: &mut Vec<(Action, GameState)>,
    ) {
        let mut seen: HashSet<(Territory, Territory)> = HashSet::new();
        for &strategy in &self.config.attack_strategies {
            let candidates =
                strategy.candidates(self.color, state, self.config.max_attack_branches);
            for c in candidates {
                if !seen.insert((c.from, c.to)) {
                    continue;
                }
                let p = self.odds.get(c.attacker, c.defender, rng);
                let (next, won) = apply_attack_outcome(state, c.from, c.to, p);
                children.push((
                    Action::Attack {
                        from: c.from,
                        to: c.to,
                        won,
                        probability: p,
                        strategy,
                    },
                    next,
                ));
            }
        }
    }

    fn run(&mut self, rng: &mut SmallRng) -> u32 {
        let mut iterations = 0;
        while self.tree.layers() < self.config.max_depth {
            if iterations >= self.config.max_iterations {
                debug!(iterations, "search stopped at the iteration cap");
                break;
            }
            iterations += 1;

            let selected = select(&mut self.tree, self.config.exploration);
            let legal = self.expand(selected, rng);
            let (reward, steps) = simulate(&self.tree, selected, legal, self.color, rng);
            self.tree.backpropagate(selected, reward, steps);
            trace!(
                iteration = iterations,
                node = selected.0,
                legal,
                reward,
                steps,
                "search cycle"
            );

            if self.tree.get(selected).kind() == Some(ActionKind::Fortify) {
                break;
            }
        }
        iterations
    }
}

/// Plans the turn of `color` from `state`.
///
/// `card_bonus` is the troop bonus a card trade would yield this turn; it is
/// added to every placement the search considers. Writes an
/// `info depth .. nodes .. score .. time ..` line to `out` when done.
pub fn search<W: Write>(
    color: Color,
    state: &GameState,
    card_bonus: u32,
    config: &SearchConfig,
    rng: &mut SmallRng,
    out: &mut W,
) -> SearchResult {
    let start = Instant::now();
    let mut planner = Planner::new(color, state, card_bonus, config);
    let iterations = planner.run(rng);

    let tree = &planner.tree;
    let path = tree.best_path();
    let actions: Vec<Action> = path
        .iter()
        .filter_map(|id| tree.get(*id).action.clone())
        .collect();
    let leaf = tree.get(path.last().copied().unwrap_or(tree.root()));

    let result = SearchResult {
        actions,
        final_state: leaf.state.clone(),
        score: leaf.score,
        nodes: tree.len(),
        iterations,
        layers: tree.layers(),
    };

    let elapsed_ms = start.elapsed().as_millis() as u64;
    let _ = writeln!(
        out,
        "info depth {} nodes {} score {} time {}",
        result.layers, result.nodes, result.score as i32, elapsed_ms
    );
    debug!(
        color = color.name(),
        nodes = result.nodes,
        iterations,
        odds_cached = planner.odds.len(),
        odds_hits = planner.odds.hits(),
        "search complete"
    );
    result
}
