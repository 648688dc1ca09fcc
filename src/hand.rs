//! Card values and objective as entered by a player, and the Krypto deck
//! they are dealt from.

use std::fmt::Display;

use itertools::Itertools;
use rand::Rng;
use thiserror::Error;

use crate::solver::{Report, Solver};

pub const MIN_CARDS: usize = 2;
pub const MAX_CARDS: usize = 7;
/// Cards dealt per game, not counting the objective card.
pub const DEALT_CARDS: usize = 5;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum HandError {
    #[error("please provide {min} to {max} integers for the card values, got {0}", min = MIN_CARDS, max = MAX_CARDS)]
    TooFewCards(usize),
    #[error("too many card values ({0}); you'd be waiting a long time!")]
    TooManyCards(usize),
    #[error("'{0}' is not a card value")]
    InvalidCard(String),
    #[error("'{0}' is not an integer objective")]
    InvalidGoal(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    pub cards: Vec<i64>,
    pub goal: i64,
}

impl Hand {
    pub fn new(cards: Vec<i64>, goal: i64) -> Result<Self, HandError> {
        if cards.len() < MIN_CARDS {
            return Err(HandError::TooFewCards(cards.len()));
        }
        if cards.len() > MAX_CARDS {
            return Err(HandError::TooManyCards(cards.len()));
        }
        if let Some(card) = cards.iter().find(|&&card| card < 0) {
            return Err(HandError::InvalidCard(card.to_string()));
        }
        Ok(Self { cards, goal })
    }

    /// Parses whitespace separated card values and an objective.
    pub fn parse(cards: &str, goal: &str) -> Result<Self, HandError> {
        let goal = goal.trim();
        let goal = goal
            .parse()
            .map_err(|_| HandError::InvalidGoal(goal.to_string()))?;
        Self::new(parse_cards(cards)?, goal)
    }

    /// Parses `"1 2 3 4"` with `default_goal`, or `"1 2 3 4 = 10"`.
    pub fn parse_line(line: &str, default_goal: i64) -> Result<Self, HandError> {
        match line.split_once('=') {
            Some((cards, goal)) => Self::parse(cards, goal),
            None => Self::new(parse_cards(line)?, default_goal),
        }
    }

    pub fn solve(&self) -> Report {
        Solver::new(&self.cards).solve(self.goal)
    }
}

fn parse_cards(cards: &str) -> Result<Vec<i64>, HandError> {
    cards
        .split_whitespace()
        .map(|card| {
            card.parse::<u32>()
                .map(i64::from)
                .map_err(|_| HandError::InvalidCard(card.to_string()))
        })
        .collect()
}

impl Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.cards.iter().join(" "), self.goal)
    }
}

/// The 56 card Krypto deck: 1-6 three times each, 7-10 four times,
/// 11-17 twice and 18-25 once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<i64>,
}

impl Default for Deck {
    fn default() -> Self {
        let cards = [(1..=6, 3), (7..=10, 4), (11..=17, 2), (18..=25, 1)]
            .into_iter()
            .flat_map(|(values, copies)| (0..copies).flat_map(move |_| values.clone()))
            .collect();
        Self { cards }
    }
}

impl Deck {
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Draws five cards and an objective card without replacement.
    ///
    /// Returns `None` once the deck cannot cover a full deal.
    pub fn deal<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Hand> {
        if self.cards.len() <= DEALT_CARDS {
            return None;
        }
        let mut drawn = (0..=DEALT_CARDS)
            .map(|_| self.cards.remove(rng.gen_range(0..self.cards.len())))
            .collect_vec();
        let goal = drawn.pop()?;
        Some(Hand { cards: drawn, goal })
    }
}
