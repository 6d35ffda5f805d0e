use std::cmp::Ordering;

use crate::cards::Card;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HandStrength {
    pub category: Category,
    // kickers: ordered high -> low for tiebreaks
    pub kickers: [u8; 5],
}

/// Largest value `packed` can produce; scores are measured down from it.
const MAX_PACKED: u32 = (1 << 24) - 1;

impl HandStrength {
    fn packed(&self) -> u32 {
        self.kickers
            .iter()
            .fold(self.category as u32, |acc, &k| (acc << 4) | k as u32)
    }

    /// Comparable score where lower is stronger.
    pub fn score(&self) -> u32 {
        MAX_PACKED - self.packed()
    }
}

/// Scores a showdown hand. Lower scores are stronger.
pub trait HandEvaluator {
    fn evaluate(&self, board: &[Card], hole: &[Card; 2]) -> u32;
}

impl<F> HandEvaluator for F
where
    F: Fn(&[Card], &[Card; 2]) -> u32,
{
    fn evaluate(&self, board: &[Card], hole: &[Card; 2]) -> u32 {
        self(board, hole)
    }
}

/// Best-five-of-seven evaluator built on [`evaluate_hand`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardEvaluator;

impl HandEvaluator for StandardEvaluator {
    fn evaluate(&self, board: &[Card], hole: &[Card; 2]) -> u32 {
        let mut cards = Vec::with_capacity(board.len() + 2);
        cards.extend_from_slice(hole);
        cards.extend_from_slice(board);
        evaluate_hand(&cards).score()
    }
}

/// Evaluates the best five-card hand contained in `cards` (5 to 7 cards).
pub fn evaluate_hand(cards: &[Card]) -> HandStrength {
    debug_assert!(
        (5..=7).contains(&cards.len()),
        "evaluate_hand expects 5..=7 cards, got {}",
        cards.len()
    );

    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut rank_mask: u16 = 0;
    let mut suit_masks = [0u16; 4];
    let mut suit_counts = [0u8; 4];
    for c in cards {
        let r = c.rank.value();
        rank_counts[r as usize] += 1;
        rank_mask |= 1 << r;
        let s = c.suit.index();
        suit_counts[s] += 1;
        suit_masks[s] |= 1 << r;
    }

    let flush_suit = suit_counts.iter().position(|&n| n >= 5);

    if let Some(s) = flush_suit {
        if let Some(high) = straight_high(suit_masks[s]) {
            return HandStrength {
                category: Category::StraightFlush,
                kickers: [high, 0, 0, 0, 0],
            };
        }
    }

    // rank groups ordered by (count, rank) descending
    let mut groups: Vec<(u8, u8)> = (2..=14u8)
        .rev()
        .filter(|&r| rank_counts[r as usize] > 0)
        .map(|r| (rank_counts[r as usize], r))
        .collect();
    groups.sort_unstable_by(|a, b| b.cmp(a));

    let (top_count, top_rank) = groups[0];

    if top_count == 4 {
        let kicker = highest_excluding(&groups, &[top_rank]);
        return HandStrength {
            category: Category::FourOfAKind,
            kickers: [top_rank, kicker, 0, 0, 0],
        };
    }

    if top_count == 3 {
        // a second trips counts as the pair
        if let Some(&(_, pair)) = groups[1..].iter().find(|(n, _)| *n >= 2) {
            return HandStrength {
                category: Category::FullHouse,
                kickers: [top_rank, pair, 0, 0, 0],
            };
        }
    }

    if let Some(s) = flush_suit {
        return HandStrength {
            category: Category::Flush,
            kickers: top_ranks(suit_masks[s], &[]),
        };
    }

    if let Some(high) = straight_high(rank_mask) {
        return HandStrength {
            category: Category::Straight,
            kickers: [high, 0, 0, 0, 0],
        };
    }

    if top_count == 3 {
        let rest = top_ranks(rank_mask, &[top_rank]);
        return HandStrength {
            category: Category::ThreeOfAKind,
            kickers: [top_rank, rest[0], rest[1], 0, 0],
        };
    }

    if top_count == 2 && groups.len() > 1 && groups[1].0 == 2 {
        let (high, low) = (top_rank, groups[1].1);
        // a third pair can still play as the kicker
        let kicker = highest_excluding(&groups, &[high, low]);
        return HandStrength {
            category: Category::TwoPair,
            kickers: [high, low, kicker, 0, 0],
        };
    }

    if top_count == 2 {
        let rest = top_ranks(rank_mask, &[top_rank]);
        return HandStrength {
            category: Category::OnePair,
            kickers: [top_rank, rest[0], rest[1], rest[2], 0],
        };
    }

    HandStrength {
        category: Category::HighCard,
        kickers: top_ranks(rank_mask, &[]),
    }
}

pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.kickers.cmp(&b.kickers),
        ord => ord,
    }
}

fn straight_high(mask: u16) -> Option<u8> {
    // Ace also plays low
    let m = if mask & (1 << 14) != 0 {
        mask | (1 << 1)
    } else {
        mask
    };
    (5..=14u8).rev().find(|&high| {
        let window = 0b1_1111u16 << (high - 4);
        m & window == window
    })
}

fn highest_excluding(groups: &[(u8, u8)], excluded: &[u8]) -> u8 {
    groups
        .iter()
        .map(|&(_, r)| r)
        .filter(|r| !excluded.contains(r))
        .max()
        .unwrap_or(0)
}

fn top_ranks(mask: u16, excluded: &[u8]) -> [u8; 5] {
    let mut k = [0u8; 5];
    let ranks = (2..=14u8)
        .rev()
        .filter(|&r| mask & (1 << r) != 0 && !excluded.contains(&r));
    for (slot, r) in k.iter_mut().zip(ranks) {
        *slot = r;
    }
    k
}
