use anyhow::{ensure, Context, Result};
use regex::Regex;
use rustc_hash::FxHashMap;

/// Sums of three rolls of the three-sided die and how many universes produce each.
const DIRAC_ROLLS: [(u8, u64); 7] = [(3, 1), (4, 3), (5, 6), (6, 7), (7, 6), (8, 3), (9, 1)];

fn parse(input: &str) -> Result<[u8; 2]> {
    let re = Regex::new(r"^Player ([12]) starting position: ([0-9]+)$")?;
    let mut positions = [None; 2];
    for line in input.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let caps = re
            .captures(line)
            .with_context(|| format!("invalid starting position {:?}", line))?;
        let player = caps[1].parse::<usize>()? - 1;
        let position = caps[2].parse::<u8>()?;
        ensure!((1..=10).contains(&position), "position {} off the board", position);
        positions[player] = Some(position);
    }
    Ok([
        positions[0].context("missing player 1")?,
        positions[1].context("missing player 2")?,
    ])
}

fn advance(position: u8, steps: u32) -> u8 {
    ((u32::from(position) - 1 + steps) % 10 + 1) as u8
}

/// Loser's score times the number of deterministic die rolls.
fn practice(mut positions: [u8; 2]) -> u32 {
    let mut scores = [0u32; 2];
    let mut rolls = 0;
    let mut player = 0;
    loop {
        let steps = (0..3).map(|i| (rolls + i) % 100 + 1).sum();
        rolls += 3;
        positions[player] = advance(positions[player], steps);
        scores[player] += u32::from(positions[player]);
        if scores[player] >= 1000 {
            return scores[1 - player] * rolls;
        }
        player = 1 - player;
    }
}

type Universe = (u8, u8, u8, u8);

struct Multiverse {
    memo: FxHashMap<Universe, [u64; 2]>,
}

impl Multiverse {
    /// Wins for the player about to move and for the other one.
    fn wins(&mut self, universe: Universe) -> [u64; 2] {
        if let Some(&wins) = self.memo.get(&universe) {
            return wins;
        }
        let (position, score, other_position, other_score) = universe;
        let mut wins = [0, 0];
        for (steps, count) in DIRAC_ROLLS {
            let position = advance(position, u32::from(steps));
            let score = score + position;
            if score >= 21 {
                wins[0] += count;
            } else {
                let [theirs, ours] = self.wins((other_position, other_score, position, score));
                wins[0] += ours * count;
                wins[1] += theirs * count;
            }
        }
        self.memo.insert(universe, wins);
        wins
    }
}

pub fn day21(input: &str) -> Result<(u32, u64)> {
    let positions = parse(input)?;
    let mut multiverse = Multiverse {
        memo: FxHashMap::default(),
    };
    let wins = multiverse.wins((positions[0], 0, positions[1], 0));
    tracing::debug!(
        "player 1 wins in {} universes, player 2 in {}",
        wins[0],
        wins[1]
    );
    Ok((practice(positions), wins[0].max(wins[1])))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_input;

    use indoc::indoc;

    #[test]
    fn test_day21() -> Result<()> {
        let example = indoc! {"
            Player 1 starting position: 4
            Player 2 starting position: 8
        "};
        assert_eq!(day21(example)?, (739785, 444356092776315));

        let other = indoc! {"
            Player 1 starting position: 10
            Player 2 starting position: 2
        "};
        assert_eq!(day21(other)?, (916083, 49982165861983));
        Ok(())
    }

    #[test]
    fn test_parse_errors() {
        assert!(day21("Player 1 starting position: 4\n").is_err());
        assert!(day21("Player 1 starting position: 11\nPlayer 2 starting position: 1\n").is_err());
    }

    #[test]
    #[ignore = "needs inputs/21.txt"]
    fn test_day21_input() -> Result<()> {
        assert_eq!(day21(&default_input(21)?)?, (916083, 49982165861983));
        Ok(())
    }
}
