use anyhow::{ensure, Context, Result};
use regex::Regex;
use rustc_hash::FxHashMap;

type Pair = [u8; 2];

struct Polymer {
    pairs: FxHashMap<Pair, u64>,
    /// Pairs only track their left element, so the final one is counted separately.
    last: u8,
}

fn parse(input: &str) -> Result<(Polymer, FxHashMap<Pair, u8>)> {
    let mut lines = input.lines().map(str::trim).filter(|line| !line.is_empty());
    let template = lines.next().context("missing polymer template")?.as_bytes();
    ensure!(
        template.iter().all(u8::is_ascii_uppercase),
        "invalid polymer template"
    );
    let last = *template.last().context("empty polymer template")?;

    let mut pairs = FxHashMap::default();
    for pair in template.windows(2) {
        *pairs.entry([pair[0], pair[1]]).or_default() += 1;
    }

    let rule_re = Regex::new(r"^([A-Z])([A-Z]) -> ([A-Z])$")?;
    let rules = lines
        .map(|line| {
            let caps = rule_re
                .captures(line)
                .with_context(|| format!("invalid insertion rule {:?}", line))?;
            Ok(([caps[1].as_bytes()[0], caps[2].as_bytes()[0]], caps[3].as_bytes()[0]))
        })
        .collect::<Result<_>>()?;
    Ok((Polymer { pairs, last }, rules))
}

impl Polymer {
    fn step(&mut self, rules: &FxHashMap<Pair, u8>) {
        let mut next = FxHashMap::default();
        for (&[left, right], &count) in &self.pairs {
            match rules.get(&[left, right]) {
                Some(&middle) => {
                    *next.entry([left, middle]).or_default() += count;
                    *next.entry([middle, right]).or_default() += count;
                }
                None => *next.entry([left, right]).or_default() += count,
            }
        }
        self.pairs = next;
    }

    /// Most common minus least common element count.
    fn spread(&self) -> u64 {
        let mut counts: FxHashMap<u8, u64> = FxHashMap::default();
        *counts.entry(self.last).or_default() += 1;
        for (&[left, _], &count) in &self.pairs {
            *counts.entry(left).or_default() += count;
        }
        let max = counts.values().max().copied().unwrap_or_default();
        let min = counts.values().min().copied().unwrap_or_default();
        max - min
    }
}

pub fn day14(input: &str) -> Result<(u64, u64)> {
    let (mut polymer, rules) = parse(input)?;
    for _ in 0..10 {
        polymer.step(&rules);
    }
    let part1 = polymer.spread();
    for _ in 10..40 {
        polymer.step(&rules);
    }
    Ok((part1, polymer.spread()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_input;

    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        NNCB

        CH -> B
        HH -> N
        CB -> H
        NH -> C
        HB -> C
        HC -> B
        HN -> C
        NN -> C
        BH -> H
        NC -> B
        NB -> B
        BN -> B
        BB -> N
        BC -> B
        CC -> N
        CN -> C
    "};

    #[test]
    fn test_day14() -> Result<()> {
        assert_eq!(day14(EXAMPLE)?, (1588, 2188189693529));
        Ok(())
    }

    #[test]
    fn test_pairs_without_rule_are_kept() -> Result<()> {
        let (mut polymer, rules) = parse("ABA\n\nAB -> C\n")?;
        polymer.step(&rules);
        // ACBA
        assert_eq!(polymer.pairs.values().sum::<u64>(), 3);
        assert_eq!(polymer.pairs.get(b"BA"), Some(&1));
        assert_eq!(polymer.spread(), 1);
        Ok(())
    }

    #[test]
    #[ignore = "needs inputs/14.txt"]
    fn test_day14_input() -> Result<()> {
        assert_eq!(day14(&default_input(14)?)?, (2233, 2884513602164));
        Ok(())
    }
}
