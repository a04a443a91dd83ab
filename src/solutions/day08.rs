use anyhow::{ensure, Context, Result};

/// Segments `a`..=`g` as bits 0..=6.
type Pattern = u8;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    signals: [Pattern; 10],
    outputs: [Pattern; 4],
}

fn parse_pattern(text: &str) -> Result<Pattern> {
    let mut pattern = 0;
    for b in text.bytes() {
        ensure!((b'a'..=b'g').contains(&b), "invalid segment in {:?}", text);
        pattern |= 1 << (b - b'a');
    }
    Ok(pattern)
}

fn parse_patterns<const N: usize>(text: &str) -> Result<[Pattern; N]> {
    let patterns = text
        .split_whitespace()
        .map(parse_pattern)
        .collect::<Result<Vec<_>>>()?;
    let len = patterns.len();
    let patterns: Result<[Pattern; N], _> = patterns.try_into();
    patterns
        .ok()
        .with_context(|| format!("expected {} patterns, found {}", N, len))
}

fn parse_entries(input: &str) -> Result<Vec<Entry>> {
    input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let (signals, outputs) = line
                .split_once('|')
                .with_context(|| format!("missing separator in {:?}", line))?;
            Ok(Entry {
                signals: parse_patterns(signals)?,
                outputs: parse_patterns(outputs)?,
            })
        })
        .collect()
}

fn segments(pattern: Pattern) -> u32 {
    pattern.count_ones()
}

fn exactly_one(mut candidates: impl Iterator<Item = Pattern>, digit: u8) -> Result<Pattern> {
    let found = candidates
        .next()
        .with_context(|| format!("no pattern for digit {}", digit))?;
    ensure!(
        candidates.next().is_none(),
        "ambiguous patterns for digit {}",
        digit
    );
    Ok(found)
}

/// Index `d` holds the scrambled pattern that displays digit `d`.
fn crack(signals: &[Pattern; 10]) -> Result<[Pattern; 10]> {
    let with_len = |n: u32| signals.iter().copied().filter(move |&p| segments(p) == n);

    let one = exactly_one(with_len(2), 1)?;
    let four = exactly_one(with_len(4), 4)?;
    let seven = exactly_one(with_len(3), 7)?;
    let eight = exactly_one(with_len(7), 8)?;

    let three = exactly_one(with_len(5).filter(|&p| p & one == one), 3)?;
    let six = exactly_one(with_len(6).filter(|&p| p & one != one), 6)?;

    let b = four & !three;
    ensure!(segments(b) == 1, "cannot isolate segment b");
    let two = exactly_one(with_len(5).filter(|&p| p != three && p & b == 0), 2)?;
    let five = exactly_one(with_len(5).filter(|&p| p != three && p & b != 0), 5)?;

    let e = six & !five;
    ensure!(segments(e) == 1, "cannot isolate segment e");
    let zero = exactly_one(with_len(6).filter(|&p| p != six && p & e != 0), 0)?;
    let nine = exactly_one(with_len(6).filter(|&p| p != six && p & e == 0), 9)?;

    Ok([zero, one, two, three, four, five, six, seven, eight, nine])
}

fn decode(outputs: &[Pattern], key: &[Pattern; 10]) -> Result<u32> {
    let mut value = 0;
    for pattern in outputs {
        let digit = key
            .iter()
            .position(|k| k == pattern)
            .with_context(|| format!("pattern {:#09b} is not a digit", pattern))?;
        value = value * 10 + digit as u32;
    }
    Ok(value)
}

pub fn day8(input: &str) -> Result<(usize, u32)> {
    let entries = parse_entries(input)?;

    let part1 = entries
        .iter()
        .flat_map(|entry| entry.outputs)
        .filter(|&p| matches!(segments(p), 2 | 3 | 4 | 7))
        .count();

    let mut part2 = 0;
    for entry in &entries {
        part2 += decode(&entry.outputs, &crack(&entry.signals)?)?;
    }
    Ok((part1, part2))
}
