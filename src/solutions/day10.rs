use anyhow::{bail, ensure, Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    /// First closing character that does not match its opener.
    Corrupted(u8),
    /// Openers still waiting to be closed, innermost last.
    Incomplete(Vec<u8>),
}

fn closer(opener: u8) -> u8 {
    match opener {
        b'(' => b')',
        b'[' => b']',
        b'{' => b'}',
        _ => b'>',
    }
}

fn check(line: &str) -> Result<Line> {
    let mut stack = Vec::new();
    for c in line.bytes() {
        match c {
            b'(' | b'[' | b'{' | b'<' => stack.push(c),
            b')' | b']' | b'}' | b'>' => match stack.pop() {
                Some(opener) if closer(opener) == c => {}
                _ => return Ok(Line::Corrupted(c)),
            },
            _ => bail!("unexpected character {:?}", c as char),
        }
    }
    Ok(Line::Incomplete(stack))
}

fn corruption_score(c: u8) -> u64 {
    match c {
        b')' => 3,
        b']' => 57,
        b'}' => 1197,
        _ => 25137,
    }
}

fn completion_score(stack: &[u8]) -> Result<u64> {
    stack.iter().rev().try_fold(0u64, |score, &opener| {
        let points = match closer(opener) {
            b')' => 1,
            b']' => 2,
            b'}' => 3,
            _ => 4,
        };
        score
            .checked_mul(5)
            .and_then(|score| score.checked_add(points))
            .with_context(|| format!("completion score overflows for {} openers", stack.len()))
    })
}

pub fn day10(input: &str) -> Result<(u64, u64)> {
    let mut corrupted = 0;
    let mut completions = Vec::new();
    for line in input.lines().map(str::trim).filter(|line| !line.is_empty()) {
        match check(line)? {
            Line::Corrupted(c) => corrupted += corruption_score(c),
            Line::Incomplete(stack) if !stack.is_empty() => {
                completions.push(completion_score(&stack)?)
            }
            Line::Incomplete(_) => {}
        }
    }

    ensure!(!completions.is_empty(), "no incomplete lines");
    completions.sort_unstable();
    Ok((corrupted, completions[completions.len() / 2]))
}
