use std::fmt;

use anyhow::{bail, ensure, Context, Result};
use num::Integer;
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Open,
    Close,
    Regular(u32),
}

/// A snailfish number kept flat, so that "the nearest regular number to the left"
/// is just the previous `Regular` token.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Number(Vec<Token>);

impl Number {
    fn parse(text: &str) -> Result<Self> {
        let mut tokens = Vec::new();
        // Elements seen so far in each open pair.
        let mut open: Vec<u8> = Vec::new();
        let bytes = text.trim().as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            // Elements open a pair or follow its comma, commas follow an element.
            let previous = i.checked_sub(1).map(|p| bytes[p]);
            if matches!(bytes[i], b'[' | b'0'..=b'9') {
                ensure!(
                    matches!(previous, None | Some(b'[' | b',')),
                    "missing comma at {} in {:?}",
                    i,
                    text
                );
            }
            match bytes[i] {
                b'[' => {
                    tokens.push(Token::Open);
                    open.push(0);
                }
                b']' => {
                    ensure!(open.pop() == Some(2), "pair without two elements in {:?}", text);
                    tokens.push(Token::Close);
                    match open.last_mut() {
                        Some(count) => *count += 1,
                        None => ensure!(i + 1 == bytes.len(), "trailing input in {:?}", text),
                    }
                }
                b',' => ensure!(
                    open.last() == Some(&1) && matches!(previous, Some(b']' | b'0'..=b'9')),
                    "misplaced comma at {} in {:?}",
                    i,
                    text
                ),
                b'0'..=b'9' => {
                    let start = i;
                    while i + 1 < bytes.len() && bytes[i + 1].is_ascii_digit() {
                        i += 1;
                    }
                    let value = text.trim()[start..=i].parse()?;
                    tokens.push(Token::Regular(value));
                    let count = open
                        .last_mut()
                        .with_context(|| format!("bare number in {:?}", text))?;
                    *count += 1;
                }
                other => bail!("unexpected character {:?} in {:?}", other as char, text),
            }
            i += 1;
        }
        ensure!(
            open.is_empty() && tokens.first() == Some(&Token::Open),
            "unbalanced snailfish number {:?}",
            text
        );
        Ok(Self(tokens))
    }

    fn add(&self, other: &Self) -> Self {
        let mut tokens = Vec::with_capacity(self.0.len() + other.0.len() + 2);
        tokens.push(Token::Open);
        tokens.extend_from_slice(&self.0);
        tokens.extend_from_slice(&other.0);
        tokens.push(Token::Close);
        let mut sum = Self(tokens);
        sum.reduce();
        sum
    }

    fn reduce(&mut self) {
        while self.explode() || self.split() {}
    }

    fn explode(&mut self) -> bool {
        let mut depth = 0;
        let found = self.0.windows(4).position(|w| {
            match w[0] {
                Token::Open => depth += 1,
                Token::Close => depth -= 1,
                Token::Regular(_) => {}
            }
            depth > 4
                && matches!(
                    w,
                    [Token::Open, Token::Regular(_), Token::Regular(_), Token::Close]
                )
        });
        let Some(i) = found else {
            return false;
        };
        let (Token::Regular(left), Token::Regular(right)) = (self.0[i + 1], self.0[i + 2]) else {
            return false;
        };

        if let Some(Token::Regular(n)) = self.0[..i]
            .iter_mut()
            .rev()
            .find(|t| matches!(t, Token::Regular(_)))
        {
            *n += left;
        }
        if let Some(Token::Regular(n)) = self.0[i + 4..]
            .iter_mut()
            .find(|t| matches!(t, Token::Regular(_)))
        {
            *n += right;
        }
        self.0.splice(i..i + 4, [Token::Regular(0)]);
        true
    }

    fn split(&mut self) -> bool {
        let found = self
            .0
            .iter()
            .position(|t| matches!(t, Token::Regular(n) if *n >= 10));
        let Some(i) = found else {
            return false;
        };
        let Token::Regular(n) = self.0[i] else {
            return false;
        };
        self.0.splice(
            i..=i,
            [
                Token::Open,
                Token::Regular(n / 2),
                Token::Regular(Integer::div_ceil(&n, &2)),
                Token::Close,
            ],
        );
        true
    }

    fn magnitude(&self) -> u32 {
        let mut stack = Vec::new();
        for token in &self.0 {
            match *token {
                Token::Open => {}
                Token::Regular(n) => stack.push(n),
                Token::Close => {
                    let right = stack.pop().unwrap_or_default();
                    let left = stack.pop().unwrap_or_default();
                    stack.push(3 * left + 2 * right);
                }
            }
        }
        stack.pop().unwrap_or_default()
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut previous = None;
        for &token in &self.0 {
            if matches!(previous, Some(Token::Regular(_) | Token::Close))
                && token != Token::Close
            {
                f.write_str(",")?;
            }
            match token {
                Token::Open => f.write_str("[")?,
                Token::Close => f.write_str("]")?,
                Token::Regular(n) => write!(f, "{}", n)?,
            }
            previous = Some(token);
        }
        Ok(())
    }
}

fn parse_homework(input: &str) -> Result<Vec<Number>> {
    input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(Number::parse)
        .collect()
}

fn total(numbers: &[Number]) -> Result<Number> {
    let (first, rest) = numbers.split_first().context("empty homework")?;
    Ok(rest.iter().fold(first.clone(), |sum, n| sum.add(n)))
}

pub fn day18(input: &str) -> Result<(u32, u32)> {
    let numbers = parse_homework(input)?;
    let part1 = total(&numbers)?.magnitude();

    let numbers = &numbers;
    let part2 = (0..numbers.len())
        .into_par_iter()
        .flat_map_iter(move |i| {
            (0..numbers.len())
                .filter(move |&j| j != i)
                .map(move |j| numbers[i].add(&numbers[j]).magnitude())
        })
        .max()
        .context("need at least two numbers")?;
    Ok((part1, part2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_input;

    use indoc::indoc;

    fn reduced(text: &str) -> Result<String> {
        let mut number = Number::parse(text)?;
        number.reduce();
        Ok(number.to_string())
    }

    #[test]
    fn test_parse_display() -> Result<()> {
        let text = "[[[0,[5,8]],[[1,7],[9,6]]],[[4,[1,2]],[[1,4],2]]]";
        assert_eq!(Number::parse(text)?.to_string(), text);
        assert!(Number::parse("[1,2,3]").is_err());
        assert!(Number::parse("[1,[2]]").is_err());
        assert!(Number::parse("7").is_err());
        assert!(Number::parse("[1,2][3,4]").is_err());
        assert!(Number::parse("[[1,2][3,4]]").is_err());
        assert!(Number::parse("[[1,2]3]").is_err());
        assert!(Number::parse("[1,,2]").is_err());
        assert!(Number::parse("[,1,2]").is_err());
        Ok(())
    }

    #[test]
    fn test_explode() -> Result<()> {
        for (before, after) in [
            ("[[[[[9,8],1],2],3],4]", "[[[[0,9],2],3],4]"),
            ("[7,[6,[5,[4,[3,2]]]]]", "[7,[6,[5,[7,0]]]]"),
            ("[[6,[5,[4,[3,2]]]],1]", "[[6,[5,[7,0]]],3]"),
            (
                "[[3,[2,[1,[7,3]]]],[6,[5,[4,[3,2]]]]]",
                "[[3,[2,[8,0]]],[9,[5,[4,[3,2]]]]]",
            ),
        ] {
            let mut number = Number::parse(before)?;
            assert!(number.explode());
            assert_eq!(number.to_string(), after);
        }
        Ok(())
    }

    #[test]
    fn test_split() -> Result<()> {
        let mut number = Number::parse("[[[[0,7],4],[15,[0,13]]],[1,1]]")?;
        assert!(number.split());
        assert_eq!(number.to_string(), "[[[[0,7],4],[[7,8],[0,13]]],[1,1]]");
        assert!(number.split());
        assert_eq!(number.to_string(), "[[[[0,7],4],[[7,8],[0,[6,7]]]],[1,1]]");
        Ok(())
    }

    #[test]
    fn test_add() -> Result<()> {
        let sum = Number::parse("[[[[4,3],4],4],[7,[[8,4],9]]]")?.add(&Number::parse("[1,1]")?);
        assert_eq!(sum.to_string(), "[[[[0,7],4],[[7,8],[6,0]]],[8,1]]");
        assert_eq!(reduced("[[[[[4,3],4],4],[7,[[8,4],9]]],[1,1]]")?, sum.to_string());

        let list = parse_homework("[1,1]\n[2,2]\n[3,3]\n[4,4]\n[5,5]\n[6,6]\n")?;
        assert_eq!(
            total(&list)?.to_string(),
            "[[[[5,0],[7,4]],[5,5]],[6,6]]"
        );
        Ok(())
    }

    #[test]
    fn test_magnitude() -> Result<()> {
        for (text, expected) in [
            ("[[9,1],[1,9]]", 129),
            ("[[1,2],[[3,4],5]]", 143),
            ("[[[[0,7],4],[[7,8],[6,0]]],[8,1]]", 1384),
            ("[[[[1,1],[2,2]],[3,3]],[4,4]]", 445),
            ("[[[[3,0],[5,3]],[4,4]],[5,5]]", 791),
            ("[[[[5,0],[7,4]],[5,5]],[6,6]]", 1137),
            ("[[[[8,7],[7,7]],[[8,6],[7,7]]],[[[0,7],[6,6]],[8,7]]]", 3488),
        ] {
            assert_eq!(Number::parse(text)?.magnitude(), expected, "{}", text);
        }
        Ok(())
    }

    #[test]
    fn test_day18() -> Result<()> {
        let example = indoc! {"
            [[[0,[5,8]],[[1,7],[9,6]]],[[4,[1,2]],[[1,4],2]]]
            [[[5,[2,8]],4],[5,[[9,9],0]]]
            [6,[[[6,2],[5,6]],[[7,6],[4,7]]]]
            [[[6,[0,7]],[0,9]],[4,[9,[9,0]]]]
            [[[7,[6,4]],[3,[1,3]]],[[[5,5],1],9]]
            [[6,[[7,3],[3,2]]],[[[3,8],[5,7]],4]]
            [[[[5,4],[7,7]],8],[[8,3],8]]
            [[9,3],[[9,9],[6,[4,9]]]]
            [[2,[[7,7],7]],[[5,8],[[9,3],[0,2]]]]
            [[[[5,2],5],[8,[3,7]]],[[5,[7,5]],[4,4]]]
        "};
        let homework = parse_homework(example)?;
        assert_eq!(
            total(&homework)?.to_string(),
            "[[[[6,6],[7,6]],[[7,7],[7,0]]],[[[7,7],[7,7]],[[7,8],[9,9]]]]"
        );
        assert_eq!(day18(example)?, (4140, 3993));
        Ok(())
    }

    #[test]
    #[ignore = "needs inputs/18.txt"]
    fn test_day18_input() -> Result<()> {
        assert_eq!(day18(&default_input(18)?)?, (3793, 4695));
        Ok(())
    }
}
