use anyhow::{ensure, Context, Result};

use crate::byte_lines;

fn parse_report(input: &str) -> Result<Vec<&[u8]>> {
    let lines: Vec<_> = byte_lines(input.as_bytes()).collect();
    let width = lines.first().context("empty diagnostic report")?.len();
    ensure!(width < 64, "diagnostic numbers are {} bits wide", width);
    for line in &lines {
        ensure!(
            line.len() == width && line.iter().all(|b| matches!(b, b'0' | b'1')),
            "invalid diagnostic number {:?}",
            String::from_utf8_lossy(line)
        );
    }
    Ok(lines)
}

fn to_number(bits: &[u8]) -> u64 {
    bits.iter().fold(0, |acc, &b| acc << 1 | u64::from(b == b'1'))
}

fn ones_in_column(lines: &[&[u8]], column: usize) -> usize {
    lines.iter().filter(|line| line[column] == b'1').count()
}

fn power_consumption(lines: &[&[u8]]) -> Result<u64> {
    let width = lines[0].len();
    let mut gamma = 0;
    for column in 0..width {
        let ones = ones_in_column(lines, column);
        let zeros = lines.len() - ones;
        ensure!(ones != zeros, "column {} has no most common bit", column);
        gamma = gamma << 1 | u64::from(ones > zeros);
    }
    let epsilon = !gamma & ((1 << width) - 1);
    Ok(gamma * epsilon)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Criteria {
    MostCommon,
    LeastCommon,
}

fn rating(lines: &[&[u8]], criteria: Criteria) -> Result<u64> {
    let mut remaining = lines.to_vec();
    for column in 0..lines[0].len() {
        if remaining.len() == 1 {
            break;
        }
        let ones = ones_in_column(&remaining, column);
        if ones == 0 || ones == remaining.len() {
            // Every candidate agrees, there is nothing to filter on.
            continue;
        }
        let most_common = if 2 * ones >= remaining.len() { b'1' } else { b'0' };
        let keep = match (criteria, most_common) {
            (Criteria::MostCommon, bit) => bit,
            (Criteria::LeastCommon, b'1') => b'0',
            (Criteria::LeastCommon, _) => b'1',
        };
        remaining.retain(|line| line[column] == keep);
    }
    ensure!(
        remaining.len() == 1,
        "{:?} rating matches {} numbers",
        criteria,
        remaining.len()
    );
    Ok(to_number(remaining[0]))
}

pub fn day3(input: &str) -> Result<(u64, u64)> {
    let lines = parse_report(input)?;
    let oxygen = rating(&lines, Criteria::MostCommon)?;
    let co2 = rating(&lines, Criteria::LeastCommon)?;
    Ok((power_consumption(&lines)?, oxygen * co2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_input;

    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        00100
        11110
        10110
        10111
        10101
        01111
        00111
        11100
        10000
        11001
        00010
        01010
    "};

    #[test]
    fn test_ratings() -> Result<()> {
        let lines = parse_report(EXAMPLE)?;
        assert_eq!(rating(&lines, Criteria::MostCommon)?, 23);
        assert_eq!(rating(&lines, Criteria::LeastCommon)?, 10);
        Ok(())
    }

    #[test]
    fn test_day3() -> Result<()> {
        assert_eq!(day3(EXAMPLE)?, (198, 230));
        assert!(day3("01\n10\n").is_err());
        assert!(day3("012\n").is_err());
        Ok(())
    }

    #[test]
    #[ignore = "needs inputs/3.txt"]
    fn test_day3_input() -> Result<()> {
        assert_eq!(day3(&default_input(3)?)?, (2954600, 1662846));
        Ok(())
    }
}
