use anyhow::{Context, Result};

fn parse_positions(input: &str) -> Result<Vec<i64>> {
    input
        .trim()
        .split(',')
        .map(|n| {
            n.trim()
                .parse()
                .with_context(|| format!("invalid position {:?}", n))
        })
        .collect()
}

fn cheapest_alignment(positions: &[i64], cost: impl Fn(i64) -> i64) -> Result<i64> {
    let min = *positions.iter().min().context("no crabs")?;
    let max = *positions.iter().max().context("no crabs")?;
    (min..=max)
        .map(|target| positions.iter().map(|p| cost((p - target).abs())).sum::<i64>())
        .min()
        .context("no alignment target")
}

pub fn day7(input: &str) -> Result<(i64, i64)> {
    let positions = parse_positions(input)?;
    let part1 = cheapest_alignment(&positions, |distance| distance)?;
    let part2 = cheapest_alignment(&positions, |distance| distance * (distance + 1) / 2)?;
    Ok((part1, part2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_input;

    #[test]
    fn test_day7() -> Result<()> {
        assert_eq!(day7("16,1,2,0,4,2,7,1,2,14\n")?, (37, 168));
        assert_eq!(day7("5")?, (0, 0));
        assert!(day7("").is_err());
        Ok(())
    }

    #[test]
    #[ignore = "needs inputs/7.txt"]
    fn test_day7_input() -> Result<()> {
        assert_eq!(day7(&default_input(7)?)?, (342641, 93006301));
        Ok(())
    }
}
