use anyhow::{ensure, Context, Result};

const SPAWN_TIMER: usize = 8;
const RESET_TIMER: usize = 6;

/// Fish are counted per timer value, individual fish are indistinguishable.
fn parse_school(input: &str) -> Result<[u64; SPAWN_TIMER + 1]> {
    let mut school = [0; SPAWN_TIMER + 1];
    for timer in input.trim().split(',') {
        let timer: usize = timer
            .trim()
            .parse()
            .with_context(|| format!("invalid timer {:?}", timer))?;
        ensure!(timer <= SPAWN_TIMER, "timer {} is out of range", timer);
        school[timer] += 1;
    }
    Ok(school)
}

fn population(mut school: [u64; SPAWN_TIMER + 1], days: usize) -> u64 {
    for _ in 0..days {
        school.rotate_left(1);
        school[RESET_TIMER] += school[SPAWN_TIMER];
    }
    school.iter().sum()
}

pub fn day6(input: &str) -> Result<(u64, u64)> {
    let school = parse_school(input)?;
    Ok((population(school, 80), population(school, 256)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_input;

    #[test]
    fn test_day6() -> Result<()> {
        let example = "3,4,3,1,2\n";
        assert_eq!(population(parse_school(example)?, 18), 26);
        assert_eq!(day6(example)?, (5934, 26984457539));
        assert!(day6("3,9").is_err());
        Ok(())
    }

    #[test]
    #[ignore = "needs inputs/6.txt"]
    fn test_day6_input() -> Result<()> {
        assert_eq!(day6(&default_input(6)?)?, (372300, 1675781200288));
        Ok(())
    }
}
