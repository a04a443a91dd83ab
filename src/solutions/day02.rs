use anyhow::{bail, Context, Result};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Forward(i64),
    Down(i64),
    Up(i64),
}

fn parse_commands(input: &str) -> Result<Vec<Command>> {
    let mut commands = Vec::new();
    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() {
            warn!("skipping empty line");
            continue;
        }

        let (direction, distance) = line
            .split_once(' ')
            .with_context(|| format!("malformed command {:?}", line))?;
        let distance = distance
            .trim()
            .parse()
            .with_context(|| format!("invalid distance in {:?}", line))?;
        commands.push(match direction {
            "forward" => Command::Forward(distance),
            "down" => Command::Down(distance),
            "up" => Command::Up(distance),
            _ => bail!("unknown direction {:?}", direction),
        });
    }
    Ok(commands)
}

fn follow_plainly(commands: &[Command]) -> i64 {
    let (mut position, mut depth) = (0, 0);
    for command in commands {
        match *command {
            Command::Forward(x) => position += x,
            Command::Down(x) => depth += x,
            Command::Up(x) => depth -= x,
        }
    }
    position * depth
}

fn follow_aim(commands: &[Command]) -> i64 {
    let (mut position, mut depth, mut aim) = (0, 0, 0);
    for command in commands {
        match *command {
            Command::Forward(x) => {
                position += x;
                depth += aim * x;
            }
            Command::Down(x) => aim += x,
            Command::Up(x) => aim -= x,
        }
        debug!(?command, position, depth, aim, "moved");
    }
    position * depth
}

pub fn day2(input: &str) -> Result<(i64, i64)> {
    let commands = parse_commands(input)?;
    Ok((follow_plainly(&commands), follow_aim(&commands)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_input;

    use indoc::indoc;

    #[test]
    fn test_day2() -> Result<()> {
        let example = indoc! {"
            forward 5
            down 5
            forward 8
            up 3

            down 8
            forward 2
        "};
        assert_eq!(day2(example)?, (150, 900));
        assert!(day2("backward 3\n").is_err());
        assert!(day2("forward x\n").is_err());
        Ok(())
    }

    #[test]
    #[ignore = "needs inputs/2.txt"]
    fn test_day2_input() -> Result<()> {
        assert_eq!(day2(&default_input(2)?)?, (2187380, 2086357770));
        Ok(())
    }
}
