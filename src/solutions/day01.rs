use anyhow::{ensure, Result};

use crate::{byte_lines, parse_u32_from_bytes};

pub fn day1(input: &str) -> Result<(usize, usize)> {
    let depths = byte_lines(input.as_bytes())
        .map(|line| {
            ensure!(
                line.len() <= 9 && line.iter().all(u8::is_ascii_digit),
                "invalid depth {:?}",
                String::from_utf8_lossy(line)
            );
            Ok(parse_u32_from_bytes(line))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((count_increases(&depths, 1), count_increases(&depths, 3)))
}

// Adjacent windows share all but their outermost elements, so only those need comparing.
fn count_increases(depths: &[usize], window: usize) -> usize {
    depths
        .windows(window + 1)
        .filter(|w| w[window] > w[0])
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_input;

    use indoc::indoc;

    #[test]
    fn test_day1() -> Result<()> {
        let example = indoc! {"
            199
            200
            208
            210
            200
            207
            240
            269
            260
            263
        "};
        assert_eq!(day1(example)?, (7, 5));
        assert_eq!(day1("1\n")?, (0, 0));
        assert!(day1("12\n-3\n").is_err());
        Ok(())
    }

    #[test]
    #[ignore = "needs inputs/1.txt"]
    fn test_day1_input() -> Result<()> {
        assert_eq!(day1(&default_input(1)?)?, (1139, 1103));
        Ok(())
    }
}
