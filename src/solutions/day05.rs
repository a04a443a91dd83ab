use anyhow::{ensure, Context, Result};
use rustc_hash::FxHashMap;

type Point = (i32, i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Vent {
    tail: Point,
    head: Point,
}

impl Vent {
    fn is_diagonal(&self) -> bool {
        self.tail.0 != self.head.0 && self.tail.1 != self.head.1
    }

    fn points(&self) -> impl Iterator<Item = Point> {
        let dx = (self.head.0 - self.tail.0).signum();
        let dy = (self.head.1 - self.tail.1).signum();
        let len = (self.head.0 - self.tail.0)
            .abs()
            .max((self.head.1 - self.tail.1).abs());
        let (x, y) = self.tail;
        (0..=len).map(move |i| (x + i * dx, y + i * dy))
    }
}

fn parse_point(text: &str) -> Result<Point> {
    let (x, y) = text
        .trim()
        .split_once(',')
        .with_context(|| format!("malformed point {:?}", text))?;
    Ok((x.parse()?, y.parse()?))
}

fn parse_vents(input: &str) -> Result<Vec<Vent>> {
    input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let (tail, head) = line
                .split_once("->")
                .with_context(|| format!("malformed vent {:?}", line))?;
            let vent = Vent {
                tail: parse_point(tail)?,
                head: parse_point(head)?,
            };
            ensure!(
                !vent.is_diagonal()
                    || (vent.head.0 - vent.tail.0).abs() == (vent.head.1 - vent.tail.1).abs(),
                "vent {:?} is not at 45 degrees",
                line
            );
            Ok(vent)
        })
        .collect()
}

fn overlaps<'a>(vents: impl Iterator<Item = &'a Vent>) -> usize {
    let mut covered = FxHashMap::<Point, u32>::default();
    for point in vents.flat_map(Vent::points) {
        *covered.entry(point).or_default() += 1;
    }
    covered.values().filter(|&&n| n >= 2).count()
}

pub fn day5(input: &str) -> Result<(usize, usize)> {
    let vents = parse_vents(input)?;
    let part1 = overlaps(vents.iter().filter(|vent| !vent.is_diagonal()));
    let part2 = overlaps(vents.iter());
    Ok((part1, part2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_input;

    use indoc::indoc;

    #[test]
    fn test_day5() -> Result<()> {
        let example = indoc! {"
            0,9 -> 5,9
            8,0 -> 0,8
            9,4 -> 3,4
            2,2 -> 2,1
            7,0 -> 7,4
            6,4 -> 2,0
            0,9 -> 2,9
            3,4 -> 1,4
            0,0 -> 8,8
            5,5 -> 8,2
        "};
        assert_eq!(day5(example)?, (5, 12));
        assert!(day5("0,0 -> 2,1\n").is_err());
        Ok(())
    }

    #[test]
    fn test_points() {
        let vent = Vent {
            tail: (9, 7),
            head: (7, 9),
        };
        assert_eq!(vent.points().collect::<Vec<_>>(), vec![(9, 7), (8, 8), (7, 9)]);
    }

    #[test]
    #[ignore = "needs inputs/5.txt"]
    fn test_day5_input() -> Result<()> {
        assert_eq!(day5(&default_input(5)?)?, (6225, 22116));
        Ok(())
    }
}
