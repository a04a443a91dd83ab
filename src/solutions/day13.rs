use anyhow::{bail, ensure, Context, Result};
use regex::Regex;
use rustc_hash::FxHashSet;

type Dot = (i32, i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fold {
    Left(i32),
    Up(i32),
}

/// Capital letters as drawn by the thermal camera, rows separated by newlines. Empty
/// columns are trimmed, so `I` is three columns wide.
const GLYPHS: &[(char, &str)] = &[
    ('A', ".##.\n#..#\n#..#\n####\n#..#\n#..#"),
    ('B', "###.\n#..#\n###.\n#..#\n#..#\n###."),
    ('C', ".##.\n#..#\n#...\n#...\n#..#\n.##."),
    ('E', "####\n#...\n###.\n#...\n#...\n####"),
    ('F', "####\n#...\n###.\n#...\n#...\n#..."),
    ('G', ".##.\n#..#\n#...\n#.##\n#..#\n.###"),
    ('H', "#..#\n#..#\n####\n#..#\n#..#\n#..#"),
    ('I', "###\n.#.\n.#.\n.#.\n.#.\n###"),
    ('J', "..##\n...#\n...#\n...#\n#..#\n.##."),
    ('K', "#..#\n#.#.\n##..\n#.#.\n#.#.\n#..#"),
    ('L', "#...\n#...\n#...\n#...\n#...\n####"),
    ('O', ".##.\n#..#\n#..#\n#..#\n#..#\n.##."),
    ('O', "#####\n#...#\n#...#\n#...#\n#####"),
    ('P', "###.\n#..#\n#..#\n###.\n#...\n#..."),
    ('R', "###.\n#..#\n#..#\n###.\n#.#.\n#..#"),
    ('S', ".###\n#...\n#...\n.##.\n...#\n###."),
    ('U', "#..#\n#..#\n#..#\n#..#\n#..#\n.##."),
    ('Y', "#...#\n#...#\n.#.#.\n..#..\n..#..\n..#.."),
    ('Z', "####\n...#\n..#.\n.#..\n#...\n####"),
];

fn parse(input: &str) -> Result<(FxHashSet<Dot>, Vec<Fold>)> {
    let fold_re = Regex::new(r"^fold along ([xy])=([0-9]+)$")?;
    let mut dots = FxHashSet::default();
    let mut folds = Vec::new();
    for line in input.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if let Some(caps) = fold_re.captures(line) {
            let at = caps[2].parse()?;
            folds.push(if &caps[1] == "x" {
                Fold::Left(at)
            } else {
                Fold::Up(at)
            });
        } else {
            let (x, y) = line
                .split_once(',')
                .with_context(|| format!("invalid line {:?}", line))?;
            ensure!(folds.is_empty(), "dot {:?} after the fold instructions", line);
            dots.insert((
                x.parse().with_context(|| format!("invalid dot {:?}", line))?,
                y.parse().with_context(|| format!("invalid dot {:?}", line))?,
            ));
        }
    }
    ensure!(!folds.is_empty(), "no fold instructions");
    Ok((dots, folds))
}

fn reflect(v: i32, at: i32) -> Result<i32> {
    ensure!(v != at, "dot lies on the fold line {}", at);
    let folded = if v < at { v } else { 2 * at - v };
    ensure!(folded >= 0, "dot {} folds past the edge", v);
    Ok(folded)
}

fn fold(dots: &FxHashSet<Dot>, fold: Fold) -> Result<FxHashSet<Dot>> {
    dots.iter()
        .map(|&(x, y)| match fold {
            Fold::Left(at) => Ok((reflect(x, at)?, y)),
            Fold::Up(at) => Ok((x, reflect(y, at)?)),
        })
        .collect()
}

fn render(dots: &FxHashSet<Dot>, columns: std::ops::RangeInclusive<i32>, height: i32) -> String {
    (0..height)
        .map(|y| {
            columns
                .clone()
                .map(|x| if dots.contains(&(x, y)) { '#' } else { '.' })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reads the letters spelled by the dots, left to right.
fn read_letters(dots: &FxHashSet<Dot>) -> Result<String> {
    let width = dots.iter().map(|&(x, _)| x).max().context("no dots")? + 1;
    let height = dots.iter().map(|&(_, y)| y).max().context("no dots")? + 1;
    let occupied = (0..width)
        .map(|x| dots.iter().any(|&(dx, _)| dx == x))
        .collect::<Vec<_>>();

    let mut letters = String::new();
    let mut x = 0;
    while x < width {
        if !occupied[x as usize] {
            x += 1;
            continue;
        }
        let start = x;
        while x < width && occupied[x as usize] {
            x += 1;
        }
        let glyph = render(dots, start..=x - 1, height);
        match GLYPHS.iter().find(|(_, shape)| *shape == glyph) {
            Some(&(letter, _)) => letters.push(letter),
            None => bail!("unknown glyph:\n{}", glyph),
        }
    }
    Ok(letters)
}

pub fn day13(input: &str) -> Result<(usize, String)> {
    let (mut dots, folds) = parse(input)?;

    dots = fold(&dots, folds[0])?;
    let part1 = dots.len();

    for &f in &folds[1..] {
        dots = fold(&dots, f)?;
    }
    tracing::debug!(
        "folded paper:\n{}",
        render(
            &dots,
            0..=dots.iter().map(|&(x, _)| x).max().unwrap_or_default(),
            dots.iter().map(|&(_, y)| y).max().unwrap_or_default() + 1,
        )
    );
    Ok((part1, read_letters(&dots)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_input;

    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        6,10
        0,14
        9,10
        0,3
        10,4
        4,11
        6,0
        6,12
        4,1
        0,13
        10,12
        3,4
        3,0
        8,4
        1,10
        2,14
        8,10
        9,0

        fold along y=7
        fold along x=5
    "};

    #[test]
    fn test_day13() -> Result<()> {
        assert_eq!(day13(EXAMPLE)?, (17, "O".to_owned()));
        Ok(())
    }

    fn dots(drawing: &str) -> FxHashSet<Dot> {
        drawing
            .lines()
            .enumerate()
            .flat_map(|(y, row)| {
                row.bytes()
                    .enumerate()
                    .filter(|&(_, b)| b == b'#')
                    .map(move |(x, _)| (x as i32, y as i32))
            })
            .collect()
    }

    #[test]
    fn test_read_letters() -> Result<()> {
        let her = indoc! {"
            #..#.####.###.
            #..#.#....#..#
            ####.###..#..#
            #..#.#....###.
            #..#.#....#.#.
            #..#.####.#..#
        "};
        assert_eq!(read_letters(&dots(her))?, "HER");

        let osyi = indoc! {"
            .##...###.#...#..###
            #..#.#....#...#...#.
            #..#.#.....#.#....#.
            #..#..##....#.....#.
            #..#....#...#.....#.
            .##..###....#....###
        "};
        assert_eq!(read_letters(&dots(osyi))?, "OSYI");

        let unknown = indoc! {"
            #.#
            .#.
            #.#
            .#.
            #.#
            .#.
        "};
        assert!(read_letters(&dots(unknown)).is_err());
        Ok(())
    }

    #[test]
    fn test_fold_errors() {
        assert!(day13("3,3\n\nfold along x=3\n").is_err());
        assert!(day13("1,1\n").is_err());
    }

    #[test]
    #[ignore = "needs inputs/13.txt"]
    fn test_day13_input() -> Result<()> {
        assert_eq!(day13(&default_input(13)?)?, (814, "PZEHRAER".to_owned()));
        Ok(())
    }
}
