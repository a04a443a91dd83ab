use std::collections::VecDeque;

use anyhow::{ensure, Context, Result};

struct HeightMap {
    heights: Vec<u8>,
    width: usize,
    height: usize,
}

impl HeightMap {
    fn parse(input: &str) -> Result<Self> {
        let mut heights = Vec::new();
        let mut width = None;
        let mut height = 0;
        for line in input.lines().map(str::trim).filter(|line| !line.is_empty()) {
            ensure!(
                *width.get_or_insert(line.len()) == line.len(),
                "ragged height map"
            );
            for b in line.bytes() {
                ensure!(b.is_ascii_digit(), "invalid height {:?}", b as char);
                heights.push(b - b'0');
            }
            height += 1;
        }
        Ok(Self {
            heights,
            width: width.context("empty height map")?,
            height,
        })
    }

    fn neighbours(&self, i: usize) -> impl Iterator<Item = usize> {
        let (x, y) = (i % self.width, i / self.width);
        let width = self.width;
        [
            (x > 0).then(|| i - 1),
            (x + 1 < width).then(|| i + 1),
            (y > 0).then(|| i - width),
            (y + 1 < self.height).then(|| i + width),
        ]
        .into_iter()
        .flatten()
    }

    fn low_points(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.heights.len()).filter(|&i| {
            self.neighbours(i)
                .all(|n| self.heights[i] < self.heights[n])
        })
    }

    /// Sizes of the regions separated by height 9.
    fn basins(&self) -> Vec<usize> {
        let mut seen = vec![false; self.heights.len()];
        let mut sizes = Vec::new();
        let mut queue = VecDeque::new();
        for start in 0..self.heights.len() {
            if seen[start] || self.heights[start] == 9 {
                continue;
            }
            seen[start] = true;
            queue.push_back(start);
            let mut size = 0;
            while let Some(i) = queue.pop_front() {
                size += 1;
                for n in self.neighbours(i) {
                    if !seen[n] && self.heights[n] != 9 {
                        seen[n] = true;
                        queue.push_back(n);
                    }
                }
            }
            sizes.push(size);
        }
        sizes
    }
}

pub fn day9(input: &str) -> Result<(u32, usize)> {
    let map = HeightMap::parse(input)?;
    let risk = map
        .low_points()
        .map(|i| u32::from(map.heights[i]) + 1)
        .sum();

    let mut basins = map.basins();
    ensure!(basins.len() >= 3, "only {} basins", basins.len());
    basins.sort_unstable_by(|a, b| b.cmp(a));
    Ok((risk, basins[..3].iter().product()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_input;

    use indoc::indoc;

    #[test]
    fn test_day9() -> Result<()> {
        let example = indoc! {"
            2199943210
            3987894921
            9856789892
            8767896789
            9899965678
        "};
        assert_eq!(day9(example)?, (15, 1134));
        assert!(day9("123\n45\n").is_err());
        Ok(())
    }

    #[test]
    #[ignore = "needs inputs/9.txt"]
    fn test_day9_input() -> Result<()> {
        assert_eq!(day9(&default_input(9)?)?, (526, 585648));
        Ok(())
    }
}
