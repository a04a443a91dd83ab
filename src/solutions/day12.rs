use anyhow::{ensure, Context, Result};
use indexmap::IndexSet;

struct CaveSystem {
    /// Neighbours per cave, never including `start`.
    links: Vec<Vec<usize>>,
    small: Vec<bool>,
    start: usize,
    end: usize,
}

impl CaveSystem {
    fn parse(input: &str) -> Result<Self> {
        let mut names = IndexSet::new();
        let mut edges = Vec::new();
        for line in input.lines().map(str::trim).filter(|line| !line.is_empty()) {
            let (a, b) = line
                .split_once('-')
                .with_context(|| format!("invalid passage {:?}", line))?;
            ensure!(
                !a.is_empty() && !b.is_empty(),
                "invalid passage {:?}",
                line
            );
            let (a, _) = names.insert_full(a);
            let (b, _) = names.insert_full(b);
            edges.push((a, b));
        }
        ensure!(names.len() <= 64, "too many caves: {}", names.len());

        let start = names.get_index_of("start").context("no start cave")?;
        let end = names.get_index_of("end").context("no end cave")?;
        let mut links = vec![Vec::new(); names.len()];
        for (a, b) in edges {
            if b != start {
                links[a].push(b);
            }
            if a != start {
                links[b].push(a);
            }
        }
        let small = names
            .iter()
            .map(|name| name.bytes().all(|b| b.is_ascii_lowercase()))
            .collect();
        Ok(Self {
            links,
            small,
            start,
            end,
        })
    }

    fn count_paths(&self, allow_twice: bool) -> usize {
        self.walk(self.start, 1 << self.start, allow_twice)
    }

    fn walk(&self, cave: usize, visited: u64, twice_left: bool) -> usize {
        if cave == self.end {
            return 1;
        }
        self.links[cave]
            .iter()
            .map(|&next| {
                let bit: u64 = 1 << next;
                if !self.small[next] {
                    self.walk(next, visited, twice_left)
                } else if visited & bit == 0 {
                    self.walk(next, visited | bit, twice_left)
                } else if twice_left && next != self.end {
                    self.walk(next, visited, false)
                } else {
                    0
                }
            })
            .sum()
    }
}

pub fn day12(input: &str) -> Result<(usize, usize)> {
    let caves = CaveSystem::parse(input)?;
    Ok((caves.count_paths(false), caves.count_paths(true)))
}
