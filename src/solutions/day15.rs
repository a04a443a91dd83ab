use anyhow::{ensure, Context, Result};
use petgraph::algo::dijkstra;
use petgraph::graph::{DiGraph, NodeIndex};

#[derive(Debug, Clone, PartialEq, Eq)]
struct RiskMap {
    risk: Vec<u32>,
    width: usize,
    height: usize,
}

impl RiskMap {
    fn parse(input: &str) -> Result<Self> {
        let mut risk = Vec::new();
        let mut width = None;
        let mut height = 0;
        for line in input.lines().map(str::trim).filter(|line| !line.is_empty()) {
            ensure!(
                *width.get_or_insert(line.len()) == line.len(),
                "ragged risk map"
            );
            for b in line.bytes() {
                ensure!(
                    (b'1'..=b'9').contains(&b),
                    "invalid risk level {:?}",
                    b as char
                );
                risk.push(u32::from(b - b'0'));
            }
            height += 1;
        }
        let width = width.context("empty risk map")?;
        Ok(Self {
            risk,
            width,
            height,
        })
    }

    /// Repeats the map `times` in both directions, raising each copy by its tile distance.
    fn tile(&self, times: usize) -> Self {
        let width = self.width * times;
        let height = self.height * times;
        let risk = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| {
                let base = self.risk[(y % self.height) * self.width + x % self.width];
                let raised = base + (x / self.width + y / self.height) as u32;
                (raised - 1) % 9 + 1
            })
            .collect();
        Self {
            risk,
            width,
            height,
        }
    }

    /// Each edge weighs the risk of the cell it enters.
    fn graph(&self) -> DiGraph<(), u32> {
        let mut graph = DiGraph::with_capacity(self.risk.len(), self.risk.len() * 4);
        for _ in 0..self.risk.len() {
            graph.add_node(());
        }
        for y in 0..self.height {
            for x in 0..self.width {
                let from = NodeIndex::new(y * self.width + x);
                let right = (x + 1 < self.width).then(|| y * self.width + x + 1);
                let down = (y + 1 < self.height).then(|| (y + 1) * self.width + x);
                for to in right.into_iter().chain(down) {
                    let to_node = NodeIndex::new(to);
                    graph.add_edge(from, to_node, self.risk[to]);
                    graph.add_edge(to_node, from, self.risk[from.index()]);
                }
            }
        }
        graph
    }

    fn lowest_total_risk(&self) -> Result<u32> {
        let graph = self.graph();
        let goal = NodeIndex::new(self.risk.len() - 1);
        let costs = dijkstra(&graph, NodeIndex::new(0), Some(goal), |e| *e.weight());
        costs.get(&goal).copied().context("exit is unreachable")
    }

    #[cfg(test)]
    fn render(&self) -> Vec<String> {
        self.risk
            .chunks(self.width)
            .map(|row| row.iter().map(|r| r.to_string()).collect())
            .collect()
    }
}

pub fn day15(input: &str) -> Result<(u32, u32)> {
    let map = RiskMap::parse(input)?;
    Ok((map.lowest_total_risk()?, map.tile(5).lowest_total_risk()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_input;

    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        1163751742
        1381373672
        2136511328
        3694931569
        7463417111
        1319128137
        1359912421
        3125421639
        1293138521
        2311944581
    "};

    #[test]
    fn test_tile() -> Result<()> {
        let tiled = RiskMap::parse(EXAMPLE)?.tile(5);
        assert_eq!((tiled.width, tiled.height), (50, 50));
        let rows = tiled.render();
        assert_eq!(rows[0], "11637517422274862853338597396444961841755517295286");
        assert_eq!(rows[49], "67554889357866599146897761125791887223681299833479");

        let single = RiskMap::parse("8")?.tile(3);
        assert_eq!(single.render(), ["891", "912", "123"]);
        Ok(())
    }

    #[test]
    fn test_day15() -> Result<()> {
        assert_eq!(day15(EXAMPLE)?, (40, 315));
        assert_eq!(day15("19\n11\n")?.0, 2);
        Ok(())
    }

    #[test]
    #[ignore = "needs inputs/15.txt"]
    fn test_day15_input() -> Result<()> {
        assert_eq!(day15(&default_input(15)?)?, (553, 2858));
        Ok(())
    }
}
