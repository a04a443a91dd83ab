use anyhow::{bail, ensure, Context, Result};

/// There is no second puzzle on the last day.
const PART2: &str = "Remotely start the sleigh";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Empty,
    East,
    South,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Seafloor {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
}

impl Seafloor {
    fn parse(input: &str) -> Result<Self> {
        let mut cells = Vec::new();
        let mut width = None;
        let mut height = 0;
        for line in input.lines().map(str::trim).filter(|line| !line.is_empty()) {
            ensure!(
                *width.get_or_insert(line.len()) == line.len(),
                "ragged seafloor map"
            );
            for b in line.bytes() {
                cells.push(match b {
                    b'.' => Cell::Empty,
                    b'>' => Cell::East,
                    b'v' => Cell::South,
                    _ => bail!("invalid seafloor cell {:?}", b as char),
                });
            }
            height += 1;
        }
        Ok(Self {
            cells,
            width: width.context("empty seafloor map")?,
            height,
        })
    }

    /// Moves one herd at once, every member looking at the state before the move.
    fn shift(&mut self, herd: Cell) -> bool {
        let (width, height) = (self.width, self.height);
        let ahead = |i: usize| {
            let (x, y) = (i % width, i / width);
            match herd {
                Cell::East => y * width + (x + 1) % width,
                _ => (y + 1) % height * width + x,
            }
        };
        let movers = (0..self.cells.len())
            .filter(|&i| self.cells[i] == herd && self.cells[ahead(i)] == Cell::Empty)
            .collect::<Vec<_>>();
        for &i in &movers {
            self.cells[i] = Cell::Empty;
            self.cells[ahead(i)] = herd;
        }
        !movers.is_empty()
    }

    fn step(&mut self) -> bool {
        let east = self.shift(Cell::East);
        let south = self.shift(Cell::South);
        east || south
    }

    #[cfg(test)]
    fn render(&self) -> String {
        self.cells
            .chunks(self.width)
            .map(|row| {
                row.iter()
                    .map(|c| match c {
                        Cell::Empty => '.',
                        Cell::East => '>',
                        Cell::South => 'v',
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn day25(input: &str) -> Result<(usize, &'static str)> {
    let mut seafloor = Seafloor::parse(input)?;
    let mut steps = 1;
    while seafloor.step() {
        steps += 1;
    }
    Ok((steps, PART2))
}
