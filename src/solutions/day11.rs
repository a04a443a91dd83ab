use anyhow::{bail, ensure, Context, Result};

const MAX_STEPS: usize = 100_000;

#[derive(Debug, Clone)]
struct Cavern {
    energy: Vec<u8>,
    width: usize,
}

impl Cavern {
    fn parse(input: &str) -> Result<Self> {
        let mut energy = Vec::new();
        let mut width = None;
        for line in input.lines().map(str::trim).filter(|line| !line.is_empty()) {
            ensure!(
                *width.get_or_insert(line.len()) == line.len(),
                "ragged octopus grid"
            );
            for b in line.bytes() {
                ensure!(b.is_ascii_digit(), "invalid energy level {:?}", b as char);
                energy.push(b - b'0');
            }
        }
        let width = width.context("empty octopus grid")?;
        Ok(Self { energy, width })
    }

    fn neighbours(&self, i: usize) -> impl Iterator<Item = usize> {
        let width = self.width as isize;
        let height = (self.energy.len() / self.width) as isize;
        let (x, y) = ((i % self.width) as isize, (i / self.width) as isize);
        (-1..=1)
            .flat_map(|dy| (-1..=1).map(move |dx| (dx, dy)))
            .filter(|&d| d != (0, 0))
            .map(move |(dx, dy)| (x + dx, y + dy))
            .filter(move |&(nx, ny)| (0..width).contains(&nx) && (0..height).contains(&ny))
            .map(move |(nx, ny)| (ny * width + nx) as usize)
    }

    /// Advances one step and returns how many octopuses flashed.
    fn step(&mut self) -> usize {
        let mut pending = Vec::new();
        for (i, level) in self.energy.iter_mut().enumerate() {
            *level += 1;
            if *level == 10 {
                pending.push(i);
            }
        }

        let mut flashes = 0;
        while let Some(i) = pending.pop() {
            flashes += 1;
            for n in self.neighbours(i) {
                self.energy[n] += 1;
                if self.energy[n] == 10 {
                    pending.push(n);
                }
            }
        }

        for level in &mut self.energy {
            if *level > 9 {
                *level = 0;
            }
        }
        flashes
    }

    #[cfg(test)]
    fn render(&self) -> String {
        self.energy
            .chunks(self.width)
            .map(|row| row.iter().map(|&e| char::from(b'0' + e)).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Flashes during the first 100 steps and the first step on which every octopus flashes.
fn simulate(mut cavern: Cavern, max_steps: usize) -> Result<(usize, usize)> {
    let mut flashes = 0;
    let mut synchronized = None;
    for step in 1..=max_steps {
        let flashed = cavern.step();
        if step <= 100 {
            flashes += flashed;
        }
        if flashed == cavern.energy.len() && synchronized.is_none() {
            synchronized = Some(step);
        }
        if let Some(synchronized) = synchronized.filter(|_| step >= 100) {
            return Ok((flashes, synchronized));
        }
    }
    bail!("octopuses did not flash together within {} steps", max_steps)
}

pub fn day11(input: &str) -> Result<(usize, usize)> {
    simulate(Cavern::parse(input)?, MAX_STEPS)
}
