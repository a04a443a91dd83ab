use anyhow::{bail, ensure, Context, Result};

const SIZE: usize = 5;

#[derive(Debug, Clone)]
struct Board {
    numbers: [u32; SIZE * SIZE],
    marked: [bool; SIZE * SIZE],
    won: bool,
}

impl Board {
    fn parse(rows: &[&str]) -> Result<Self> {
        ensure!(rows.len() == SIZE, "board has {} rows", rows.len());
        let numbers = rows
            .iter()
            .flat_map(|row| row.split_whitespace())
            .map(|n| n.parse().with_context(|| format!("invalid board number {:?}", n)))
            .collect::<Result<Vec<u32>>>()?;
        let numbers: [u32; SIZE * SIZE] = numbers
            .try_into()
            .map_err(|numbers: Vec<u32>| anyhow::anyhow!("board has {} numbers", numbers.len()))?;
        Ok(Self {
            numbers,
            marked: [false; SIZE * SIZE],
            won: false,
        })
    }

    /// Returns whether this call made the board win.
    fn mark(&mut self, drawn: u32) -> bool {
        if self.won {
            return false;
        }
        let Some(i) = self.numbers.iter().position(|&n| n == drawn) else {
            return false;
        };
        self.marked[i] = true;

        let (row, col) = (i / SIZE, i % SIZE);
        let full_row = (0..SIZE).all(|c| self.marked[row * SIZE + c]);
        let full_col = (0..SIZE).all(|r| self.marked[r * SIZE + col]);
        self.won = full_row || full_col;
        self.won
    }

    fn unmarked_sum(&self) -> u32 {
        self.numbers
            .iter()
            .zip(self.marked)
            .filter(|(_, marked)| !marked)
            .map(|(n, _)| n)
            .sum()
    }
}

fn parse(input: &str) -> Result<(Vec<u32>, Vec<Board>)> {
    let mut lines = input.lines().map(str::trim);
    let draws = lines
        .next()
        .context("missing draw order")?
        .split(',')
        .map(|n| n.parse().with_context(|| format!("invalid draw {:?}", n)))
        .collect::<Result<Vec<u32>>>()?;

    let mut boards = Vec::new();
    let mut rows = Vec::new();
    for line in lines.chain(std::iter::once("")) {
        if line.is_empty() {
            if !rows.is_empty() {
                boards.push(Board::parse(&rows)?);
                rows.clear();
            }
        } else {
            rows.push(line);
        }
    }
    Ok((draws, boards))
}

/// Scores in the order the boards win.
fn winning_scores(draws: &[u32], mut boards: Vec<Board>) -> Vec<u32> {
    let mut scores = Vec::new();
    for &drawn in draws {
        for board in &mut boards {
            if board.mark(drawn) {
                scores.push(board.unmarked_sum() * drawn);
            }
        }
    }
    scores
}

pub fn day4(input: &str) -> Result<(u32, u32)> {
    let (draws, boards) = parse(input)?;
    let scores = winning_scores(&draws, boards);
    match (scores.first(), scores.last()) {
        (Some(&first), Some(&last)) => Ok((first, last)),
        _ => bail!("no board ever wins"),
    }
}
