use anyhow::{bail, ensure, Context, Result};
use rustc_hash::FxHashSet;
use tracing::debug;

const DIGITS: usize = 14;
const BLOCK_LEN: usize = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operand {
    Register(usize),
    Literal(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Instruction {
    Inp(usize),
    Add(usize, Operand),
    Mul(usize, Operand),
    Div(usize, Operand),
    Mod(usize, Operand),
    Eql(usize, Operand),
}

fn register(name: &str) -> Result<usize> {
    match name {
        "w" => Ok(0),
        "x" => Ok(1),
        "y" => Ok(2),
        "z" => Ok(3),
        _ => bail!("unknown register {:?}", name),
    }
}

fn operand(text: &str) -> Result<Operand> {
    match register(text) {
        Ok(r) => Ok(Operand::Register(r)),
        Err(_) => Ok(Operand::Literal(
            text.parse()
                .with_context(|| format!("invalid operand {:?}", text))?,
        )),
    }
}

fn parse_program(input: &str) -> Result<Vec<Instruction>> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let parts = line.split_whitespace().collect::<Vec<_>>();
            let instruction = match parts.as_slice() {
                ["inp", a] => Instruction::Inp(register(a)?),
                ["add", a, b] => Instruction::Add(register(a)?, operand(b)?),
                ["mul", a, b] => Instruction::Mul(register(a)?, operand(b)?),
                ["div", a, b] => Instruction::Div(register(a)?, operand(b)?),
                ["mod", a, b] => Instruction::Mod(register(a)?, operand(b)?),
                ["eql", a, b] => Instruction::Eql(register(a)?, operand(b)?),
                _ => bail!("invalid instruction {:?}", line),
            };
            Ok(instruction)
        })
        .collect()
}

fn value(regs: &[i64; 4], op: Operand) -> i64 {
    match op {
        Operand::Register(r) => regs[r],
        Operand::Literal(v) => v,
    }
}

/// Runs `program` on the ALU and returns the final `[w, x, y, z]`.
fn run(program: &[Instruction], inputs: &[i64]) -> Result<[i64; 4]> {
    let mut regs = [0i64; 4];
    let mut inputs = inputs.iter();
    for (pc, &instruction) in program.iter().enumerate() {
        match instruction {
            Instruction::Inp(a) => {
                regs[a] = *inputs
                    .next()
                    .with_context(|| format!("input exhausted at instruction {}", pc))?;
            }
            Instruction::Add(a, b) => regs[a] += value(&regs, b),
            Instruction::Mul(a, b) => regs[a] *= value(&regs, b),
            Instruction::Div(a, b) => {
                let b = value(&regs, b);
                ensure!(b != 0, "division by zero at instruction {}", pc);
                regs[a] /= b;
            }
            Instruction::Mod(a, b) => {
                let b = value(&regs, b);
                ensure!(
                    regs[a] >= 0 && b > 0,
                    "invalid modulo {} % {} at instruction {}",
                    regs[a],
                    b,
                    pc
                );
                regs[a] %= b;
            }
            Instruction::Eql(a, b) => regs[a] = i64::from(regs[a] == value(&regs, b)),
        }
    }
    Ok(regs)
}

/// One digit's worth of MONAD. `z` is a base-26 stack: every block pushes `w + push`
/// unless the digit matches `top + check`, and blocks with `div == 26` pop first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Block {
    div: i64,
    check: i64,
    push: i64,
}

impl Block {
    fn step(&self, w: i64, z: i64) -> i64 {
        let matched = z % 26 + self.check == w;
        let z = z / self.div;
        if matched {
            z
        } else {
            z * 26 + w + self.push
        }
    }

    fn pops(&self) -> bool {
        self.div == 26
    }
}

fn blocks(program: &[Instruction]) -> Result<Vec<Block>> {
    ensure!(
        program.len() == DIGITS * BLOCK_LEN,
        "MONAD has {} instructions, expected {}",
        program.len(),
        DIGITS * BLOCK_LEN
    );
    program
        .chunks(BLOCK_LEN)
        .enumerate()
        .map(|(i, chunk)| {
            ensure!(
                chunk[0] == Instruction::Inp(0),
                "block {} does not read into w",
                i
            );
            let Instruction::Div(3, Operand::Literal(div)) = chunk[4] else {
                bail!("block {} lacks `div z N`", i);
            };
            let Instruction::Add(1, Operand::Literal(check)) = chunk[5] else {
                bail!("block {} lacks `add x N`", i);
            };
            let Instruction::Add(2, Operand::Literal(push)) = chunk[15] else {
                bail!("block {} lacks `add y N`", i);
            };
            ensure!(div == 1 || div == 26, "block {} divides by {}", i, div);
            Ok(Block { div, check, push })
        })
        .collect()
}

struct Search<'a> {
    blocks: &'a [Block],
    /// `z` must stay below `limits[i]` before block `i` for the stack to empty in time.
    limits: Vec<i64>,
    dead: FxHashSet<(usize, i64)>,
}

impl<'a> Search<'a> {
    fn new(blocks: &'a [Block]) -> Self {
        let mut limits = vec![1i64; blocks.len() + 1];
        for i in (0..blocks.len()).rev() {
            limits[i] = if blocks[i].pops() {
                limits[i + 1].saturating_mul(26)
            } else {
                limits[i + 1]
            };
        }
        Self {
            blocks,
            limits,
            dead: FxHashSet::default(),
        }
    }

    fn find(&mut self, index: usize, z: i64, digits: &[i64; 9], number: &mut Vec<i64>) -> bool {
        if index == self.blocks.len() {
            return z == 0;
        }
        if z >= self.limits[index] || self.dead.contains(&(index, z)) {
            return false;
        }
        let block = self.blocks[index];
        for &w in digits {
            if block.pops() && z % 26 + block.check != w {
                continue;
            }
            number.push(w);
            if self.find(index + 1, block.step(w, z), digits, number) {
                return true;
            }
            number.pop();
        }
        self.dead.insert((index, z));
        false
    }
}

fn model_number(program: &[Instruction], blocks: &[Block], largest: bool) -> Result<i64> {
    let mut digits = [1, 2, 3, 4, 5, 6, 7, 8, 9];
    if largest {
        digits.reverse();
    }
    let mut search = Search::new(blocks);
    let mut number = Vec::with_capacity(DIGITS);
    ensure!(
        search.find(0, 0, &digits, &mut number),
        "MONAD accepts no model number"
    );
    debug!("model number search visited {} dead ends", search.dead.len());

    let [.., z] = run(program, &number)?;
    ensure!(z == 0, "ALU rejects {:?} with z = {}", number, z);
    Ok(number.iter().fold(0, |acc, d| acc * 10 + d))
}

pub fn day24(input: &str) -> Result<(i64, i64)> {
    let program = parse_program(input)?;
    let blocks = blocks(&program)?;
    Ok((
        model_number(&program, &blocks, true)?,
        model_number(&program, &blocks, false)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_input;

    use indoc::{formatdoc, indoc};

    const PARAMETERS: [(i64, i64, i64); DIGITS] = [
        (1, 12, 4),
        (1, 11, 11),
        (1, 13, 5),
        (1, 11, 11),
        (1, 14, 14),
        (26, -10, 7),
        (1, 11, 11),
        (26, -9, 4),
        (26, -3, 6),
        (1, 13, 5),
        (26, -5, 9),
        (26, -10, 12),
        (26, -4, 14),
        (26, -5, 14),
    ];

    fn monad() -> String {
        PARAMETERS
            .iter()
            .map(|(div, check, push)| {
                formatdoc!(
                    "
                        inp w
                        mul x 0
                        add x z
                        mod x 26
                        div z {}
                        add x {}
                        eql x w
                        eql x 0
                        mul y 0
                        add y 25
                        mul y x
                        add y 1
                        mul z y
                        mul y 0
                        add y w
                        add y {}
                        mul y x
                        add z y
                    ",
                    div, check, push
                )
            })
            .collect()
    }

    fn digits(number: i64) -> Vec<i64> {
        number
            .to_string()
            .bytes()
            .map(|b| i64::from(b - b'0'))
            .collect()
    }

    #[test]
    fn test_alu() -> Result<()> {
        let negate = parse_program("inp x\nmul x -1\n")?;
        assert_eq!(run(&negate, &[7])?, [0, -7, 0, 0]);

        let binary = parse_program(indoc! {"
            inp w
            add z w
            mod z 2
            div w 2
            add y w
            mod y 2
            div w 2
            add x w
            mod x 2
            div w 2
            mod w 2
        "})?;
        assert_eq!(run(&binary, &[13])?, [1, 1, 0, 1]);

        let truncating = parse_program("inp z\ndiv z 2\n")?;
        assert_eq!(run(&truncating, &[-7])?, [0, 0, 0, -3]);

        assert!(run(&negate, &[]).is_err());
        assert!(run(&parse_program("inp x\nmod x 3\n")?, &[-1]).is_err());
        assert!(parse_program("jmp x 2\n").is_err());
        Ok(())
    }

    #[test]
    fn test_blocks_match_alu() -> Result<()> {
        let program = parse_program(&monad())?;
        let blocks = blocks(&program)?;
        assert_eq!(blocks[5], Block { div: 26, check: -10, push: 7 });

        let input = digits(82915979999498);
        let z = blocks
            .iter()
            .zip(&input)
            .fold(0, |z, (block, &w)| block.step(w, z));
        assert_eq!(z, 22);
        assert_eq!(run(&program, &input)?[3], 22);
        Ok(())
    }

    #[test]
    fn test_day24() -> Result<()> {
        let (largest, smallest) = day24(&monad())?;
        assert_eq!((largest, smallest), (92915979999498, 21611513911181));
        let program = parse_program(&monad())?;
        assert_eq!(run(&program, &digits(largest))?[3], 0);
        assert_eq!(run(&program, &digits(smallest))?[3], 0);
        Ok(())
    }

    #[test]
    fn test_rejects_other_programs() {
        assert!(day24("inp w\nadd z w\n").is_err());
    }

    #[test]
    #[ignore = "needs inputs/24.txt"]
    fn test_day24_input() -> Result<()> {
        assert_eq!(day24(&default_input(24)?)?, (41299994879959, 11189561113216));
        Ok(())
    }
}
