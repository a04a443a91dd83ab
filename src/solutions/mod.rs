mod day01;
mod day02;
mod day03;
mod day04;
mod day05;
mod day06;
mod day07;
mod day08;
mod day09;
mod day10;
mod day11;
mod day12;
mod day13;
mod day14;
mod day15;
mod day16;
mod day17;
mod day18;
mod day19;
mod day20;
mod day21;
mod day22;
mod day23;
mod day24;
mod day25;

use anyhow::Result;

pub use day01::day1;
pub use day02::day2;
pub use day03::day3;
pub use day04::day4;
pub use day05::day5;
pub use day06::day6;
pub use day07::day7;
pub use day08::day8;
pub use day09::day9;
pub use day10::day10;
pub use day11::day11;
pub use day12::day12;
pub use day13::day13;
pub use day14::day14;
pub use day15::day15;
pub use day16::day16;
pub use day17::day17;
pub use day18::day18;
pub use day19::day19;
pub use day20::day20;
pub use day21::day21;
pub use day22::day22;
pub use day23::day23;
pub use day24::day24;
pub use day25::day25;

/// Type-erased solver so every day fits in one table.
pub type Solver = fn(&str) -> Result<(String, String)>;

macro_rules! solvers {
    ($($day:ident),* $(,)?) => {
        /// Entry `i` solves day `i + 1`.
        pub const ALL_SOLUTIONS: [Solver; 25] = [$(
            |input: &str| {
                let (part1, part2) = $day(input)?;
                Ok((part1.to_string(), part2.to_string()))
            }
        ),*];
    };
}

solvers![
    day1, day2, day3, day4, day5, day6, day7, day8, day9, day10, day11, day12, day13, day14,
    day15, day16, day17, day18, day19, day20, day21, day22, day23, day24, day25,
];
