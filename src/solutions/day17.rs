use std::ops::RangeInclusive;

use anyhow::{ensure, Context, Result};
use rayon::prelude::*;
use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Target {
    x: RangeInclusive<i32>,
    y: RangeInclusive<i32>,
}

impl Target {
    fn parse(input: &str) -> Result<Self> {
        let re = Regex::new(
            r"^target area: x=(-?[0-9]+)\.\.(-?[0-9]+), y=(-?[0-9]+)\.\.(-?[0-9]+)$",
        )?;
        let caps = re
            .captures(input.trim())
            .with_context(|| format!("invalid target area {:?}", input.trim()))?;
        let [x0, x1, y0, y1] = [1, 2, 3, 4].map(|i| caps[i].parse::<i32>());
        let (x0, x1, y0, y1) = (x0?, x1?, y0?, y1?);
        ensure!(x0 > 0 && x0 <= x1, "target must lie right of the origin");
        ensure!(y0 <= y1, "empty vertical target range");
        Ok(Self {
            x: x0..=x1,
            y: y0..=y1,
        })
    }

    /// Highest point reached if a probe launched at `(vx, vy)` ever hits the target.
    fn launch(&self, mut vx: i32, mut vy: i32) -> Option<i32> {
        let (mut x, mut y, mut peak) = (0, 0, 0);
        loop {
            x += vx;
            y += vy;
            vx -= vx.signum();
            vy -= 1;
            peak = peak.max(y);
            if self.x.contains(&x) && self.y.contains(&y) {
                return Some(peak);
            }
            if x > *self.x.end() || (vy < 0 && y < *self.y.start()) {
                return None;
            }
            if vx == 0 && x < *self.x.start() {
                return None;
            }
        }
    }
}

pub fn day17(input: &str) -> Result<(i32, usize)> {
    let target = Target::parse(input)?;
    let vy_max = target.y.start().abs().max(target.y.end().abs());
    let target = &target;
    let peaks = (1..=*target.x.end())
        .into_par_iter()
        .flat_map_iter(move |vx| {
            (*target.y.start()..=vy_max).filter_map(move |vy| target.launch(vx, vy))
        })
        .collect::<Vec<_>>();
    let highest = peaks.iter().copied().max().context("no launch hits the target")?;
    Ok((highest, peaks.len()))
}
