use anyhow::{ensure, Context, Result};
use regex::Regex;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Cuboid {
    min: [i64; 3],
    max: [i64; 3],
}

impl Cuboid {
    fn intersect(&self, other: &Cuboid) -> Option<Cuboid> {
        let mut overlap = *self;
        for axis in 0..3 {
            overlap.min[axis] = self.min[axis].max(other.min[axis]);
            overlap.max[axis] = self.max[axis].min(other.max[axis]);
            if overlap.min[axis] > overlap.max[axis] {
                return None;
            }
        }
        Some(overlap)
    }

    fn volume(&self) -> i64 {
        (0..3).map(|axis| self.max[axis] - self.min[axis] + 1).product()
    }

    fn within(&self, limit: i64) -> bool {
        self.min.iter().chain(&self.max).all(|v| v.abs() <= limit)
    }
}

#[derive(Debug, Clone, Copy)]
struct Step {
    on: bool,
    cuboid: Cuboid,
}

fn parse(input: &str) -> Result<Vec<Step>> {
    let re = Regex::new(
        r"^(on|off) x=(-?[0-9]+)\.\.(-?[0-9]+),y=(-?[0-9]+)\.\.(-?[0-9]+),z=(-?[0-9]+)\.\.(-?[0-9]+)$",
    )?;
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let caps = re
                .captures(line)
                .with_context(|| format!("invalid reboot step {:?}", line))?;
            let mut bounds = [0i64; 6];
            for (i, bound) in bounds.iter_mut().enumerate() {
                *bound = caps[i + 2].parse()?;
            }
            let cuboid = Cuboid {
                min: [bounds[0], bounds[2], bounds[4]],
                max: [bounds[1], bounds[3], bounds[5]],
            };
            for axis in 0..3 {
                ensure!(
                    cuboid.min[axis] <= cuboid.max[axis],
                    "inverted range in {:?}",
                    line
                );
            }
            Ok(Step {
                on: &caps[1] == "on",
                cuboid,
            })
        })
        .collect()
}

/// Lit cubes after `steps`, tracked as signed cuboids so overlaps cancel out.
fn reboot<'a>(steps: impl IntoIterator<Item = &'a Step>) -> i64 {
    let mut signed: FxHashMap<Cuboid, i64> = FxHashMap::default();
    for step in steps {
        let mut updates: FxHashMap<Cuboid, i64> = FxHashMap::default();
        for (cuboid, &sign) in &signed {
            if let Some(overlap) = cuboid.intersect(&step.cuboid) {
                *updates.entry(overlap).or_default() -= sign;
            }
        }
        if step.on {
            *updates.entry(step.cuboid).or_default() += 1;
        }
        for (cuboid, sign) in updates {
            *signed.entry(cuboid).or_default() += sign;
        }
        signed.retain(|_, sign| *sign != 0);
    }
    signed
        .iter()
        .map(|(cuboid, sign)| cuboid.volume() * sign)
        .sum()
}

pub fn day22(input: &str) -> Result<(i64, i64)> {
    let steps = parse(input)?;
    let part1 = reboot(steps.iter().filter(|step| step.cuboid.within(50)));
    Ok((part1, reboot(&steps)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_input;

    use indoc::indoc;

    #[test]
    fn test_small() -> Result<()> {
        let example = indoc! {"
            on x=10..12,y=10..12,z=10..12
            on x=11..13,y=11..13,z=11..13
            off x=9..11,y=9..11,z=9..11
            on x=10..10,y=10..10,z=10..10
        "};
        assert_eq!(day22(example)?, (39, 39));

        let steps = parse(example)?;
        assert_eq!(reboot(&steps[..1]), 27);
        assert_eq!(reboot(&steps[..2]), 46);
        assert_eq!(reboot(&steps[..3]), 38);
        Ok(())
    }

    #[test]
    fn test_larger() -> Result<()> {
        let example = include_str!("../../inputs/examples/day22_larger.txt");
        assert_eq!(day22(example)?.0, 590784);
        Ok(())
    }

    #[test]
    fn test_reboot() -> Result<()> {
        let example = include_str!("../../inputs/examples/day22_reboot.txt");
        assert_eq!(day22(example)?, (474140, 2758514936282235));
        Ok(())
    }

    #[test]
    fn test_parse_errors() {
        assert!(day22("toggle x=1..2,y=1..2,z=1..2\n").is_err());
        assert!(day22("on x=2..1,y=1..2,z=1..2\n").is_err());
    }

    #[test]
    #[ignore = "needs inputs/22.txt"]
    fn test_day22_input() -> Result<()> {
        assert_eq!(day22(&default_input(22)?)?, (527915, 1218645427221987));
        Ok(())
    }
}
