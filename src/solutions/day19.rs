use std::collections::VecDeque;

use anyhow::{bail, ensure, Context, Result};
use nalgebra::{Matrix3, Vector3};
use rayon::prelude::*;
use regex::Regex;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

type Point = Vector3<i32>;
type Rotation = Matrix3<i32>;

/// Beacons two aligned scanners must have in common.
const MIN_OVERLAP: usize = 12;
/// Pairwise distances shared by `MIN_OVERLAP` common beacons.
const MIN_SHARED_DISTANCES: usize = MIN_OVERLAP * (MIN_OVERLAP - 1) / 2;

struct Scanner {
    beacons: Vec<Point>,
    /// Sorted squared distances between every pair of beacons.
    fingerprint: Vec<i32>,
}

impl Scanner {
    fn new(beacons: Vec<Point>) -> Self {
        let mut fingerprint = Vec::with_capacity(beacons.len() * beacons.len() / 2);
        for (i, a) in beacons.iter().enumerate() {
            for b in &beacons[i + 1..] {
                let d = a - b;
                fingerprint.push(d.dot(&d));
            }
        }
        fingerprint.sort_unstable();
        Self {
            beacons,
            fingerprint,
        }
    }

    fn shared_distances(&self, other: &Scanner) -> usize {
        let (mut i, mut j, mut shared) = (0, 0, 0);
        let (a, b) = (&self.fingerprint, &other.fingerprint);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    shared += 1;
                    i += 1;
                    j += 1;
                }
            }
        }
        shared
    }
}

fn parse(input: &str) -> Result<Vec<Scanner>> {
    let header = Regex::new(r"^--- scanner ([0-9]+) ---$")?;
    let mut reports: Vec<Vec<Point>> = Vec::new();
    for line in input.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if let Some(caps) = header.captures(line) {
            ensure!(
                caps[1].parse::<usize>()? == reports.len(),
                "scanners out of order at {:?}",
                line
            );
            reports.push(Vec::new());
            continue;
        }
        let coords = line
            .split(',')
            .map(|c| c.parse::<i32>())
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("invalid beacon {:?}", line))?;
        let &[x, y, z] = coords.as_slice() else {
            bail!("expected three coordinates in {:?}", line);
        };
        reports
            .last_mut()
            .context("beacon before the first scanner header")?
            .push(Point::new(x, y, z));
    }
    ensure!(!reports.is_empty(), "no scanner reports");
    Ok(reports.into_iter().map(Scanner::new).collect())
}

/// The 24 proper rotations of the cube.
fn rotations() -> Vec<Rotation> {
    let quarter_turns = [
        Rotation::new(1, 0, 0, 0, 0, -1, 0, 1, 0),
        Rotation::new(0, 0, 1, 0, 1, 0, -1, 0, 0),
        Rotation::new(0, -1, 0, 1, 0, 0, 0, 0, 1),
    ];
    let powers = |m: Rotation| {
        let mut acc = Rotation::identity();
        (0..4).map(move |_| {
            let current = acc;
            acc *= m;
            current
        })
    };

    let mut unique = Vec::with_capacity(24);
    for a in powers(quarter_turns[0]) {
        for b in powers(quarter_turns[1]) {
            for c in powers(quarter_turns[2]) {
                let rotation = a * b * c;
                if !unique.contains(&rotation) {
                    unique.push(rotation);
                }
            }
        }
    }
    unique
}

/// Finds the rotation and offset that bring at least `threshold` of `candidate`'s
/// beacons onto `reference`. The offset is the candidate scanner's position.
fn pose(
    reference: &[Point],
    candidate: &[Point],
    rotations: &[Rotation],
    threshold: usize,
) -> Option<(Rotation, Point)> {
    rotations.iter().find_map(|&rotation| {
        let mut votes: FxHashMap<Point, usize> = FxHashMap::default();
        for c in candidate {
            let rotated = rotation * c;
            for r in reference {
                let offset = r - rotated;
                let count = votes.entry(offset).or_default();
                *count += 1;
                if *count >= threshold {
                    return Some((rotation, offset));
                }
            }
        }
        None
    })
}

/// Beacons and scanner positions, all relative to scanner 0.
fn assemble(scanners: &[Scanner]) -> Result<(FxHashSet<Point>, Vec<Point>)> {
    let rotations = rotations();
    let mut placed: Vec<Option<(Vec<Point>, Point)>> = vec![None; scanners.len()];
    placed[0] = Some((scanners[0].beacons.clone(), Point::zeros()));
    let mut frontier = VecDeque::from([0]);

    while let Some(reference) = frontier.pop_front() {
        let Some((known, _)) = &placed[reference] else {
            continue;
        };
        let found = (0..scanners.len())
            .into_par_iter()
            .filter(|&j| placed[j].is_none())
            .filter(|&j| {
                scanners[reference].shared_distances(&scanners[j]) >= MIN_SHARED_DISTANCES
            })
            .filter_map(|j| {
                let (rotation, offset) =
                    pose(known, &scanners[j].beacons, &rotations, MIN_OVERLAP)?;
                let beacons = scanners[j]
                    .beacons
                    .iter()
                    .map(|b| rotation * b + offset)
                    .collect::<Vec<_>>();
                Some((j, beacons, offset))
            })
            .collect::<Vec<_>>();

        for (j, beacons, position) in found {
            debug!(
                "scanner {} at {},{},{} via scanner {}",
                j, position.x, position.y, position.z, reference
            );
            placed[j] = Some((beacons, position));
            frontier.push_back(j);
        }
    }

    let mut beacons = FxHashSet::default();
    let mut positions = Vec::with_capacity(scanners.len());
    for (i, entry) in placed.into_iter().enumerate() {
        let Some((found, position)) = entry else {
            bail!("scanner {} cannot be aligned", i);
        };
        beacons.extend(found);
        positions.push(position);
    }
    Ok((beacons, positions))
}

fn manhattan(a: &Point, b: &Point) -> i32 {
    let d = a - b;
    d.x.abs() + d.y.abs() + d.z.abs()
}

pub fn day19(input: &str) -> Result<(usize, i32)> {
    let scanners = parse(input)?;
    let (beacons, positions) = assemble(&scanners)?;
    let farthest = positions
        .iter()
        .flat_map(|a| positions.iter().map(move |b| manhattan(a, b)))
        .max()
        .unwrap_or_default();
    Ok((beacons.len(), farthest))
}
