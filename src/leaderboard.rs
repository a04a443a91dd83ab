//! Difficulty and engagement statistics for a private leaderboard.
//!
//! Works on the JSON dump served by the leaderboard API. Completion times are measured
//! from the moment a puzzle unlocks, midnight UTC-5 on its day in December.

use std::{
    collections::BTreeMap,
    fmt,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

const SECONDS_PER_DAY: i64 = 86_400;

#[derive(Debug, Clone, Deserialize)]
pub struct Leaderboard {
    pub event: String,
    pub members: BTreeMap<String, Member>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    #[serde(default)]
    pub name: Option<String>,
    pub stars: u32,
    #[serde(default)]
    pub completion_day_level: BTreeMap<String, BTreeMap<String, Star>>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Star {
    pub get_star_ts: i64,
}

/// One star earned by one member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub member: String,
    pub day: u32,
    pub part: u32,
    /// Seconds between unlock and submission.
    pub elapsed: i64,
    pub stars: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PuzzleStats {
    pub day: u32,
    pub part: u32,
    /// Members who earned this star.
    pub engagement: usize,
    /// Hours taken by active members.
    pub difficulty: Option<Summary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub event: i32,
    pub active_members: Vec<String>,
    pub puzzles: Vec<PuzzleStats>,
}

/// Unix timestamp at which `day` of the `year` event unlocks.
pub fn unlock_time(year: i32, day: u32) -> Result<i64> {
    let unlock = NaiveDate::from_ymd_opt(year, 12, day)
        .and_then(|date| date.and_hms_opt(5, 0, 0))
        .with_context(|| format!("no puzzle on day {} of {}", day, year))?;
    Ok(unlock.and_utc().timestamp())
}

pub fn completions(board: &Leaderboard) -> Result<Vec<Completion>> {
    let year = board.year()?;
    let mut completions = Vec::new();
    for (id, member) in &board.members {
        for (day, parts) in &member.completion_day_level {
            let day = day
                .parse()
                .with_context(|| format!("invalid day {:?} for member {}", day, id))?;
            let unlock = unlock_time(year, day)?;
            for (part, star) in parts {
                completions.push(Completion {
                    member: id.clone(),
                    day,
                    part: part
                        .parse()
                        .with_context(|| format!("invalid part {:?} for member {}", part, id))?,
                    elapsed: star.get_star_ts - unlock,
                    stars: member.stars,
                });
            }
        }
    }
    Ok(completions)
}

/// Linearly interpolated quantile of an ascending, non-empty slice.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let below = position.floor() as usize;
    let above = position.ceil() as usize;
    sorted[below] + (sorted[above] - sorted[below]) * (position - below as f64)
}

impl Summary {
    pub fn of(mut values: Vec<f64>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        values.sort_by(f64::total_cmp);
        Some(Self {
            min: values[0],
            q1: quantile(&values, 0.25),
            median: quantile(&values, 0.5),
            q3: quantile(&values, 0.75),
            max: values[values.len() - 1],
        })
    }
}

impl Leaderboard {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("{} is not a leaderboard dump", path.display()))
    }

    pub fn year(&self) -> Result<i32> {
        self.event
            .parse()
            .with_context(|| format!("invalid event {:?}", self.event))
    }
}

/// The only `*.json` file in `dir`.
pub fn find_dump(dir: &Path) -> Result<PathBuf> {
    let mut found = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("cannot list {}", dir.display()))?
    {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            found.push(path);
        }
    }
    match found.as_slice() {
        [path] => Ok(path.clone()),
        [] => bail!("no leaderboard dump in {}", dir.display()),
        _ => bail!(
            "{} JSON files in {}, pass the leaderboard dump explicitly",
            found.len(),
            dir.display()
        ),
    }
}

/// Members who have every star anyone has and earned each within a day of unlock.
fn active_members(completions: &[Completion]) -> Vec<String> {
    let mut latest: BTreeMap<&str, (i64, u32)> = BTreeMap::new();
    for c in completions {
        let entry = latest.entry(&c.member).or_insert((c.elapsed, c.stars));
        entry.0 = entry.0.max(c.elapsed);
    }
    let most_stars = latest.values().map(|&(_, stars)| stars).max().unwrap_or(0);
    latest
        .into_iter()
        .filter(|&(_, (elapsed, stars))| elapsed < SECONDS_PER_DAY && stars == most_stars)
        .map(|(member, _)| member.to_owned())
        .collect()
}

pub fn report(board: &Leaderboard) -> Result<Report> {
    let completions = completions(board)?;
    let active = active_members(&completions);
    debug!(
        "{} completions, {} of {} members active",
        completions.len(),
        active.len(),
        board.members.len()
    );

    let mut puzzles: BTreeMap<(u32, u32), (usize, Vec<f64>)> = BTreeMap::new();
    for c in &completions {
        let (engagement, hours) = puzzles.entry((c.day, c.part)).or_default();
        *engagement += 1;
        if active.contains(&c.member) {
            hours.push(c.elapsed as f64 / 3600.0);
        }
    }

    Ok(Report {
        event: board.year()?,
        active_members: active,
        puzzles: puzzles
            .into_iter()
            .map(|((day, part), (engagement, hours))| PuzzleStats {
                day,
                part,
                engagement,
                difficulty: Summary::of(hours),
            })
            .collect(),
    })
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Advent of Code {}: {} active members",
            self.event,
            self.active_members.len()
        )?;
        writeln!(
            f,
            "{:>3} {:>4} {:>6} {:>8} {:>8} {:>8} {:>8} {:>8}",
            "day", "part", "solved", "min h", "q1 h", "median h", "q3 h", "max h"
        )?;
        for puzzle in &self.puzzles {
            write!(f, "{:>3} {:>4} {:>6}", puzzle.day, puzzle.part, puzzle.engagement)?;
            match puzzle.difficulty {
                Some(s) => writeln!(
                    f,
                    " {:>8.2} {:>8.2} {:>8.2} {:>8.2} {:>8.2}",
                    s.min, s.q1, s.median, s.q3, s.max
                )?,
                None => writeln!(f, " {:>8}", "-")?,
            }
        }
        Ok(())
    }
}
