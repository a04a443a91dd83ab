//! Amphipod burrow reorganisation as a branch-and-bound search.
//!
//! The burrow is a hallway of 11 cells above four rooms of depth `D`. Moves that
//! bring an amphipod home are always worth making immediately, so the search only
//! branches on which amphipod steps out of a room and where it waits in the hallway.

use anyhow::{bail, ensure, Context, Result};
use rustc_hash::FxHashMap;
use tracing::debug;

const HALLWAY: usize = 11;
const DOORS: [usize; 4] = [2, 4, 6, 8];
/// Hallway cells an amphipod may wait in; never directly outside a room.
const STOPS: [usize; 7] = [0, 1, 3, 5, 7, 9, 10];

/// Rows inserted below the first room row when the diagram is unfolded.
const FOLDED_ROWS: [[Amphipod; 4]; 2] = [
    [Amphipod::D, Amphipod::C, Amphipod::B, Amphipod::A],
    [Amphipod::D, Amphipod::B, Amphipod::A, Amphipod::C],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Amphipod {
    A,
    B,
    C,
    D,
}

impl Amphipod {
    fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'A' => Some(Self::A),
            b'B' => Some(Self::B),
            b'C' => Some(Self::C),
            b'D' => Some(Self::D),
            _ => None,
        }
    }

    fn energy(self) -> u32 {
        10u32.pow(self as u32)
    }

    fn home(self) -> usize {
        self as usize
    }
}

fn distance(a: usize, b: usize) -> u32 {
    a.abs_diff(b) as u32
}

/// Room slot 0 is the one next to the hallway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Burrow<const D: usize> {
    hallway: [Option<Amphipod>; HALLWAY],
    rooms: [[Option<Amphipod>; D]; 4],
}

impl<const D: usize> Burrow<D> {
    fn new(rows: &[[Amphipod; 4]]) -> Result<Self> {
        ensure!(
            rows.len() == D,
            "expected rooms of depth {}, found {}",
            D,
            rows.len()
        );
        let mut rooms = [[None; D]; 4];
        for (slot, row) in rows.iter().enumerate() {
            for (room, &amphipod) in row.iter().enumerate() {
                rooms[room][slot] = Some(amphipod);
            }
        }
        for kind in [Amphipod::A, Amphipod::B, Amphipod::C, Amphipod::D] {
            let count = rooms.iter().flatten().filter(|&&a| a == Some(kind)).count();
            ensure!(count == D, "{} amphipods of type {:?}", count, kind);
        }
        Ok(Self {
            hallway: [None; HALLWAY],
            rooms,
        })
    }

    /// True when only amphipods living in `room` are inside it.
    fn accepts(&self, room: usize) -> bool {
        self.rooms[room]
            .iter()
            .flatten()
            .all(|a| a.home() == room)
    }

    fn is_organized(&self) -> bool {
        self.hallway.iter().all(Option::is_none)
            && (0..4).all(|room| {
                self.rooms[room]
                    .iter()
                    .all(|&a| a.map(Amphipod::home) == Some(room))
            })
    }

    fn top(&self, room: usize) -> Option<(usize, Amphipod)> {
        self.rooms[room]
            .iter()
            .enumerate()
            .find_map(|(slot, a)| a.map(|a| (slot, a)))
    }

    fn deepest_free(&self, room: usize) -> Option<usize> {
        self.rooms[room].iter().rposition(Option::is_none)
    }

    /// Hallway cells between `from` (excluded) and `to` (included) are empty.
    fn path_clear(&self, from: usize, to: usize) -> bool {
        let cells = if from < to {
            &self.hallway[from + 1..=to]
        } else {
            &self.hallway[to..from]
        };
        cells.iter().all(Option::is_none)
    }

    /// Moves every amphipod that can reach its own room straight there.
    fn settle(&mut self) -> u32 {
        let mut cost = 0;
        loop {
            let mut moved = false;

            for pos in 0..HALLWAY {
                let Some(amphipod) = self.hallway[pos] else {
                    continue;
                };
                let home = amphipod.home();
                if !self.accepts(home) || !self.path_clear(pos, DOORS[home]) {
                    continue;
                }
                let Some(slot) = self.deepest_free(home) else {
                    continue;
                };
                self.hallway[pos] = None;
                self.rooms[home][slot] = Some(amphipod);
                cost += (distance(pos, DOORS[home]) + slot as u32 + 1) * amphipod.energy();
                moved = true;
            }

            for room in 0..4 {
                if self.accepts(room) {
                    continue;
                }
                let Some((from_slot, amphipod)) = self.top(room) else {
                    continue;
                };
                let home = amphipod.home();
                if home == room
                    || !self.accepts(home)
                    || !self.path_clear(DOORS[room], DOORS[home])
                {
                    continue;
                }
                let Some(to_slot) = self.deepest_free(home) else {
                    continue;
                };
                self.rooms[room][from_slot] = None;
                self.rooms[home][to_slot] = Some(amphipod);
                let steps = from_slot as u32
                    + 1
                    + distance(DOORS[room], DOORS[home])
                    + to_slot as u32
                    + 1;
                cost += steps * amphipod.energy();
                moved = true;
            }

            if !moved {
                return cost;
            }
        }
    }

    /// Energy still needed if nothing ever stood in the way. Never overestimates.
    fn lower_bound(&self) -> u32 {
        let mut bound = 0;
        for (pos, amphipod) in self.hallway.iter().enumerate() {
            if let Some(a) = amphipod {
                bound += (distance(pos, DOORS[a.home()]) + 1) * a.energy();
            }
        }
        for room in 0..4 {
            let mut blocked = false;
            for slot in (0..D).rev() {
                let Some(a) = self.rooms[room][slot] else {
                    continue;
                };
                blocked |= a.home() != room;
                if blocked {
                    // Leaving and re-entering its own room takes at least two hallway steps.
                    let across = if a.home() == room {
                        2
                    } else {
                        distance(DOORS[room], DOORS[a.home()])
                    };
                    bound += (slot as u32 + 1 + across + 1) * a.energy();
                }
            }
        }
        bound
    }

    /// Every way of stepping an amphipod out of a room that still holds strangers.
    fn moves(&self) -> Vec<(Self, u32)> {
        let mut moves = Vec::new();
        for room in 0..4 {
            if self.accepts(room) {
                continue;
            }
            let Some((slot, amphipod)) = self.top(room) else {
                continue;
            };
            for stop in STOPS {
                if !self.path_clear(DOORS[room], stop) {
                    continue;
                }
                let mut next = *self;
                next.rooms[room][slot] = None;
                next.hallway[stop] = Some(amphipod);
                let steps = slot as u32 + 1 + distance(DOORS[room], stop);
                moves.push((next, steps * amphipod.energy()));
            }
        }
        moves
    }
}

struct Search<const D: usize> {
    best: u32,
    seen: FxHashMap<Burrow<D>, u32>,
    expanded: usize,
}

impl<const D: usize> Search<D> {
    fn explore(&mut self, mut burrow: Burrow<D>, mut cost: u32) {
        cost += burrow.settle();
        if burrow.is_organized() {
            self.best = self.best.min(cost);
            return;
        }
        if cost + burrow.lower_bound() >= self.best {
            return;
        }
        if matches!(self.seen.get(&burrow), Some(&previous) if previous <= cost) {
            return;
        }
        self.seen.insert(burrow, cost);
        self.expanded += 1;

        let mut moves = burrow.moves();
        moves.sort_by_key(|(next, step)| cost + step + next.lower_bound());
        for (next, step) in moves {
            self.explore(next, cost + step);
        }
    }
}

fn organize<const D: usize>(rows: &[[Amphipod; 4]]) -> Result<u32> {
    let burrow = Burrow::<D>::new(rows)?;
    let mut search = Search {
        best: u32::MAX,
        seen: FxHashMap::default(),
        expanded: 0,
    };
    search.explore(burrow, 0);
    debug!(
        "depth {}: expanded {} burrows, remembered {}",
        D,
        search.expanded,
        search.seen.len()
    );
    if search.best == u32::MAX {
        bail!("the amphipods cannot be organized");
    }
    Ok(search.best)
}

fn parse(input: &str) -> Result<Vec<[Amphipod; 4]>> {
    let mut lines = input.lines().filter(|line| !line.trim().is_empty());
    ensure!(
        lines.next().map(str::trim) == Some("#############"),
        "missing burrow wall"
    );
    ensure!(
        lines.next().map(str::trim) == Some("#...........#"),
        "hallway must start empty"
    );

    let mut rows = Vec::new();
    for line in lines {
        let bytes = line.as_bytes();
        if !bytes.iter().any(|b| (b'A'..=b'D').contains(b)) {
            continue;
        }
        let mut row = [Amphipod::A; 4];
        for (room, &door) in DOORS.iter().enumerate() {
            row[room] = bytes
                .get(door + 1)
                .copied()
                .and_then(Amphipod::from_byte)
                .with_context(|| format!("invalid room row {:?}", line))?;
        }
        rows.push(row);
    }
    ensure!(!rows.is_empty(), "no amphipods in the burrow");
    Ok(rows)
}

pub fn day23(input: &str) -> Result<(u32, u32)> {
    let rows = parse(input)?;
    let part1 = organize::<2>(&rows)?;

    let first = rows.first().copied().context("no amphipods in the burrow")?;
    let mut unfolded = vec![first];
    unfolded.extend(FOLDED_ROWS);
    unfolded.extend_from_slice(&rows[1..]);
    let part2 = organize::<4>(&unfolded)?;
    Ok((part1, part2))
}
