//! Text encoding of puzzles and results: the `;`-separated grid string,
//! seeded random generation, the plan string and the step-by-step dump.

use crate::solver::Solution;
use crate::world::{Hostage, Location, Protagonist, WorldState, LETHAL_DAMAGE};

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

const SEGMENTS: [&str; 8] = [
    "dimensions",
    "capacity",
    "protagonist",
    "booth",
    "agents",
    "pills",
    "pads",
    "hostages",
];

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("expected 8 `;`-separated segments, found {found}")]
    SegmentCount { found: usize },
    #[error("invalid number `{token}` in {segment}")]
    InvalidNumber { segment: &'static str, token: String },
    #[error("{segment} expects {expected} numbers, found {found}")]
    WrongArity {
        segment: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("{segment} holds {found} numbers, not a multiple of {group}")]
    Ungrouped {
        segment: &'static str,
        group: usize,
        found: usize,
    },
    #[error("{segment} location {location} is outside the {rows}x{columns} grid")]
    OutOfBounds {
        segment: &'static str,
        location: Location,
        rows: usize,
        columns: usize,
    },
    #[error("hostage damage {damage} is outside 0..=99")]
    InvalidDamage { damage: usize },
    #[error("carry capacity must be at least 1")]
    ZeroCapacity,
    #[error("grid dimensions {rows}x{columns} leave no cells")]
    EmptyGrid { rows: usize, columns: usize },
}

fn parse_numbers(segment: &'static str, text: &str) -> Result<Vec<usize>, GridError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    text.split(',')
        .map(|token| {
            token
                .trim()
                .parse::<usize>()
                .map_err(|_| GridError::InvalidNumber {
                    segment,
                    token: token.to_string(),
                })
        })
        .collect()
}

fn parse_exact(segment: &'static str, text: &str, expected: usize) -> Result<Vec<usize>, GridError> {
    let numbers = parse_numbers(segment, text)?;
    if numbers.len() != expected {
        return Err(GridError::WrongArity {
            segment,
            expected,
            found: numbers.len(),
        });
    }
    Ok(numbers)
}

fn parse_groups(
    segment: &'static str,
    text: &str,
    group: usize,
) -> Result<Vec<Vec<usize>>, GridError> {
    let numbers = parse_numbers(segment, text)?;
    if numbers.len() % group != 0 {
        return Err(GridError::Ungrouped {
            segment,
            group,
            found: numbers.len(),
        });
    }
    Ok(numbers.chunks_exact(group).map(<[usize]>::to_vec).collect())
}

fn checked_location(
    segment: &'static str,
    x: usize,
    y: usize,
    dims: &Location,
) -> Result<Location, GridError> {
    let location = Location::new(x, y);
    if !location.within(dims) {
        return Err(GridError::OutOfBounds {
            segment,
            location,
            rows: dims.x,
            columns: dims.y,
        });
    }
    Ok(location)
}

fn parse_locations(
    segment: &'static str,
    text: &str,
    dims: &Location,
) -> Result<Vec<Location>, GridError> {
    parse_groups(segment, text, 2)?
        .into_iter()
        .map(|pair| checked_location(segment, pair[0], pair[1], dims))
        .collect()
}

/// Decodes `m,n;C;NeoX,NeoY;TelX,TelY;agents;pills;pads;hostages`.
///
/// Agents and pills are `x,y` pairs, pads `sx,sy,tx,ty` quadruples and
/// hostages `x,y,damage` triples. Those four lists may be empty. Hostage ids
/// follow the listed order.
pub fn parse_grid(grid: &str) -> Result<WorldState, GridError> {
    let segments: Vec<&str> = grid.trim().split(';').collect();
    if segments.len() != SEGMENTS.len() {
        return Err(GridError::SegmentCount {
            found: segments.len(),
        });
    }

    let size = parse_exact(SEGMENTS[0], segments[0], 2)?;
    let dims = Location::new(size[0], size[1]);
    if dims.x == 0 || dims.y == 0 {
        return Err(GridError::EmptyGrid {
            rows: dims.x,
            columns: dims.y,
        });
    }

    let capacity = parse_exact(SEGMENTS[1], segments[1], 1)?[0];
    if capacity == 0 {
        return Err(GridError::ZeroCapacity);
    }

    let neo = parse_exact(SEGMENTS[2], segments[2], 2)?;
    let neo = checked_location(SEGMENTS[2], neo[0], neo[1], &dims)?;
    let booth = parse_exact(SEGMENTS[3], segments[3], 2)?;
    let booth = checked_location(SEGMENTS[3], booth[0], booth[1], &dims)?;

    let agents = parse_locations(SEGMENTS[4], segments[4], &dims)?;
    let pills = parse_locations(SEGMENTS[5], segments[5], &dims)?;

    let mut pads = BTreeMap::new();
    for quad in parse_groups(SEGMENTS[6], segments[6], 4)? {
        let source = checked_location(SEGMENTS[6], quad[0], quad[1], &dims)?;
        let target = checked_location(SEGMENTS[6], quad[2], quad[3], &dims)?;
        pads.insert(source, target);
    }

    let mut hostages = Vec::new();
    for (id, triple) in parse_groups(SEGMENTS[7], segments[7], 3)?
        .into_iter()
        .enumerate()
    {
        let location = checked_location(SEGMENTS[7], triple[0], triple[1], &dims)?;
        let damage = triple[2];
        if damage >= LETHAL_DAMAGE as usize {
            return Err(GridError::InvalidDamage { damage });
        }
        hostages.push(Hostage::new(id, location, damage as i32));
    }

    Ok(WorldState::new(
        dims,
        Protagonist::new(neo, capacity),
        hostages,
        agents,
        pads,
        pills,
        booth,
    ))
}

fn join_locations(locations: &[Location]) -> String {
    locations
        .iter()
        .map(|l| format!("{},{}", l.x, l.y))
        .collect::<Vec<_>>()
        .join(",")
}

/// Random solvable-looking puzzle: every object on its own cell, pads
/// linked both ways.
pub fn gen_grid<R: Rng + ?Sized>(rng: &mut R) -> String {
    let rows = rng.gen_range(5..=15);
    let columns = rng.gen_range(5..=15);
    let capacity = rng.gen_range(1..=4);

    let mut cells: Vec<Location> = (0..rows)
        .flat_map(|x| (0..columns).map(move |y| Location::new(x, y)))
        .collect();
    cells.shuffle(rng);

    let hostage_count = rng.gen_range(3..=10);
    let pill_count = rng.gen_range(0..=hostage_count);
    let free = rows * columns - 2 - pill_count - hostage_count;
    let agent_count = rng.gen_range(0..=free);
    let pad_count = rng.gen_range(0..=free - agent_count) / 2 * 2;

    let (neo, booth) = (cells[0], cells[1]);
    let mut rest = cells[2..].iter().copied();
    let agents: Vec<Location> = rest.by_ref().take(agent_count).collect();
    let pills: Vec<Location> = rest.by_ref().take(pill_count).collect();
    let pad_cells: Vec<Location> = rest.by_ref().take(pad_count).collect();
    let hostage_cells: Vec<Location> = rest.take(hostage_count).collect();

    let pads = pad_cells
        .chunks_exact(2)
        .map(|pair| join_locations(&[pair[0], pair[1], pair[1], pair[0]]))
        .collect::<Vec<_>>()
        .join(",");
    let hostages = hostage_cells
        .iter()
        .map(|l| format!("{},{},{}", l.x, l.y, rng.gen_range(1..=99)))
        .collect::<Vec<_>>()
        .join(",");

    format!(
        "{rows},{columns};{capacity};{},{};{},{};{};{};{pads};{hostages}",
        neo.x,
        neo.y,
        booth.x,
        booth.y,
        join_locations(&agents),
        join_locations(&pills),
    )
}

/// `plan;deaths;kills;nodes`, or `No Solution`.
pub fn solution_string(solution: &Solution) -> String {
    let Some(goal) = &solution.goal else {
        return "No Solution".to_string();
    };
    let plan = goal
        .actions()
        .iter()
        .map(|action| action.as_str())
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "{plan};{};{};{}",
        goal.path_cost.deaths,
        goal.path_cost.kills,
        solution.expanded_nodes()
    )
}

/// Every node on the goal path with its grid, root first.
pub fn visualize(solution: &Solution) -> String {
    let mut out = String::new();
    let Some(goal) = &solution.goal else {
        return out;
    };
    for node in goal.lineage() {
        let action = node
            .action
            .map_or("NOP".to_string(), |action| action.to_string());
        out.push_str(&format!(
            "===== depth {} =====\naction: {action}, cost: [{}, {}], heuristic: {}\n\n{}\n",
            node.depth, node.path_cost.deaths, node.path_cost.kills, node.heuristic, node.state
        ));
    }
    out
}
