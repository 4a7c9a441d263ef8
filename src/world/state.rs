use super::{Hostage, Location, Protagonist};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Teleporter pads, source to destination. Fixed for the whole solve, so
/// every state shares one map.
pub type Pads = Rc<BTreeMap<Location, Location>>;

/// One snapshot of the puzzle.
///
/// Equality and hashing are structural. Hostage and agent lists compare in
/// order, so the same multiset in a different order is a different state.
/// States are never mutated once handed to a search node; transitions work
/// on a clone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorldState {
    /// Number of rows in `x` and columns in `y`.
    pub dims: Location,
    pub protagonist: Protagonist,
    pub hostages: Vec<Hostage>,
    pub agents: Vec<Location>,
    pub pads: Pads,
    pub pills: Vec<Location>,
    pub booth: Location,
}

impl WorldState {
    pub fn new(
        dims: Location,
        protagonist: Protagonist,
        hostages: Vec<Hostage>,
        agents: Vec<Location>,
        pads: BTreeMap<Location, Location>,
        pills: Vec<Location>,
        booth: Location,
    ) -> Self {
        WorldState {
            dims,
            protagonist,
            hostages,
            agents,
            pads: Rc::new(pads),
            pills,
            booth,
        }
    }

    pub fn in_bounds(&self, location: &Location) -> bool {
        location.within(&self.dims)
    }

    pub fn is_at_booth(&self, location: &Location) -> bool {
        *location == self.booth
    }

    /// Dropped at the booth and no longer carried.
    pub fn is_rescued(&self, hostage: &Hostage) -> bool {
        !hostage.carried && self.is_at_booth(&hostage.location)
    }

    /// Dead, loose and away from the booth: behaves like a hostile agent.
    pub fn is_turned(&self, hostage: &Hostage) -> bool {
        !hostage.is_alive() && !hostage.carried && !self.is_at_booth(&hostage.location)
    }

    pub fn turned_hostages(&self) -> impl Iterator<Item = &Hostage> {
        self.hostages.iter().filter(|h| self.is_turned(h))
    }

    /// Alive hostages that still have to reach the booth.
    pub fn unrescued_alive_hostages(&self) -> impl Iterator<Item = &Hostage> {
        self.hostages
            .iter()
            .filter(|h| h.is_alive() && !self.is_at_booth(&h.location))
    }

    pub fn carried_count(&self) -> usize {
        self.hostages.iter().filter(|h| h.carried).count()
    }

    pub fn has_agent_at(&self, location: &Location) -> bool {
        self.agents.contains(location)
    }

    pub fn has_pill_at(&self, location: &Location) -> bool {
        self.pills.contains(location)
    }

    /// Move the protagonist and everything it carries.
    pub(crate) fn relocate_protagonist(&mut self, to: Location) {
        self.protagonist.location = to;
        for hostage in self.hostages.iter_mut().filter(|h| h.carried) {
            hostage.location = to;
        }
    }
}

impl fmt::Display for WorldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cells = vec![vec![String::new(); self.dims.y]; self.dims.x];
        let mut put = |location: &Location, label: String| {
            if let Some(cell) = cells
                .get_mut(location.x)
                .and_then(|row| row.get_mut(location.y))
            {
                cell.push_str(&label);
                cell.push(';');
            }
        };

        put(
            &self.protagonist.location,
            format!(
                "N({},{})",
                self.protagonist.damage(),
                self.protagonist.capacity()
            ),
        );
        for hostage in &self.hostages {
            let label = if hostage.carried {
                format!("H({},C)", hostage.damage)
            } else {
                format!("H({})", hostage.damage)
            };
            put(&hostage.location, label);
        }
        for agent in &self.agents {
            put(agent, "A".to_string());
        }
        for pill in &self.pills {
            put(pill, "P".to_string());
        }
        for (source, target) in self.pads.iter() {
            put(source, format!("F{target}"));
        }
        put(&self.booth, "TB".to_string());

        let width = cells
            .iter()
            .flatten()
            .map(String::len)
            .max()
            .unwrap_or(0)
            .max(3);

        write!(f, "    |")?;
        for column in 0..self.dims.y {
            write!(f, "{column:^width$}|")?;
        }
        writeln!(f)?;

        for (row, line) in cells.iter().enumerate() {
            write!(f, "----+")?;
            for _ in 0..self.dims.y {
                write!(f, "{}+", "-".repeat(width))?;
            }
            writeln!(f)?;

            write!(f, "{row:>3} |")?;
            for cell in line {
                write!(f, "{cell:^width$}|")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
