//! Ship catalog and per-ship placement/damage tracking.

use core::fmt;
use serde::{Deserialize, Serialize};

use crate::grid::{index_to_row_col, row_col_to_index, CellIndex, CellSet, BOARD_SIZE};

/// Number of ships in a fleet.
pub const NUM_SHIPS: usize = 5;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// The fixed ship catalog. Declaration order decides which ship the next
/// placement action applies to in ship-by-ship placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipName {
    Carrier,
    Battleship,
    Destroyer,
    Submarine,
    Patrol,
}

impl ShipName {
    /// All catalog entries, in declaration order.
    pub const ALL: [ShipName; NUM_SHIPS] = [
        ShipName::Carrier,
        ShipName::Battleship,
        ShipName::Destroyer,
        ShipName::Submarine,
        ShipName::Patrol,
    ];

    /// Catalog length of the ship.
    pub fn length(self) -> usize {
        match self {
            ShipName::Carrier => 5,
            ShipName::Battleship => 4,
            ShipName::Destroyer => 3,
            ShipName::Submarine => 3,
            ShipName::Patrol => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ShipName::Carrier => "Carrier",
            ShipName::Battleship => "Battleship",
            ShipName::Destroyer => "Destroyer",
            ShipName::Submarine => "Submarine",
            ShipName::Patrol => "Patrol",
        }
    }
}

impl fmt::Display for ShipName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Committed position of a placed ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct Placement {
    origin: CellIndex,
    cells: CellSet,
    hits: CellSet,
}

/// One ship instance: catalog entry plus placement and damage state.
///
/// The hit set is always a subset of the occupied set, and the occupied set
/// has exactly `name.length()` members once placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    name: ShipName,
    orientation: Orientation,
    placement: Option<Placement>,
}

/// Compute the cells a ship would occupy anchored at `origin`, extending
/// rightward (horizontal) or downward (vertical). Returns `None` when the run
/// leaves the board; a horizontal run never wraps across a row boundary.
pub fn footprint(name: ShipName, origin: CellIndex, orientation: Orientation) -> Option<CellSet> {
    let (row, col) = index_to_row_col(origin);
    let len = name.length();
    match orientation {
        Orientation::Horizontal if col + len > BOARD_SIZE => return None,
        Orientation::Vertical if row + len > BOARD_SIZE => return None,
        _ => {}
    }
    let cells = (0..len)
        .map(|i| match orientation {
            Orientation::Horizontal => row_col_to_index(row, col + i),
            Orientation::Vertical => row_col_to_index(row + i, col),
        })
        .collect();
    Some(cells)
}

impl Ship {
    /// A fresh, unplaced ship.
    pub fn new(name: ShipName) -> Self {
        Ship {
            name,
            orientation: Orientation::Horizontal,
            placement: None,
        }
    }

    pub fn name(&self) -> ShipName {
        self.name
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// True once the ship has a non-empty occupied-cell set.
    pub fn is_placed(&self) -> bool {
        self.placement.is_some()
    }

    /// True iff placed and every occupied cell has been hit.
    pub fn is_destroyed(&self) -> bool {
        match &self.placement {
            Some(p) => p.hits == p.cells,
            None => false,
        }
    }

    /// Occupied cells, empty when unplaced.
    pub fn cells(&self) -> CellSet {
        self.placement.map(|p| p.cells).unwrap_or_default()
    }

    /// Hit cells, empty when unplaced.
    pub fn hits(&self) -> CellSet {
        self.placement.map(|p| p.hits).unwrap_or_default()
    }

    /// Anchor cell of the placement, if any.
    pub fn origin(&self) -> Option<CellIndex> {
        self.placement.map(|p| p.origin)
    }

    /// Commit a placement computed by [`footprint`].
    pub(crate) fn place(&mut self, origin: CellIndex, cells: CellSet, orientation: Orientation) {
        debug_assert_eq!(cells.len(), self.name.length());
        self.orientation = orientation;
        self.placement = Some(Placement {
            origin,
            cells,
            hits: CellSet::new(),
        });
    }

    /// Record a hit on one of this ship's cells.
    pub(crate) fn record_hit(&mut self, index: CellIndex) {
        if let Some(p) = &mut self.placement {
            debug_assert!(p.cells.contains(index));
            p.hits.insert(index);
        }
    }
}

/// A player's full fleet, one ship per catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fleet {
    ships: [Ship; NUM_SHIPS],
}

impl Fleet {
    /// All five ships fresh and unplaced.
    pub fn new() -> Self {
        Fleet {
            ships: ShipName::ALL.map(Ship::new),
        }
    }

    pub fn ship(&self, name: ShipName) -> &Ship {
        &self.ships[name as usize]
    }

    pub(crate) fn ship_mut(&mut self, name: ShipName) -> &mut Ship {
        &mut self.ships[name as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter()
    }

    /// Sole win condition: every ship destroyed.
    pub fn all_destroyed(&self) -> bool {
        self.ships.iter().all(Ship::is_destroyed)
    }

    /// True once every ship has been placed.
    pub fn is_fully_placed(&self) -> bool {
        self.ships.iter().all(Ship::is_placed)
    }

    /// Next ship to place, in catalog declaration order.
    pub fn next_unplaced(&self) -> Option<ShipName> {
        self.ships.iter().find(|s| !s.is_placed()).map(Ship::name)
    }

    /// Which ship, if any, occupies a cell.
    pub fn ship_at(&self, index: CellIndex) -> Option<ShipName> {
        self.ships
            .iter()
            .find(|s| s.cells().contains(index))
            .map(Ship::name)
    }

    /// Union of all occupied cells.
    pub fn ship_map(&self) -> CellSet {
        self.ships
            .iter()
            .fold(CellSet::new(), |acc, s| acc | s.cells())
    }

    /// Union of all hit cells.
    pub fn hit_map(&self) -> CellSet {
        self.ships
            .iter()
            .fold(CellSet::new(), |acc, s| acc | s.hits())
    }
}

impl Default for Fleet {
    fn default() -> Self {
        Fleet::new()
    }
}
