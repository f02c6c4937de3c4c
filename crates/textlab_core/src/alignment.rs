//! Text anchor positions

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Returned when an anchor name is not one of the nine known positions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown alignment '{0}' (expected nw, n, ne, w, center, e, sw, s or se)")]
pub struct ParseAlignmentError(pub String);

/// Where text is pinned inside the area left free by the margins
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Alignment {
    NorthWest,
    North,
    NorthEast,
    West,
    #[default]
    Center,
    East,
    SouthWest,
    South,
    SouthEast,
}

/// Position along one axis
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisAnchor {
    Start,
    Middle,
    End,
}

impl Alignment {
    pub const ALL: [Alignment; 9] = [
        Alignment::NorthWest,
        Alignment::North,
        Alignment::NorthEast,
        Alignment::West,
        Alignment::Center,
        Alignment::East,
        Alignment::SouthWest,
        Alignment::South,
        Alignment::SouthEast,
    ];

    /// Short anchor name as stored in presets
    pub fn name(&self) -> &'static str {
        match self {
            Alignment::NorthWest => "nw",
            Alignment::North => "n",
            Alignment::NorthEast => "ne",
            Alignment::West => "w",
            Alignment::Center => "center",
            Alignment::East => "e",
            Alignment::SouthWest => "sw",
            Alignment::South => "s",
            Alignment::SouthEast => "se",
        }
    }

    /// Parse an anchor name, treating anything unknown as `Center`
    pub fn from_name_or_center(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    pub fn horizontal(&self) -> AxisAnchor {
        match self {
            Alignment::NorthWest | Alignment::West | Alignment::SouthWest => AxisAnchor::Start,
            Alignment::North | Alignment::Center | Alignment::South => AxisAnchor::Middle,
            Alignment::NorthEast | Alignment::East | Alignment::SouthEast => AxisAnchor::End,
        }
    }

    pub fn vertical(&self) -> AxisAnchor {
        match self {
            Alignment::NorthWest | Alignment::North | Alignment::NorthEast => AxisAnchor::Start,
            Alignment::West | Alignment::Center | Alignment::East => AxisAnchor::Middle,
            Alignment::SouthWest | Alignment::South | Alignment::SouthEast => AxisAnchor::End,
        }
    }
}

impl FromStr for Alignment {
    type Err = ParseAlignmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Alignment::ALL
            .iter()
            .copied()
            .find(|a| a.name() == s)
            .ok_or_else(|| ParseAlignmentError(s.to_string()))
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
