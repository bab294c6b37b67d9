//! Transient event types produced by stellar populations

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use kea_core::Error;

/// Kind of transient whose rate is predicted
///
/// Variant names follow the column headers of the population-synthesis
/// output files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventType {
    IIP,
    II,
    Ib,
    Ic,
    Ia,
    LGRB,
    PISNe,
    BHBH,
    BHNS,
    NSNS,
    /// Core-collapse supernovae: the sum of `IIP`, `II`, `Ib` and `Ic`
    CCSN,
}

impl EventType {
    /// Every event type, in table order
    pub const ALL: [EventType; 11] = [
        EventType::IIP,
        EventType::II,
        EventType::Ib,
        EventType::Ic,
        EventType::Ia,
        EventType::LGRB,
        EventType::PISNe,
        EventType::BHBH,
        EventType::BHNS,
        EventType::NSNS,
        EventType::CCSN,
    ];

    /// Supernova columns of the population-synthesis output
    pub const SUPERNOVA: [EventType; 7] = [
        EventType::IIP,
        EventType::II,
        EventType::Ib,
        EventType::Ic,
        EventType::Ia,
        EventType::LGRB,
        EventType::PISNe,
    ];

    /// Compact-object merger columns
    pub const MERGERS: [EventType; 3] = [EventType::NSNS, EventType::BHNS, EventType::BHBH];

    /// Components summed into [`EventType::CCSN`]
    pub const CORE_COLLAPSE: [EventType; 4] =
        [EventType::IIP, EventType::II, EventType::Ib, EventType::Ic];

    /// Position in [`EventType::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column header
    pub fn name(self) -> &'static str {
        match self {
            EventType::IIP => "IIP",
            EventType::II => "II",
            EventType::Ib => "Ib",
            EventType::Ic => "Ic",
            EventType::Ia => "Ia",
            EventType::LGRB => "LGRB",
            EventType::PISNe => "PISNe",
            EventType::BHBH => "BHBH",
            EventType::BHNS => "BHNS",
            EventType::NSNS => "NSNS",
            EventType::CCSN => "CCSN",
        }
    }

    pub fn is_composite(self) -> bool {
        self == EventType::CCSN
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EventType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventType::ALL
            .iter()
            .copied()
            .find(|e| e.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidInput(format!("unknown event type '{s}'")))
    }
}
