// ADS-B emitter category lookup
//
// Maps the two-character emitter category reported by the feed (set letter A-D
// plus digit) to a display size class and a human-readable type string.

use serde::Serialize;

/// Static description of an emitter category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    pub code: &'static str,
    /// Display size class, 1 (smallest) to 10
    pub size: u8,
    pub kind: &'static str,
}

/// Entry used for every code not present in the table
pub const UNDEFINED: CategoryInfo = CategoryInfo { code: "", size: 1, kind: "Undefined" };

const CATEGORIES: &[CategoryInfo] = &[
    CategoryInfo { code: "A0", size: 10, kind: "No Info" },
    CategoryInfo { code: "A1", size: 4, kind: "Light" },
    CategoryInfo { code: "A2", size: 6, kind: "Small" },
    CategoryInfo { code: "A3", size: 8, kind: "Large" },
    CategoryInfo { code: "A4", size: 9, kind: "High Vortex" },
    CategoryInfo { code: "A5", size: 10, kind: "Heavy" },
    CategoryInfo { code: "A6", size: 7, kind: "High Performance" },
    CategoryInfo { code: "A7", size: 5, kind: "Rotorcraft" },
    CategoryInfo { code: "B0", size: 3, kind: "No Info" },
    CategoryInfo { code: "B1", size: 3, kind: "Glider" },
    CategoryInfo { code: "B2", size: 4, kind: "Lighter-than-air" },
    CategoryInfo { code: "B3", size: 2, kind: "Parachutist" },
    CategoryInfo { code: "B4", size: 2, kind: "Ultralight" },
    CategoryInfo { code: "B6", size: 2, kind: "UAV" },
    CategoryInfo { code: "B7", size: 6, kind: "Space Vehicle" },
    CategoryInfo { code: "C0", size: 2, kind: "No Info" },
    CategoryInfo { code: "C1", size: 2, kind: "Emergency Vehicle" },
    CategoryInfo { code: "C2", size: 2, kind: "Service Vehicle" },
    CategoryInfo { code: "C3", size: 1, kind: "Point Obstacle" },
    CategoryInfo { code: "C4", size: 1, kind: "Cluster Obstacle" },
    CategoryInfo { code: "C5", size: 1, kind: "Line Obstacle" },
];

/// Look up a category code (case-insensitive). Unknown codes resolve to [`UNDEFINED`].
pub fn lookup(code: &str) -> &'static CategoryInfo {
    let code = code.trim();
    CATEGORIES
        .iter()
        .find(|c| c.code.eq_ignore_ascii_case(code))
        .unwrap_or(&UNDEFINED)
}
