/// The 29 assignable symbols of the solver alphabet, in canonical order.
pub const ALPHABET: &str = "qlcmk'fuoynrstwpheaijxzgvbd,.";

/// Placeholder for an unassigned grid cell in catalog strings and rendered grids.
pub const BLANK: char = '~';

/// Number of key positions on the 3x10 grid.
pub const POSITION_COUNT: usize = 30;

/// Columns per row of the grid.
pub const ROW_WIDTH: usize = 10;

/// Finger assignment per column. Index columns (3,4 and 5,6) share a finger.
pub const FINGER_OF_COLUMN: [u8; 10] = [0, 1, 2, 3, 3, 6, 6, 7, 8, 9];

/// Default number of generator trials when none is configured.
pub const DEFAULT_TRIALS: usize = 1000;
