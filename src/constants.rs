//! Grid-wide constants.

use std::f64::consts;

/// pi / 180
pub const M_PI_180: f64 = consts::PI / 180.0;
/// 180 / pi
pub const M_180_PI: f64 = 180.0 / consts::PI;
/// Square root of 3.
pub const M_SQRT3: f64 = 1.732_050_807_568_877_2;

/// Highest resolution an index can carry.
pub const MAX_RESOLUTION: u8 = 40;
/// Resolution of a bare primary (a root cell with no digits).
pub const PRIMARY_RESOLUTION: u8 = 1;
/// Lowest resolution that carries digits.
pub const MIN_SUB_RESOLUTION: u8 = 2;
/// Maximum number of digits below a primary.
pub const MAX_DIGITS: usize = (MAX_RESOLUTION - PRIMARY_RESOLUTION) as usize;

/// Number of pentagon (vertex) primaries.
pub const NUM_VERTICES: u8 = 12;
/// Number of hexagon (face) primaries.
pub const NUM_FACES: u8 = 20;
/// Number of root cells addressed by a tile set.
pub const NUM_ROOTS: usize = (NUM_VERTICES + NUM_FACES) as usize;
/// Primary code of the first face, `'A'`.
pub const FIRST_FACE: u8 = b'A';
/// Primary code of the last face, `'T'`.
pub const LAST_FACE: u8 = b'T';

/// Vertex primary whose pentagon sits on the north pole.
pub const NORTH_POLE_VERTEX: u8 = 1;
/// Vertex primary whose pentagon sits on the south pole.
pub const SOUTH_POLE_VERTEX: u8 = 12;

/// Radius of the reference sphere in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_007.180_918_475;
/// Angle subtended by two adjacent icosahedron vertices (atan 2), in radians.
pub const ICOSA_CENTRAL_ANGLE_RADS: f64 = 1.107_148_717_794_090_5;

/// Resolution gap beyond which the rectangle test checks every vertex of a cell.
pub const COMPLETE_TEST_RES_DIFF: u8 = 2;
/// Maximum number of digits appended by the edge-midpoint walk.
pub const EDGE_WALK_DEPTH: usize = 10;
