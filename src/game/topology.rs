//! Cube-surface topology
//!
//! Each face carries an `N x N` grid in its own local frame: rows grow in the
//! `Up` direction, columns grow in the `Right` direction. Stepping off a face
//! lands on one of its four neighbours, and the neighbour's frame may be
//! rotated relative to the one we left. The [`TRANSITIONS`] table spells out
//! every one of those 24 seams.

use std::f64::consts::PI;

use super::action::Direction;
use super::camera::{CameraRotation, normalize_degrees};
use super::state::{Face, GridPosition};

/// The face boundary a tentative step went past
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// row >= N
    Top,
    /// row < 0
    Bottom,
    /// col >= N
    Right,
    /// col < 0
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Right, Edge::Left];

    fn index(self) -> usize {
        self as usize
    }

    /// The edge a tentative (row, col) went past, if any
    pub fn crossed(row: i32, col: i32, grid_size: i32) -> Option<Edge> {
        if row >= grid_size {
            Some(Edge::Top)
        } else if row < 0 {
            Some(Edge::Bottom)
        } else if col >= grid_size {
            Some(Edge::Right)
        } else if col < 0 {
            Some(Edge::Left)
        } else {
            None
        }
    }
}

/// How a coordinate on the destination face is derived from the tentative
/// (row, col) on the source face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coord {
    /// Keep this axis' own tentative value
    Keep,
    /// 0
    First,
    /// N - 1
    Last,
    /// The tentative row
    Row,
    /// N - 1 - tentative row
    MirrorRow,
    /// The tentative col
    Col,
    /// N - 1 - tentative col
    MirrorCol,
}

impl Coord {
    fn resolve(self, own: i32, row: i32, col: i32, grid_size: i32) -> i32 {
        match self {
            Coord::Keep => own,
            Coord::First => 0,
            Coord::Last => grid_size - 1,
            Coord::Row => row,
            Coord::MirrorRow => grid_size - 1 - row,
            Coord::Col => col,
            Coord::MirrorCol => grid_size - 1 - col,
        }
    }
}

/// Where a step over one edge of one face ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub face: Face,
    pub row: Coord,
    pub col: Coord,
    /// New heading, `None` when the frames line up
    pub turn: Option<Direction>,
}

const fn seam(face: Face, row: Coord, col: Coord, turn: Option<Direction>) -> Transition {
    Transition {
        face,
        row,
        col,
        turn,
    }
}

use Coord::{Col, First, Keep, Last, MirrorCol, MirrorRow, Row};

/// Indexed by [`Face::index`], then by edge in `[Top, Bottom, Right, Left]` order.
#[rustfmt::skip]
pub const TRANSITIONS: [[Transition; 4]; 6] = [
    // Front
    [
        seam(Face::Up,    First, Keep, None),
        seam(Face::Down,  Last,  Keep, None),
        seam(Face::Right, Keep,  First, None),
        seam(Face::Left,  Keep,  Last, None),
    ],
    // Back
    [
        seam(Face::Up,    Last,  MirrorCol, Some(Direction::Down)),
        seam(Face::Down,  First, MirrorCol, Some(Direction::Up)),
        seam(Face::Left,  Keep,  First, None),
        seam(Face::Right, Keep,  Last, None),
    ],
    // Up
    [
        seam(Face::Back,  Last,  MirrorCol, Some(Direction::Down)),
        seam(Face::Front, Last,  Keep, None),
        seam(Face::Right, Last,  Row, Some(Direction::Down)),
        seam(Face::Left,  Last,  MirrorRow, Some(Direction::Down)),
    ],
    // Down
    [
        seam(Face::Front, First, Keep, None),
        seam(Face::Back,  First, MirrorCol, Some(Direction::Up)),
        seam(Face::Right, First, MirrorRow, Some(Direction::Up)),
        seam(Face::Left,  First, Row, Some(Direction::Up)),
    ],
    // Left
    [
        seam(Face::Up,    MirrorCol, First, Some(Direction::Right)),
        seam(Face::Down,  Col,       First, Some(Direction::Right)),
        seam(Face::Front, Keep,      First, None),
        seam(Face::Back,  Keep,      Last, None),
    ],
    // Right
    [
        seam(Face::Up,    Col,       Last, Some(Direction::Left)),
        seam(Face::Down,  MirrorCol, Last, Some(Direction::Left)),
        seam(Face::Back,  Keep,      First, None),
        seam(Face::Front, Keep,      Last, None),
    ],
];

/// Look up the seam for leaving `face` over `edge`
pub fn transition(face: Face, edge: Edge) -> Transition {
    TRANSITIONS[face.index()][edge.index()]
}

/// Step one cell from `pos` heading `direction` on a cube of `grid_size` cells
/// per side, returning the new cell and the heading in the new cell's frame.
pub fn next_position(
    pos: GridPosition,
    direction: Direction,
    grid_size: usize,
) -> (GridPosition, Direction) {
    let n = grid_size as i32;
    let (d_row, d_col) = direction.delta();
    let row = pos.row + d_row;
    let col = pos.col + d_col;

    match Edge::crossed(row, col, n) {
        None => (GridPosition::new(pos.face, row, col), direction),
        Some(edge) => {
            let seam = transition(pos.face, edge);
            let next = GridPosition::new(
                seam.face,
                seam.row.resolve(row, row, col, n),
                seam.col.resolve(col, row, col, n),
            );
            (next, seam.turn.unwrap_or(direction))
        }
    }
}

/// A point in model space; the cube spans [-0.5, 0.5] on every axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn dot(&self, other: &Point3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Angle between the two vectors from the origin, in radians
    pub fn angle_to(&self, other: &Point3) -> f64 {
        let cos = self.dot(other) / (self.length() * other.length());
        cos.clamp(-1.0, 1.0).acos()
    }
}

/// Span of one face along each axis, from the face's (row 0, col 0) corner
#[derive(Debug, Clone, Copy, PartialEq)]
struct FaceSpan {
    x: [f64; 2],
    y: [f64; 2],
    z: [f64; 2],
}

fn face_span(face: Face) -> FaceSpan {
    const LO: f64 = -0.5;
    const HI: f64 = 0.5;
    match face {
        Face::Front => FaceSpan { x: [LO, HI], y: [LO, HI], z: [HI, HI] },
        Face::Back => FaceSpan { x: [HI, LO], y: [LO, HI], z: [LO, LO] },
        Face::Left => FaceSpan { x: [LO, LO], y: [LO, HI], z: [LO, HI] },
        Face::Right => FaceSpan { x: [HI, HI], y: [LO, HI], z: [HI, LO] },
        Face::Up => FaceSpan { x: [LO, HI], y: [HI, HI], z: [HI, LO] },
        Face::Down => FaceSpan { x: [LO, HI], y: [LO, LO], z: [LO, HI] },
    }
}

fn lerp(span: [f64; 2], ratio: f64) -> f64 {
    span[0] + (span[1] - span[0]) * ratio
}

/// Centre of a grid cell on the cube surface
pub fn position_to_point3d(pos: GridPosition, grid_size: usize) -> Point3 {
    let n = grid_size as f64;
    let vertical = (f64::from(pos.row) + 0.5) / n;
    let horizontal = (f64::from(pos.col) + 0.5) / n;
    let span = face_span(pos.face);

    match pos.face {
        Face::Front | Face::Back => Point3::new(
            lerp(span.x, horizontal),
            lerp(span.y, vertical),
            span.z[0],
        ),
        Face::Left | Face::Right => Point3::new(
            span.x[0],
            lerp(span.y, vertical),
            lerp(span.z, horizontal),
        ),
        Face::Up | Face::Down => Point3::new(
            lerp(span.x, horizontal),
            span.y[0],
            lerp(span.z, vertical),
        ),
    }
}

/// Camera rotation that brings `pos` to the centre of the view
///
/// Angles are whole degrees in (-180, 180].
pub fn rotation_for_position(pos: GridPosition, grid_size: usize) -> CameraRotation {
    let point = position_to_point3d(pos, grid_size);

    let on_xz = Point3::new(point.x, 0.0, point.z);
    let tilt_sign = if point.y > 0.0 { 1.0 } else { -1.0 };
    let tilt = tilt_sign * point.angle_to(&on_xz);

    let on_yz = Point3::new(0.0, point.y, point.z);
    let spin_sign = if point.x > 0.0 { -1.0 } else { 1.0 };
    let mut spin = spin_sign * point.angle_to(&on_yz);
    if point.z < 0.0 {
        spin = PI - spin;
    }

    CameraRotation::new(
        normalize_degrees(tilt.to_degrees()).round(),
        normalize_degrees(spin.to_degrees()).round(),
    )
}

/// Flip a requested heading where the camera shows the face upside down
///
/// Seen from the follow camera, the far half of `Up` and the near half of
/// `Down` are rendered rotated by 180 degrees.
pub fn view_adjusted_direction(
    head: GridPosition,
    requested: Direction,
    grid_size: usize,
) -> Direction {
    let half = grid_size as i32 / 2;
    let upside_down = match head.face {
        Face::Up => head.row >= half,
        Face::Down => head.row < half,
        _ => false,
    };

    if upside_down {
        requested.opposite()
    } else {
        requested
    }
}
