//! Compiled output: integer quads and their screen-edge flags.

use std::ops::BitOr;

// ════════════════════════════════════════════════════════════════════════════
// Quad
// ════════════════════════════════════════════════════════════════════════════

/// A quadrilateral with integer vertices, in drawing order.
///
/// Vertices 0/1 are the near edge (the previous rail pair) and 2/3 the far
/// edge.  Degenerate quads (coincident vertices) are legal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Quad {
    pub xs: [i32; 4],
    pub ys: [i32; 4],
}

impl Quad {
    pub fn new(xs: [i32; 4], ys: [i32; 4]) -> Self {
        Quad { xs, ys }
    }

    /// Vertex `i` (0–3) as an `(x, y)` pair.
    pub fn vertex(&self, i: usize) -> (i32, i32) {
        (self.xs[i], self.ys[i])
    }

    pub fn vertices(&self) -> [(i32, i32); 4] {
        [self.vertex(0), self.vertex(1), self.vertex(2), self.vertex(3)]
    }

    /// The same quad shifted by `(dx, dy)`.
    pub fn translated(&self, dx: i32, dy: i32) -> Quad {
        Quad {
            xs: self.xs.map(|x| x.saturating_add(dx)),
            ys: self.ys.map(|y| y.saturating_add(dy)),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// CrossFlags
// ════════════════════════════════════════════════════════════════════════════

/// Distance from a surface edge within which a quad counts as crossing it.
pub const EDGE_MARGIN: i32 = 20;

/// Bitmask of the surface edges a quad reaches within [`EDGE_MARGIN`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CrossFlags(u8);

impl CrossFlags {
    pub const NONE:   CrossFlags = CrossFlags(0);
    pub const LEFT:   CrossFlags = CrossFlags(1);
    pub const RIGHT:  CrossFlags = CrossFlags(2);
    pub const TOP:    CrossFlags = CrossFlags(4);
    pub const BOTTOM: CrossFlags = CrossFlags(8);

    pub fn bits(self) -> u8 { self.0 }

    pub fn is_empty(self) -> bool { self.0 == 0 }

    pub fn contains(self, other: CrossFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Near the left or right edge.
    pub fn horizontal(self) -> bool { self.0 & 0b0011 != 0 }

    /// Near the top or bottom edge.
    pub fn vertical(self) -> bool { self.0 & 0b1100 != 0 }

    /// Flags for `quad` on a `width` × `height` surface.
    pub fn of(quad: &Quad, width: i32, height: i32) -> CrossFlags {
        let right  = width  - EDGE_MARGIN;
        let bottom = height - EDGE_MARGIN;
        let mut f = CrossFlags::NONE;
        if quad.xs.iter().any(|&x| x <= EDGE_MARGIN) { f = f | CrossFlags::LEFT;   }
        if quad.xs.iter().any(|&x| x >= right)       { f = f | CrossFlags::RIGHT;  }
        if quad.ys.iter().any(|&y| y <= EDGE_MARGIN) { f = f | CrossFlags::TOP;    }
        if quad.ys.iter().any(|&y| y >= bottom)      { f = f | CrossFlags::BOTTOM; }
        f
    }
}

impl BitOr for CrossFlags {
    type Output = CrossFlags;
    fn bitor(self, rhs: CrossFlags) -> CrossFlags { CrossFlags(self.0 | rhs.0) }
}
