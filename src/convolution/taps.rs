use crate::mirror_index;
use crate::simd::F32Vector;

/// Position of a vector window inside of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Edge {
    /// The window starts at the left edge of the row,
    /// left neighbors are mirrored lanes of the window itself.
    First,
    /// All neighbors are inside of the row.
    Interior,
    /// The window ends at the right edge of the row,
    /// right neighbors are mirrored lanes of the window itself.
    Last,
}

/// Values at `x - 1`, `x`, `x + 1`.
#[derive(Clone, Copy)]
pub(crate) struct Taps3<V> {
    pub l1: V,
    pub c: V,
    pub r1: V,
}

/// Values at `x - 2 ..= x + 2`.
#[derive(Clone, Copy)]
pub(crate) struct Taps5<V> {
    pub l2: V,
    pub l1: V,
    pub c: V,
    pub r1: V,
    pub r2: V,
}

/// Sum of values of all `rows` at `x`.
#[inline(always)]
unsafe fn load_sum<V: F32Vector>(rows: &[&[f32]], x: usize) -> V {
    let mut sum = V::load(rows[0], x);
    for row in &rows[1..] {
        sum = sum.add(V::load(row, x));
    }
    sum
}

#[inline(always)]
fn sum_at(rows: &[&[f32]], x: usize) -> f32 {
    let mut sum = rows[0][x];
    for row in &rows[1..] {
        sum += row[x];
    }
    sum
}

impl<V: F32Vector> Taps3<V> {
    /// Loads taps of sum of `rows` for the window at `x`.
    #[inline(always)]
    pub unsafe fn load(rows: &[&[f32]], x: usize, edge: Edge) -> Self {
        let c = load_sum::<V>(rows, x);
        match edge {
            Edge::First => Self {
                l1: c.first_l1(),
                c,
                r1: load_sum(rows, x + 1),
            },
            Edge::Interior => Self {
                l1: load_sum(rows, x - 1),
                c,
                r1: load_sum(rows, x + 1),
            },
            Edge::Last => Self {
                l1: load_sum(rows, x - 1),
                c,
                r1: c.last_r1(),
            },
        }
    }
}

impl Taps3<f32> {
    /// Taps of sum of `rows` at `x` with mirrored reads.
    #[inline(always)]
    pub fn mirrored(rows: &[&[f32]], x: usize) -> Self {
        let width = rows[0].len();
        let x = x as isize;
        Self {
            l1: sum_at(rows, mirror_index(x - 1, width)),
            c: sum_at(rows, x as usize),
            r1: sum_at(rows, mirror_index(x + 1, width)),
        }
    }
}

impl<V: F32Vector> Taps5<V> {
    /// Loads taps of sum of `rows` for the window at `x`.
    #[inline(always)]
    pub unsafe fn load(rows: &[&[f32]], x: usize, edge: Edge) -> Self {
        let c = load_sum::<V>(rows, x);
        match edge {
            Edge::First => Self {
                l2: c.first_l2(),
                l1: c.first_l1(),
                c,
                r1: load_sum(rows, x + 1),
                r2: load_sum(rows, x + 2),
            },
            Edge::Interior => Self {
                l2: load_sum(rows, x - 2),
                l1: load_sum(rows, x - 1),
                c,
                r1: load_sum(rows, x + 1),
                r2: load_sum(rows, x + 2),
            },
            Edge::Last => Self {
                l2: load_sum(rows, x - 2),
                l1: load_sum(rows, x - 1),
                c,
                r1: c.last_r1(),
                r2: c.last_r2(),
            },
        }
    }
}

impl Taps5<f32> {
    /// Taps of sum of `rows` at `x` with mirrored reads.
    #[inline(always)]
    pub fn mirrored(rows: &[&[f32]], x: usize) -> Self {
        let width = rows[0].len();
        let x = x as isize;
        Self {
            l2: sum_at(rows, mirror_index(x - 2, width)),
            l1: sum_at(rows, mirror_index(x - 1, width)),
            c: sum_at(rows, x as usize),
            r1: sum_at(rows, mirror_index(x + 1, width)),
            r2: sum_at(rows, mirror_index(x + 2, width)),
        }
    }
}

/// Calls `convolve_at(x, edge)` for vector windows covering a row
/// of `width` values.
///
/// Windows may overlap, overlapped values are computed twice
/// by the same expression. `width` must not be less than `V::LANES + radius`.
#[inline(always)]
pub(crate) unsafe fn sweep_row<V: F32Vector>(
    width: usize,
    radius: usize,
    mut convolve_at: impl FnMut(usize, Edge),
) {
    let lanes = V::LANES;
    debug_assert!(width >= lanes + radius);

    convolve_at(0, Edge::First);
    let mut x = lanes;
    while x + lanes + radius <= width {
        convolve_at(x, Edge::Interior);
        x += lanes;
    }
    if x + lanes < width {
        // Values between the last interior window and the last window.
        convolve_at(width - lanes - radius, Edge::Interior);
    }
    convolve_at(width - lanes, Edge::Last);
}

/// Broadcasts every weight into all lanes of a vector.
#[inline(always)]
pub(crate) unsafe fn splat_all<V: F32Vector, const N: usize>(weights: [f32; N]) -> [V; N] {
    weights.map(|w| V::splat(w))
}
