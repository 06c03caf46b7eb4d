//! Coefficients of symmetric kernels.
//!
//! A symmetric kernel has one weight per class of offsets that map onto
//! each other under the symmetries of its square support, so weights are
//! stored as small tables indexed by the class instead of dense arrays.

use std::ops::Index;

/// Class of an offset inside of a 3x3 window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symmetric3Class {
    /// `(0, 0)`
    Center,
    /// `(±1, 0)`, `(0, ±1)`
    Orthogonal,
    /// `(±1, ±1)`
    Diagonal,
}

impl Symmetric3Class {
    pub const ALL: [Self; 3] = [Self::Center, Self::Orthogonal, Self::Diagonal];

    /// Returns class of the offset or `None` if the offset
    /// is out of the window.
    pub fn of(dx: i32, dy: i32) -> Option<Self> {
        match (dx.unsigned_abs(), dy.unsigned_abs()) {
            (0, 0) => Some(Self::Center),
            (0, 1) | (1, 0) => Some(Self::Orthogonal),
            (1, 1) => Some(Self::Diagonal),
            _ => None,
        }
    }

    /// Count of offsets in the class.
    pub fn taps(self) -> u32 {
        match self {
            Self::Center => 1,
            Self::Orthogonal | Self::Diagonal => 4,
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Class of an offset inside of a 5x5 window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symmetric5Class {
    /// `(0, 0)`
    Center,
    /// `(±1, 0)`, `(0, ±1)`
    Orthogonal1,
    /// `(±2, 0)`, `(0, ±2)`
    Orthogonal2,
    /// `(±1, ±1)`
    Diagonal1,
    /// `(±2, ±2)`
    Diagonal2,
    /// `(±1, ±2)`, `(±2, ±1)`
    Knight,
}

impl Symmetric5Class {
    pub const ALL: [Self; 6] = [
        Self::Center,
        Self::Orthogonal1,
        Self::Orthogonal2,
        Self::Diagonal1,
        Self::Diagonal2,
        Self::Knight,
    ];

    /// Returns class of the offset or `None` if the offset
    /// is out of the window.
    pub fn of(dx: i32, dy: i32) -> Option<Self> {
        let (a, b) = (dx.unsigned_abs(), dy.unsigned_abs());
        match (a.min(b), a.max(b)) {
            (0, 0) => Some(Self::Center),
            (0, 1) => Some(Self::Orthogonal1),
            (0, 2) => Some(Self::Orthogonal2),
            (1, 1) => Some(Self::Diagonal1),
            (2, 2) => Some(Self::Diagonal2),
            (1, 2) => Some(Self::Knight),
            _ => None,
        }
    }

    /// Count of offsets in the class.
    pub fn taps(self) -> u32 {
        match self {
            Self::Center => 1,
            Self::Knight => 8,
            _ => 4,
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Weights of a symmetric 3x3 kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightsSymmetric3 {
    weights: [f32; 3],
}

impl WeightsSymmetric3 {
    pub const fn new(center: f32, orthogonal: f32, diagonal: f32) -> Self {
        Self {
            weights: [center, orthogonal, diagonal],
        }
    }

    /// Lowpass kernel which preserves DC (weights sum to one).
    pub const fn lowpass() -> Self {
        Self::new(0.36208932, 0.12820096, 0.03127668)
    }

    #[inline]
    pub fn get(&self, class: Symmetric3Class) -> f32 {
        self.weights[class.index()]
    }

    /// Weight of the offset, zero outside of the window.
    pub fn weight_at(&self, dx: i32, dy: i32) -> f32 {
        Symmetric3Class::of(dx, dy).map_or(0., |class| self.get(class))
    }

    /// Sum of all weights of the dense kernel.
    pub fn sum(&self) -> f32 {
        Symmetric3Class::ALL
            .iter()
            .map(|&class| class.taps() as f32 * self.get(class))
            .sum()
    }
}

impl Index<Symmetric3Class> for WeightsSymmetric3 {
    type Output = f32;

    fn index(&self, class: Symmetric3Class) -> &Self::Output {
        &self.weights[class.index()]
    }
}

/// Weights of a symmetric 5x5 kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightsSymmetric5 {
    weights: [f32; 6],
}

impl WeightsSymmetric5 {
    pub const fn new(
        center: f32,
        orthogonal1: f32,
        orthogonal2: f32,
        diagonal1: f32,
        diagonal2: f32,
        knight: f32,
    ) -> Self {
        Self {
            weights: [center, orthogonal1, orthogonal2, diagonal1, diagonal2, knight],
        }
    }

    /// Lowpass kernel equal to the dense form of [WeightsSeparable5::lowpass].
    pub const fn lowpass() -> Self {
        Self::from_isotropic_taps(SEPARABLE5_LOWPASS)
    }

    /// Outer product of the 1D kernel `[t2, t1, t0, t1, t2]` with itself.
    const fn from_isotropic_taps(taps: [f32; 3]) -> Self {
        let [t0, t1, t2] = taps;
        Self::new(t0 * t0, t1 * t0, t2 * t0, t1 * t1, t2 * t2, t1 * t2)
    }

    #[inline]
    pub fn get(&self, class: Symmetric5Class) -> f32 {
        self.weights[class.index()]
    }

    /// Weight of the offset, zero outside of the window.
    pub fn weight_at(&self, dx: i32, dy: i32) -> f32 {
        Symmetric5Class::of(dx, dy).map_or(0., |class| self.get(class))
    }

    /// Sum of all weights of the dense kernel.
    pub fn sum(&self) -> f32 {
        Symmetric5Class::ALL
            .iter()
            .map(|&class| class.taps() as f32 * self.get(class))
            .sum()
    }
}

impl Index<Symmetric5Class> for WeightsSymmetric5 {
    type Output = f32;

    fn index(&self, class: Symmetric5Class) -> &Self::Output {
        &self.weights[class.index()]
    }
}

const SEPARABLE5_LOWPASS: [f32; 3] = [0.41714928, 0.25539268, 0.03603267];

/// Weights of a separable 5x5 kernel.
///
/// Each 1D kernel is stored as `[center, ±1, ±2]` taps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightsSeparable5 {
    horizontal: [f32; 3],
    vertical: [f32; 3],
}

impl WeightsSeparable5 {
    pub const fn new(horizontal: [f32; 3], vertical: [f32; 3]) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Kernel with the same 1D kernel in both directions.
    pub const fn isotropic(taps: [f32; 3]) -> Self {
        Self::new(taps, taps)
    }

    /// Lowpass kernel which preserves DC (weights sum to one).
    pub const fn lowpass() -> Self {
        Self::isotropic(SEPARABLE5_LOWPASS)
    }

    #[inline]
    pub fn horizontal(&self) -> [f32; 3] {
        self.horizontal
    }

    #[inline]
    pub fn vertical(&self) -> [f32; 3] {
        self.vertical
    }

    /// Weight of the offset in the dense form, zero outside of the window.
    pub fn weight_at(&self, dx: i32, dy: i32) -> f32 {
        let (ax, ay) = (dx.unsigned_abs() as usize, dy.unsigned_abs() as usize);
        match (self.horizontal.get(ax), self.vertical.get(ay)) {
            (Some(&h), Some(&v)) => h * v,
            _ => 0.,
        }
    }

    /// Dense form of the kernel, `dense[dy + 2][dx + 2]`.
    pub fn dense(&self) -> [[f32; 5]; 5] {
        std::array::from_fn(|y| std::array::from_fn(|x| self.weight_at(x as i32 - 2, y as i32 - 2)))
    }

    /// Returns the same kernel as [WeightsSymmetric5].
    ///
    /// Only kernels with equal horizontal and vertical parts
    /// are symmetric relative to the diagonals of the window.
    pub fn to_symmetric5(&self) -> Option<WeightsSymmetric5> {
        if self.horizontal != self.vertical {
            return None;
        }
        Some(WeightsSymmetric5::from_isotropic_taps(self.horizontal))
    }

    /// Sum of all weights of the dense kernel.
    pub fn sum(&self) -> f32 {
        let sum_1d = |taps: [f32; 3]| taps[0] + 2. * (taps[1] + taps[2]);
        sum_1d(self.horizontal) * sum_1d(self.vertical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_of_3x3_window() {
        let mut counts = [0u32; 3];
        for dy in -1..=1 {
            for dx in -1..=1 {
                let class = Symmetric3Class::of(dx, dy).unwrap();
                counts[class.index()] += 1;
            }
        }
        for class in Symmetric3Class::ALL {
            assert_eq!(counts[class.index()], class.taps());
        }
        assert_eq!(Symmetric3Class::of(2, 0), None);
        assert_eq!(Symmetric3Class::of(-1, 1), Some(Symmetric3Class::Diagonal));
    }

    #[test]
    fn classes_of_5x5_window() {
        let mut counts = [0u32; 6];
        for dy in -2..=2 {
            for dx in -2..=2 {
                let class = Symmetric5Class::of(dx, dy).unwrap();
                counts[class.index()] += 1;
            }
        }
        for class in Symmetric5Class::ALL {
            assert_eq!(counts[class.index()], class.taps());
        }
        assert_eq!(Symmetric5Class::of(-2, 1), Some(Symmetric5Class::Knight));
        assert_eq!(Symmetric5Class::of(1, -2), Some(Symmetric5Class::Knight));
        assert_eq!(Symmetric5Class::of(3, 0), None);
    }

    #[test]
    fn lowpass_weights_preserve_dc() {
        assert!((WeightsSymmetric3::lowpass().sum() - 1.).abs() < 1e-6);
        assert!((WeightsSymmetric5::lowpass().sum() - 1.).abs() < 1e-6);
        assert!((WeightsSeparable5::lowpass().sum() - 1.).abs() < 1e-6);
    }

    #[test]
    fn index_by_class() {
        let weights = WeightsSymmetric3::new(0.5, 0.1, 0.025);
        assert_eq!(weights[Symmetric3Class::Center], 0.5);
        assert_eq!(weights[Symmetric3Class::Diagonal], 0.025);
        let weights = WeightsSymmetric5::lowpass();
        for class in Symmetric5Class::ALL {
            assert_eq!(weights[class], weights.get(class), "{class:?}");
        }
    }

    #[test]
    fn separable_expands_into_symmetric() {
        let separable = WeightsSeparable5::isotropic([0.5, 0.2, 0.05]);
        let symmetric = separable.to_symmetric5().unwrap();
        let dense = separable.dense();
        for dy in -2..=2 {
            for dx in -2..=2 {
                let expected = dense[(dy + 2) as usize][(dx + 2) as usize];
                assert_eq!(symmetric.weight_at(dx, dy), expected, "({dx}, {dy})");
            }
        }
        assert_eq!(WeightsSeparable5::lowpass().to_symmetric5(), Some(WeightsSymmetric5::lowpass()));
    }

    #[test]
    fn anisotropic_separable_is_not_symmetric() {
        let separable = WeightsSeparable5::new([0.5, 0.2, 0.05], [0.6, 0.2, 0.]);
        assert_eq!(separable.to_symmetric5(), None);
        assert_eq!(separable.weight_at(1, 0), 0.2 * 0.6);
        assert_eq!(separable.weight_at(0, 1), 0.5 * 0.2);
        assert_eq!(separable.weight_at(3, 0), 0.);
    }
}
