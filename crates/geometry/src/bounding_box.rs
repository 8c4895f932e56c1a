use glam::Vec3;

use crate::aabb::Aabb;

/// Growable min/max accumulator.
///
/// Until the first [`BoundingBox::grow_to_include`] the box holds no point and
/// its corners are meaningless; it then reports a zero [`size`](Self::size)
/// so that an empty side contributes nothing to a split cost.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BoundingBox {
    min: Vec3,
    max: Vec3,
    has_point: bool,
}

impl BoundingBox {
    pub const EMPTY: Self = Self {
        min: Vec3::ZERO,
        max: Vec3::ZERO,
        has_point: false,
    };

    /// The first call adopts `min`/`max`; later calls widen component-wise.
    pub fn grow_to_include(&mut self, min: Vec3, max: Vec3) {
        if self.has_point {
            self.min = self.min.min(min);
            self.max = self.max.max(max);
        } else {
            self.has_point = true;
            self.min = min;
            self.max = max;
        }
    }

    pub fn grow_to_include_aabb(&mut self, aabb: &Aabb) {
        self.grow_to_include(aabb.min, aabb.max);
    }

    #[must_use]
    pub const fn has_point(&self) -> bool {
        self.has_point
    }

    #[must_use]
    pub const fn min(&self) -> Vec3 {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> Vec3 {
        self.max
    }

    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) / 2.0
    }

    #[must_use]
    pub fn size(&self) -> Vec3 {
        if self.has_point {
            self.max - self.min
        } else {
            Vec3::ZERO
        }
    }

    /// Corners as an [`Aabb`]. An empty accumulator yields [`Aabb::ZERO`].
    #[must_use]
    pub const fn aabb(&self) -> Aabb {
        if self.has_point {
            Aabb {
                min: self.min,
                max: self.max,
            }
        } else {
            Aabb::ZERO
        }
    }
}

impl From<BoundingBox> for Aabb {
    fn from(value: BoundingBox) -> Self {
        value.aabb()
    }
}

impl FromIterator<Aabb> for BoundingBox {
    fn from_iter<T: IntoIterator<Item = Aabb>>(iter: T) -> Self {
        let mut bounds = Self::EMPTY;
        for aabb in iter {
            bounds.grow_to_include_aabb(&aabb);
        }
        bounds
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::BoundingBox;
    use crate::aabb::Aabb;

    #[test]
    fn first_growth_adopts_bounds() {
        let mut bounds = BoundingBox::default();
        assert!(!bounds.has_point());

        bounds.grow_to_include(Vec3::new(3.0, 4.0, 5.0), Vec3::new(6.0, 7.0, 8.0));

        // the zero-initialised corners must not leak into the result
        assert!(bounds.has_point());
        assert_eq!(bounds.min(), Vec3::new(3.0, 4.0, 5.0));
        assert_eq!(bounds.max(), Vec3::new(6.0, 7.0, 8.0));
    }

    #[test]
    fn later_growth_is_component_wise() {
        let mut bounds = BoundingBox::default();
        bounds.grow_to_include(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        bounds.grow_to_include(Vec3::new(-1.0, 0.5, 0.5), Vec3::new(0.5, 2.0, 0.5));

        assert_eq!(bounds.min(), Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(bounds.max(), Vec3::new(1.0, 2.0, 1.0));
        assert_eq!(bounds.center(), Vec3::new(0.0, 1.0, 0.5));
        assert_eq!(bounds.size(), Vec3::new(2.0, 2.0, 1.0));
    }

    #[test]
    fn empty_box_has_no_extent() {
        let bounds = BoundingBox::EMPTY;

        assert_eq!(bounds.size(), Vec3::ZERO);
        assert_eq!(bounds.aabb(), Aabb::ZERO);
    }

    #[test]
    fn collects_from_aabbs() {
        let bounds: BoundingBox = [
            Aabb::new((0.0, 0.0, 0.0), (1.0, 1.0, 1.0)),
            Aabb::new((2.0, -1.0, 0.0), (3.0, 0.0, 4.0)),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            bounds.aabb(),
            Aabb::new((0.0, -1.0, 0.0), (3.0, 1.0, 4.0))
        );
    }
}
