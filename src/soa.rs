//! SoA (Structure of Arrays) skeleton storage
//!
//! The culling kernel reads positions as three contiguous coordinate arrays
//! so the AVX2 path can load 8 entities per register without shuffles.
//!
//! ```text
//! X: [x0,x1,x2,x3,x4,x5,x6,x7, ...]  ← one 256-bit load
//! Y: [y0,y1,y2,y3,y4,y5,y6,y7, ...]
//! Z: [z0,z1,z2,z3,z4,z5,z6,z7, ...]
//! ```
//!
//! Unlike a padded SoA buffer the arrays hold exactly `len` entries: every
//! slot is a real entity and gets a result.
//!
//! # Usage
//!
//! ```rust
//! use everest_native::soa::SkeletonPositions;
//! use glam::Vec3;
//!
//! let positions = SkeletonPositions::from_vec3_slice(&[
//!     Vec3::new(3.0, 4.0, 0.0),
//!     Vec3::new(100.0, 0.0, 0.0),
//! ]);
//! let job = positions.culling_job(Vec3::ZERO, 30.0).unwrap();
//! assert_eq!(job.len(), 2);
//! ```

use crate::batch::CullingJob;
use crate::error::KernelResult;
use glam::Vec3;

/// Owned SoA skeleton positions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkeletonPositions {
    x: Vec<f32>,
    y: Vec<f32>,
    z: Vec<f32>,
}

impl SkeletonPositions {
    /// Create empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage with room for `capacity` skeletons
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
            z: Vec::with_capacity(capacity),
        }
    }

    /// Convert from a slice of Vec3 (AoS to SoA)
    pub fn from_vec3_slice(points: &[Vec3]) -> Self {
        let mut soa = Self::with_capacity(points.len());
        for p in points {
            soa.push_vec3(*p);
        }
        soa
    }

    /// Push a single skeleton
    #[inline]
    pub fn push(&mut self, x: f32, y: f32, z: f32) {
        self.x.push(x);
        self.y.push(y);
        self.z.push(z);
    }

    /// Push a Vec3 skeleton
    #[inline]
    pub fn push_vec3(&mut self, p: Vec3) {
        self.push(p.x, p.y, p.z);
    }

    /// Overwrite the position of skeleton `index`
    ///
    /// Returns `false` if `index` is out of range.
    #[inline]
    pub fn set(&mut self, index: usize, p: Vec3) -> bool {
        if index >= self.len() {
            return false;
        }
        self.x[index] = p.x;
        self.y[index] = p.y;
        self.z[index] = p.z;
        true
    }

    /// Number of skeletons stored
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Position of skeleton `index`
    #[inline]
    pub fn get(&self, index: usize) -> Option<Vec3> {
        if index < self.len() {
            Some(Vec3::new(self.x[index], self.y[index], self.z[index]))
        } else {
            None
        }
    }

    /// Remove all skeletons
    pub fn clear(&mut self) {
        self.x.clear();
        self.y.clear();
        self.z.clear();
    }

    /// Iterate over positions as Vec3
    pub fn iter(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.z)
            .map(|((&x, &y), &z)| Vec3::new(x, y, z))
    }

    /// Coordinate arrays
    #[inline]
    pub fn as_slices(&self) -> (&[f32], &[f32], &[f32]) {
        (&self.x, &self.y, &self.z)
    }

    /// Borrow as a culling job input
    ///
    /// # Errors
    /// [`crate::KernelError::TooManyEntities`] if the batch overflows `i32`
    pub fn culling_job(
        &self,
        camera: Vec3,
        squared_draw_distance: f32,
    ) -> KernelResult<CullingJob<'_>> {
        CullingJob::new(camera, squared_draw_distance, &self.x, &self.y, &self.z)
    }
}

impl FromIterator<Vec3> for SkeletonPositions {
    fn from_iter<T: IntoIterator<Item = Vec3>>(iter: T) -> Self {
        let iter = iter.into_iter();
        let (lower, upper) = iter.size_hint();
        let mut soa = Self::with_capacity(upper.unwrap_or(lower));
        for p in iter {
            soa.push_vec3(p);
        }
        soa
    }
}

impl<'a> FromIterator<&'a Vec3> for SkeletonPositions {
    fn from_iter<T: IntoIterator<Item = &'a Vec3>>(iter: T) -> Self {
        iter.into_iter().copied().collect()
    }
}
