//! Axis Aligned Bounding Boxes.

use std::fmt;
use std::ops::Index;

use nalgebra::{Point, SVector};
use num_traits::Float;

use crate::bounding_hierarchy::BHValue;
use crate::utils::{fast_max, fast_min};

/// [`Aabb`] struct.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb<T: BHValue, const D: usize> {
    /// Minimum coordinates
    pub min: Point<T, D>,

    /// Maximum coordinates
    pub max: Point<T, D>,
}

impl<T: BHValue, const D: usize> fmt::Display for Aabb<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Min bound: {}; Max bound: {}", self.min, self.max)
    }
}

/// A trait implemented by things which can be bounded by an [`Aabb`].
///
/// [`Aabb`]: struct.Aabb.html
///
pub trait Bounded<T: BHValue, const D: usize> {
    /// Returns the geometric bounds of this object in the form of an [`Aabb`].
    ///
    /// # Examples
    /// ```
    /// use segtrace::aabb::{Aabb, Bounded};
    /// use nalgebra::Point3;
    ///
    /// struct Something;
    ///
    /// impl Bounded<f32, 3> for Something {
    ///     fn aabb(&self) -> Aabb<f32, 3> {
    ///         let point1 = Point3::new(0.0,0.0,0.0);
    ///         let point2 = Point3::new(1.0,1.0,1.0);
    ///         Aabb::with_bounds(point1, point2)
    ///     }
    /// }
    ///
    /// let something = Something;
    /// let aabb = something.aabb();
    ///
    /// assert!(aabb.contains(&Point3::new(0.0,0.0,0.0)));
    /// assert!(aabb.contains(&Point3::new(1.0,1.0,1.0)));
    /// ```
    ///
    /// [`Aabb`]: struct.Aabb.html
    ///
    fn aabb(&self) -> Aabb<T, D>;
}

impl<T: BHValue, const D: usize> Aabb<T, D> {
    /// Creates a new [`Aabb`] with the given bounds.
    ///
    /// # Examples
    /// ```
    /// use segtrace::aabb::Aabb;
    /// use nalgebra::Point3;
    ///
    /// let aabb = Aabb::with_bounds(Point3::new(-1.0,-1.0,-1.0), Point3::new(1.0,1.0,1.0));
    /// assert_eq!(aabb.min.x, -1.0);
    /// assert_eq!(aabb.max.z, 1.0);
    /// ```
    ///
    /// [`Aabb`]: struct.Aabb.html
    ///
    pub fn with_bounds(min: Point<T, D>, max: Point<T, D>) -> Self {
        Aabb { min, max }
    }

    /// Creates a new empty [`Aabb`].
    ///
    /// The empty box has its minimum at positive and its maximum at negative infinity,
    /// so growing it by any point yields the box of that single point.
    ///
    /// # Examples
    /// ```
    /// use segtrace::aabb::Aabb;
    ///
    /// let aabb = Aabb::<f32, 3>::empty();
    /// assert!(aabb.is_empty());
    /// ```
    ///
    /// [`Aabb`]: struct.Aabb.html
    ///
    pub fn empty() -> Self {
        Self {
            min: Point::from(SVector::<T, D>::repeat(<T as Float>::infinity())),
            max: Point::from(SVector::<T, D>::repeat(<T as Float>::neg_infinity())),
        }
    }

    /// Creates a new infinite [`Aabb`], which contains every finite point.
    ///
    /// [`Aabb`]: struct.Aabb.html
    ///
    pub fn infinite() -> Self {
        Self {
            min: Point::from(SVector::<T, D>::repeat(<T as Float>::neg_infinity())),
            max: Point::from(SVector::<T, D>::repeat(<T as Float>::infinity())),
        }
    }

    /// Returns true if no point lies inside the [`Aabb`], i.e. some axis has its minimum
    /// above its maximum (or a NaN bound).
    ///
    /// A flat box, one whose minimum equals its maximum along some axis, is not empty.
    ///
    /// [`Aabb`]: struct.Aabb.html
    ///
    pub fn is_empty(&self) -> bool {
        (0..D).any(|i| !(self.min[i] <= self.max[i]))
    }

    /// Returns true if the [`Point`] is inside the [`Aabb`]. Bounds are inclusive.
    ///
    /// # Examples
    /// ```
    /// use segtrace::aabb::Aabb;
    /// use nalgebra::Point3;
    ///
    /// let aabb = Aabb::with_bounds(Point3::new(-1.0,-1.0,-1.0), Point3::new(1.0,1.0,1.0));
    /// assert!(aabb.contains(&Point3::new(0.0, 0.0, 0.0)));
    /// assert!(aabb.contains(&Point3::new(1.0, 0.0, -1.0)));
    /// assert!(!aabb.contains(&Point3::new(1.1, 0.0, 0.0)));
    /// ```
    ///
    /// [`Aabb`]: struct.Aabb.html
    /// [`Point`]: nalgebra::Point
    ///
    pub fn contains(&self, p: &Point<T, D>) -> bool {
        (0..D).all(|i| self.min[i] <= p[i] && p[i] <= self.max[i])
    }

    /// Returns true if `other` lies completely inside this [`Aabb`].
    /// An empty `other` is contained in everything.
    ///
    /// [`Aabb`]: struct.Aabb.html
    ///
    pub fn contains_aabb(&self, other: &Aabb<T, D>) -> bool {
        other.is_empty() || (self.contains(&other.min) && self.contains(&other.max))
    }

    /// Returns a new minimal [`Aabb`] which contains both this [`Aabb`] and `other`.
    ///
    /// [`Aabb`]: struct.Aabb.html
    ///
    pub fn join(&self, other: &Aabb<T, D>) -> Aabb<T, D> {
        let mut joined = *self;
        joined.join_mut(other);
        joined
    }

    /// Mutable version of [`Aabb::join`].
    ///
    /// [`Aabb::join`]: struct.Aabb.html#method.join
    ///
    pub fn join_mut(&mut self, other: &Aabb<T, D>) {
        for i in 0..D {
            self.min[i] = fast_min(other.min[i], self.min[i]);
            self.max[i] = fast_max(other.max[i], self.max[i]);
        }
    }

    /// Returns a new minimal [`Aabb`] which contains both this [`Aabb`] and the [`Point`] `other`.
    ///
    /// # Examples
    /// ```
    /// use segtrace::aabb::Aabb;
    /// use nalgebra::Point3;
    ///
    /// let aabb = Aabb::empty()
    ///     .grow(&Point3::new(1.0, 2.0, 3.0))
    ///     .grow(&Point3::new(-1.0, 0.0, 5.0));
    /// assert_eq!(aabb.min, Point3::new(-1.0, 0.0, 3.0));
    /// assert_eq!(aabb.max, Point3::new(1.0, 2.0, 5.0));
    /// ```
    ///
    /// [`Aabb`]: struct.Aabb.html
    /// [`Point`]: nalgebra::Point
    ///
    pub fn grow(&self, other: &Point<T, D>) -> Aabb<T, D> {
        let mut grown = *self;
        grown.grow_mut(other);
        grown
    }

    /// Mutable version of [`Aabb::grow`].
    ///
    /// [`Aabb::grow`]: struct.Aabb.html#method.grow
    ///
    pub fn grow_mut(&mut self, other: &Point<T, D>) {
        for i in 0..D {
            self.min[i] = fast_min(other[i], self.min[i]);
            self.max[i] = fast_max(other[i], self.max[i]);
        }
    }

    /// Returns the size of this [`Aabb`] in all dimensions.
    ///
    /// [`Aabb`]: struct.Aabb.html
    ///
    pub fn size(&self) -> SVector<T, D> {
        self.max - self.min
    }

    /// Returns the center [`Point`] of the [`Aabb`].
    ///
    /// [`Aabb`]: struct.Aabb.html
    /// [`Point`]: nalgebra::Point
    ///
    pub fn center(&self) -> Point<T, D> {
        let two = T::one() + T::one();
        Point::from((self.min.coords + self.max.coords) / two)
    }
}

impl<T: BHValue, const D: usize> Default for Aabb<T, D> {
    fn default() -> Aabb<T, D> {
        Aabb::empty()
    }
}

/// Make [`Aabb`]s indexable. `aabb[0]` gives a reference to the minimum bound.
/// All other indices return a reference to the maximum bound.
///
/// [`Aabb`]: struct.Aabb.html
///
impl<T: BHValue, const D: usize> Index<usize> for Aabb<T, D> {
    type Output = Point<T, D>;

    fn index(&self, index: usize) -> &Point<T, D> {
        if index == 0 {
            &self.min
        } else {
            &self.max
        }
    }
}

/// Implementation of [`Bounded`] for [`Aabb`].
///
/// [`Bounded`]: trait.Bounded.html
/// [`Aabb`]: struct.Aabb.html
///
impl<T: BHValue, const D: usize> Bounded<T, D> for Aabb<T, D> {
    fn aabb(&self) -> Aabb<T, D> {
        *self
    }
}

/// Implementation of [`Bounded`] for [`Point`].
///
/// [`Bounded`]: trait.Bounded.html
/// [`Point`]: nalgebra::Point
///
impl<T: BHValue, const D: usize> Bounded<T, D> for Point<T, D> {
    fn aabb(&self) -> Aabb<T, D> {
        Aabb::with_bounds(*self, *self)
    }
}
