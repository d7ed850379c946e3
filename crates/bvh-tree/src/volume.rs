//! Bounding volumes: axis-aligned boxes and bounding spheres.
//!
//! The two volume kinds form a closed sum type ([`Volume`]) carried by every
//! tree node and dispatched by pattern matching, so the classifier and the
//! split chooser handle both kinds exhaustively.

use nalgebra::Point3;

use crate::{Triangle, TriangleId};

/// Selects the bounding volume kind used when building a hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeKind {
    /// Axis-aligned bounding boxes.
    Aabb,
    /// Bounding spheres (farthest-point heuristic).
    Sphere,
}

/// An axis-aligned bounding box given by its minimum and maximum corners.
#[derive(Debug, Clone, PartialEq)]
pub struct Aabb {
    min: Point3<f32>,
    max: Point3<f32>,
}

impl Aabb {
    /// Creates a box from its extreme corners.
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        Self { min, max }
    }

    /// Computes the component-wise min/max corners across every vertex of
    /// the referenced triangles.
    ///
    /// # Panics
    ///
    /// Panics if `ids` is empty; the builder guarantees non-empty input at
    /// every recursive call.
    pub fn from_triangles(ids: &[TriangleId], triangles: &[Triangle]) -> Self {
        let first = triangles[ids[0].index()].vertices()[0];
        let mut min = first;
        let mut max = first;

        for id in ids {
            for vertex in triangles[id.index()].vertices() {
                min.x = min.x.min(vertex.x);
                min.y = min.y.min(vertex.y);
                min.z = min.z.min(vertex.z);
                max.x = max.x.max(vertex.x);
                max.y = max.y.max(vertex.y);
                max.z = max.z.max(vertex.z);
            }
        }

        Self { min, max }
    }

    /// Returns the corner with the minimum coordinate on every axis.
    #[inline]
    pub fn min(&self) -> Point3<f32> {
        self.min
    }

    /// Returns the corner with the maximum coordinate on every axis.
    #[inline]
    pub fn max(&self) -> Point3<f32> {
        self.max
    }

    /// Returns the center of the box.
    #[inline]
    pub fn center(&self) -> Point3<f32> {
        Point3::from((self.min.coords + self.max.coords) / 2.0)
    }
}

/// A bounding sphere given by its center and radius.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: Point3<f32>,
    radius: f32,
}

impl Sphere {
    /// Creates a sphere from a center and radius.
    pub fn new(center: Point3<f32>, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Computes a bounding sphere over the referenced triangles.
    ///
    /// Two candidates are built and the smaller one wins:
    ///
    /// 1. Ritter's two-pass approximation: take the first vertex, find its
    ///    farthest vertex `a`, find `a`'s farthest vertex `b`; the candidate
    ///    is centered at the midpoint of `ab` with radius `|ab| / 2`, grown
    ///    to cover any vertex still outside.
    /// 2. A sphere centered at the axis-aligned box center with radius equal
    ///    to the distance to the farthest vertex.
    ///
    /// Neither candidate is the minimal enclosing sphere; this is a
    /// heuristic.
    ///
    /// # Panics
    ///
    /// Panics if `ids` is empty; the builder guarantees non-empty input.
    pub fn from_triangles(ids: &[TriangleId], triangles: &[Triangle]) -> Self {
        let box_center = Aabb::from_triangles(ids, triangles).center();
        let box_radius = (farthest_vertex(box_center, ids, triangles) - box_center).norm();

        let start = triangles[ids[0].index()].vertices()[0];
        let a = farthest_vertex(start, ids, triangles);
        let b = farthest_vertex(a, ids, triangles);

        let center = Point3::from((a.coords + b.coords) / 2.0);
        let mut radius = (a - b).norm() / 2.0;
        for id in ids {
            for vertex in triangles[id.index()].vertices() {
                radius = radius.max((*vertex - center).norm());
            }
        }

        if radius < box_radius {
            Self { center, radius }
        } else {
            Self {
                center: box_center,
                radius: box_radius,
            }
        }
    }

    /// Returns the center of the sphere.
    #[inline]
    pub fn center(&self) -> Point3<f32> {
        self.center
    }

    /// Returns the radius of the sphere.
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }
}

/// Scans all referenced vertices for the one farthest from `from`.
fn farthest_vertex(from: Point3<f32>, ids: &[TriangleId], triangles: &[Triangle]) -> Point3<f32> {
    let mut best = triangles[ids[0].index()].vertices()[0];
    let mut best_distance = (best - from).norm();

    for id in ids {
        for vertex in triangles[id.index()].vertices() {
            let distance = (*vertex - from).norm();
            if distance > best_distance {
                best = *vertex;
                best_distance = distance;
            }
        }
    }

    best
}

/// The bounding volume carried by a tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum Volume {
    Aabb(Aabb),
    Sphere(Sphere),
}

impl Volume {
    /// Computes the bounding volume of the requested kind over the
    /// referenced triangles.
    pub fn from_triangles(kind: VolumeKind, ids: &[TriangleId], triangles: &[Triangle]) -> Self {
        match kind {
            VolumeKind::Aabb => Self::Aabb(Aabb::from_triangles(ids, triangles)),
            VolumeKind::Sphere => Self::Sphere(Sphere::from_triangles(ids, triangles)),
        }
    }
}
