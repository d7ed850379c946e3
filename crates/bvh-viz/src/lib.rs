//! Shared visualization utilities for the BVH examples.

use std::hash::{Hash, Hasher};
use std::io;
use std::path::Path;

use bvh_tree::{BvhNode, Camera, Pvs, Sphere, Triangle, TriangleId, Volume};
use macroquad::models::{Mesh, Vertex, draw_mesh};
use macroquad::prelude::*;
use nalgebra::{Point3, Rotation3, Unit, Vector3};

pub mod navigator;
pub use navigator::TreeNavigator;

/// Loads triangle geometry from a `.raw` file: whitespace-separated floats,
/// nine per triangle. The model is centered and uniformly scaled so its
/// largest extent spans 2 units. Reading stops at the first non-numeric
/// token, and a trailing partial triangle is ignored with a warning.
pub fn load_raw(path: impl AsRef<Path>) -> io::Result<Vec<Triangle>> {
    let text = std::fs::read_to_string(path)?;

    let mut raw: Vec<f32> = Vec::new();
    for token in text.split_whitespace() {
        match token.parse::<f32>() {
            Ok(value) => raw.push(value),
            Err(_) => break,
        }
    }

    if raw.len() % 9 != 0 {
        log::warn!(
            "model has {} coordinates, not a multiple of 9; trailing vertices ignored",
            raw.len()
        );
    }

    let points: Vec<Point3<f32>> = raw
        .chunks_exact(3)
        .map(|c| Point3::new(c[0], c[1], c[2]))
        .collect();
    if points.is_empty() {
        return Ok(Vec::new());
    }

    let mut min = points[0];
    let mut max = points[0];
    for p in &points {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        min.z = min.z.min(p.z);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
        max.z = max.z.max(p.z);
    }

    let extent = (max.x - min.x).max(max.y - min.y).max(max.z - min.z);
    let scale = if extent > 0.0 { 2.0 / extent } else { 1.0 };
    let center = (min.coords + max.coords) / 2.0;
    let normalize = |p: &Point3<f32>| Point3::from((p.coords - center) * scale);

    Ok(points
        .chunks_exact(3)
        .map(|c| Triangle::new(normalize(&c[0]), normalize(&c[1]), normalize(&c[2])))
        .collect())
}

/// Generates a deterministic color from a triangle's vertices using hashing,
/// so a triangle keeps its color across frames and rebuilds.
pub fn triangle_color(triangle: &Triangle) -> Color {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    for v in triangle.vertices() {
        v.x.to_bits().hash(&mut hasher);
        v.y.to_bits().hash(&mut hasher);
        v.z.to_bits().hash(&mut hasher);
    }
    let hash = hasher.finish();

    let r = (((hash >> 16) & 0xFF) as u8).max(40);
    let g = (((hash >> 8) & 0xFF) as u8).max(40);
    let b = ((hash & 0xFF) as u8).max(40);

    Color::from_rgba(r, g, b, 255)
}

fn to_vec3(p: &Point3<f32>) -> Vec3 {
    vec3(p.x, p.y, p.z)
}

/// Draws a filled triangle as a single-face mesh.
pub fn draw_triangle_3d(triangle: &Triangle, color: Color) {
    let vertices: Vec<Vertex> = triangle
        .vertices()
        .iter()
        .map(|p| Vertex::new2(to_vec3(p), vec2(0.0, 0.0), color))
        .collect();

    draw_mesh(&Mesh {
        vertices,
        indices: vec![0, 1, 2],
        texture: None,
    });
}

/// Draws the wireframe outline of a triangle.
pub fn draw_triangle_wire(triangle: &Triangle, color: Color) {
    let [a, b, c] = triangle.vertices();
    draw_line_3d(to_vec3(a), to_vec3(b), color);
    draw_line_3d(to_vec3(b), to_vec3(c), color);
    draw_line_3d(to_vec3(c), to_vec3(a), color);
}

/// Draws a bounding volume as a wireframe: the 12 edges of a box, or three
/// axis-aligned great circles for a sphere.
pub fn draw_volume(volume: &Volume, color: Color) {
    match volume {
        Volume::Aabb(aabb) => {
            let min = aabb.min();
            let max = aabb.max();

            let corners = [
                vec3(min.x, min.y, min.z),
                vec3(max.x, min.y, min.z),
                vec3(max.x, max.y, min.z),
                vec3(min.x, max.y, min.z),
                vec3(min.x, min.y, max.z),
                vec3(max.x, min.y, max.z),
                vec3(max.x, max.y, max.z),
                vec3(min.x, max.y, max.z),
            ];
            let edges: [(usize, usize); 12] = [
                (0, 1),
                (1, 2),
                (2, 3),
                (3, 0),
                (4, 5),
                (5, 6),
                (6, 7),
                (7, 4),
                (0, 4),
                (1, 5),
                (2, 6),
                (3, 7),
            ];
            for (a, b) in edges {
                draw_line_3d(corners[a], corners[b], color);
            }
        }
        Volume::Sphere(sphere) => draw_sphere_wire(sphere, color),
    }
}

const SPHERE_SEGMENTS: usize = 50;

fn draw_sphere_wire(sphere: &Sphere, color: Color) {
    let center = to_vec3(&sphere.center());
    let radius = sphere.radius();

    let circle = |point_at: &dyn Fn(f32) -> Vec3| {
        let mut previous = point_at(0.0);
        for i in 1..=SPHERE_SEGMENTS {
            let theta = 2.0 * std::f32::consts::PI * i as f32 / SPHERE_SEGMENTS as f32;
            let next = point_at(theta);
            draw_line_3d(previous, next, color);
            previous = next;
        }
    };

    circle(&|t| center + vec3(radius * t.cos(), radius * t.sin(), 0.0));
    circle(&|t| center + vec3(radius * t.cos(), 0.0, radius * t.sin()));
    circle(&|t| center + vec3(0.0, radius * t.cos(), radius * t.sin()));
}

/// Draws the geometry, coloring potentially visible triangles orange and the
/// triangles of the navigator's current node green.
pub fn draw_geometry(
    triangles: &[Triangle],
    current: &BvhNode,
    pvs: Option<&Pvs>,
    highlight: bool,
) {
    for (index, triangle) in triangles.iter().enumerate() {
        let id = TriangleId::new(index);
        let color = if highlight
            && pvs.is_some_and(|pvs| pvs.visible().binary_search(&id).is_ok())
        {
            ORANGE
        } else if current.triangles().binary_search(&id).is_ok() {
            GREEN
        } else {
            triangle_color(triangle)
        };
        draw_triangle_wire(triangle, color);
    }
}

/// The in-scene query camera: a position with an orthonormal basis, driven
/// by keyboard input. `W/S` and `A/D` rotate it, `Q/E` dolly it along its
/// viewing direction, `R` resets it to the origin.
pub struct SceneCamera {
    pub position: Point3<f32>,
    pub right: Vector3<f32>,
    pub up: Vector3<f32>,
    pub forward: Vector3<f32>,
}

impl Default for SceneCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneCamera {
    const STEP: f32 = 0.1;

    /// Creates a camera at the origin with an axis-aligned basis.
    pub fn new() -> Self {
        Self {
            position: Point3::origin(),
            right: Vector3::x(),
            up: Vector3::y(),
            forward: Vector3::z(),
        }
    }

    /// Resets the camera to its initial placement.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Handles keyboard input. Returns true when the camera changed and the
    /// potentially visible set should be recomputed.
    pub fn update(&mut self) -> bool {
        let mut changed = false;

        if is_key_pressed(KeyCode::R) {
            self.reset();
            changed = true;
        }
        if is_key_pressed(KeyCode::W) {
            self.rotate_right_axis(Self::STEP);
            changed = true;
        }
        if is_key_pressed(KeyCode::S) {
            self.rotate_right_axis(-Self::STEP);
            changed = true;
        }
        if is_key_pressed(KeyCode::A) {
            self.rotate_up_axis(Self::STEP);
            changed = true;
        }
        if is_key_pressed(KeyCode::D) {
            self.rotate_up_axis(-Self::STEP);
            changed = true;
        }
        if is_key_pressed(KeyCode::Q) {
            self.position += self.forward * Self::STEP;
            changed = true;
        }
        if is_key_pressed(KeyCode::E) {
            self.position -= self.forward * Self::STEP;
            changed = true;
        }

        changed
    }

    /// Rotates the right vector around the up vector.
    fn rotate_right_axis(&mut self, angle: f32) {
        let rotation = Rotation3::from_axis_angle(&Unit::new_normalize(self.up), angle);
        self.right = (rotation * self.right).normalize();
        self.forward = self.right.cross(&self.up).normalize();
    }

    /// Rotates the up vector around the right vector.
    fn rotate_up_axis(&mut self, angle: f32) {
        let rotation = Rotation3::from_axis_angle(&Unit::new_normalize(self.right), angle);
        self.up = (rotation * self.up).normalize();
        self.forward = self.right.cross(&self.up).normalize();
    }

    /// Produces the core camera state for a visibility query.
    pub fn to_camera(&self) -> Camera {
        Camera::new(self.position, self.forward, self.right, self.up)
    }

    /// Draws the camera gizmo: the viewing direction as an arrow plus a
    /// translucent quad spanning the camera plane.
    pub fn draw_gizmo(&self) {
        let arrow_head = 0.2;
        let length = 0.5;

        let start = to_vec3(&self.position);
        let end = to_vec3(&(self.position + self.forward * length));
        let back = self.forward * arrow_head;

        draw_line_3d(start, end, MAGENTA);
        for side in [
            self.right * arrow_head,
            -self.right * arrow_head,
            self.up * arrow_head,
            -self.up * arrow_head,
        ] {
            let tip = self.position + self.forward * length - back + side;
            draw_line_3d(end, to_vec3(&tip), MAGENTA);
        }

        let quad_color = Color::from_rgba(255, 255, 255, 100);
        let corners = [
            self.position - self.right - self.up,
            self.position + self.right - self.up,
            self.position + self.right + self.up,
            self.position - self.right + self.up,
        ];
        let vertices: Vec<Vertex> = corners
            .iter()
            .map(|p| Vertex::new2(to_vec3(p), vec2(0.0, 0.0), quad_color))
            .collect();
        draw_mesh(&Mesh {
            vertices,
            indices: vec![0, 1, 2, 0, 2, 3],
            texture: None,
        });
    }
}

/// Simple orbit camera for inspecting the scene from outside.
pub struct OrbitCamera {
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub target: Vec3,
    /// Multiplier for scroll wheel zoom
    pub zoom_speed: f32,
    /// Minimum distance from target
    pub min_distance: f32,
    /// Maximum distance from target
    pub max_distance: f32,
}

impl OrbitCamera {
    /// Creates a new orbit camera with the given configuration.
    pub fn new(distance: f32, yaw: f32, pitch: f32) -> Self {
        Self {
            distance,
            yaw,
            pitch,
            target: vec3(0.0, 0.0, 0.0),
            zoom_speed: 0.5,
            min_distance: 1.5,
            max_distance: 15.0,
        }
    }

    /// Updates camera state from user input (mouse drag and scroll).
    pub fn update(&mut self) {
        if is_mouse_button_down(MouseButton::Left) {
            let delta = mouse_delta_position();
            self.yaw -= delta.x * 2.0;
            self.pitch -= delta.y * 2.0;
        }

        // Clamp pitch to avoid gimbal lock
        self.pitch = self.pitch.clamp(-1.5, 1.5);

        let scroll = mouse_wheel().1;
        self.distance -= scroll * self.zoom_speed;
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);
    }

    /// Returns the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + vec3(x, y, z)
    }

    /// Converts to macroquad's Camera3D for rendering.
    pub fn to_camera3d(&self) -> Camera3D {
        Camera3D {
            position: self.position(),
            up: vec3(0.0, 1.0, 0.0),
            target: self.target,
            ..Default::default()
        }
    }
}
