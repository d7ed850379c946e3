use bvh_tree::{BvhTree, Pvs, Triangle, VolumeKind};
use bvh_viz::{OrbitCamera, SceneCamera, TreeNavigator, draw_geometry};
use macroquad::prelude::*;
use nalgebra::{Point3, Vector3};
use ::rand::Rng;

const MAX_DEPTH: u32 = 4;
const TRIANGLE_COUNT: usize = 200;

/// Generates a cloud of small triangles scattered in the unit cube.
fn generate_cloud() -> Vec<Triangle> {
    let mut rng = ::rand::thread_rng();
    let mut jitter = move |scale: f32| {
        Vector3::new(
            rng.gen_range(-scale..scale),
            rng.gen_range(-scale..scale),
            rng.gen_range(-scale..scale),
        )
    };

    (0..TRIANGLE_COUNT)
        .map(|_| {
            let center = Point3::origin() + jitter(1.0);
            Triangle::new(
                center + jitter(0.1),
                center + jitter(0.1),
                center + jitter(0.1),
            )
        })
        .collect()
}

#[macroquad::main("BVH Generated Scene")]
async fn main() {
    let triangles = generate_cloud();
    println!("Generated {} triangles", triangles.len());

    let mut kind = VolumeKind::Aabb;
    let mut tree = BvhTree::build(&triangles, MAX_DEPTH, kind).unwrap();
    println!(
        "Built {:?} hierarchy: {} nodes, depth {}",
        kind,
        tree.node_count(),
        tree.depth()
    );

    let mut orbit = OrbitCamera::new(4.0, 0.4, 0.4);
    let mut scene_camera = SceneCamera::new();
    let mut navigator = TreeNavigator::new(&tree);
    let mut highlight = true;
    let mut dirty = true;
    let mut pvs: Option<Pvs> = None;

    loop {
        orbit.update();
        navigator.update(&tree);

        if is_key_pressed(KeyCode::V) {
            highlight = !highlight;
        }
        if is_key_pressed(KeyCode::G) {
            kind = match kind {
                VolumeKind::Aabb => VolumeKind::Sphere,
                VolumeKind::Sphere => VolumeKind::Aabb,
            };
            tree = BvhTree::build(&triangles, MAX_DEPTH, kind).unwrap();
            navigator = TreeNavigator::new(&tree);
            dirty = true;
        }
        if scene_camera.update() {
            dirty = true;
        }

        if dirty {
            pvs = Some(tree.potentially_visible_set(&triangles, &scene_camera.to_camera()));
            dirty = false;
        }

        clear_background(Color::from_rgba(20, 20, 30, 255));
        set_camera(&orbit.to_camera3d());

        draw_geometry(&triangles, navigator.current_node(&tree), pvs.as_ref(), highlight);
        navigator.render_level(&tree, pvs.as_ref(), highlight);
        scene_camera.draw_gizmo();

        set_default_camera();

        draw_text(
            &format!("BVH Generated Scene - {:?} volumes", kind),
            10.0,
            25.0,
            20.0,
            WHITE,
        );
        if let Some(pvs) = &pvs {
            draw_text(
                &format!(
                    "Max to Test: {}, Actually Tested: {}, PVS: {}",
                    pvs.max_triangles_to_test(&tree),
                    pvs.tested_triangles(),
                    pvs.visible().len()
                ),
                10.0,
                45.0,
                18.0,
                YELLOW,
            );
        }
        navigator.draw_ui(&tree, triangles.len(), 70.0);

        next_frame().await
    }
}
