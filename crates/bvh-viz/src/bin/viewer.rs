use bvh_tree::{BvhTree, Pvs, Triangle, VolumeKind};
use bvh_viz::{OrbitCamera, SceneCamera, TreeNavigator, draw_geometry, load_raw};
use macroquad::prelude::*;

const MAX_DEPTH: u32 = 4;

fn build_tree(triangles: &[Triangle], kind: VolumeKind) -> BvhTree {
    BvhTree::build(triangles, MAX_DEPTH, kind).expect("model contains at least one triangle")
}

#[macroquad::main("BVH Viewer")]
async fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "models/womanhead.raw".to_string());

    let triangles = match load_raw(&path) {
        Ok(triangles) if !triangles.is_empty() => triangles,
        Ok(_) => {
            eprintln!("{path}: no triangles found");
            return;
        }
        Err(err) => {
            eprintln!("failed to load {path}: {err}");
            return;
        }
    };
    println!("Loaded {} triangles from {path}", triangles.len());

    let mut kind = VolumeKind::Aabb;
    let mut tree = build_tree(&triangles, kind);
    println!(
        "Built {:?} hierarchy: {} nodes, depth {}",
        kind,
        tree.node_count(),
        tree.depth()
    );

    let mut orbit = OrbitCamera::new(4.0, 0.4, 0.4);
    let mut scene_camera = SceneCamera::new();
    let mut navigator = TreeNavigator::new(&tree);
    let mut highlight = false;
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
            // Wholesale rebuild: the old tree is discarded, never mutated.
            tree = build_tree(&triangles, kind);
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
            &format!("BVH Viewer - {:?} volumes ([G] to switch, [V] highlights PVS)", kind),
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
        draw_text(
            "[W/S/A/D] rotate camera, [Q/E] move, [R] reset",
            10.0,
            screen_height() - 15.0,
            16.0,
            DARKGRAY,
        );

        next_frame().await
    }
}
