use macroquad::prelude::*;

#[macroquad::main("BVH Visualization")]
async fn main() {
    loop {
        clear_background(BLACK);

        draw_text("BVH Visualization", 20.0, 40.0, 30.0, WHITE);
        draw_text(
            "Run the `viewer` or `generated` binaries for the interactive scenes.",
            20.0,
            70.0,
            20.0,
            GRAY,
        );

        next_frame().await
    }
}
