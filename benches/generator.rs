use grille::Point2D;
use rand::Rng;

/// Random axis-aligned rectangles that fit in a `width`×`height` image.
pub fn uniform_rectangles(width: i32, height: i32, count: usize) -> Vec<Vec<Point2D>> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            let x = rng.gen_range(0..width - 1);
            let y = rng.gen_range(0..height - 1);
            let x1 = rng.gen_range(x + 1..width);
            let y1 = rng.gen_range(y + 1..height);
            vec![
                Point2D::new(x, y),
                Point2D::new(x1, y),
                Point2D::new(x1, y1),
                Point2D::new(x, y1),
            ]
        })
        .collect()
}
