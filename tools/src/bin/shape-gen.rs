use anyhow::Context as _;
use anyhow::Result;
use grille::Point2D;
use rand::Rng;
use rand::SeedableRng as _;

const USAGE: &str = "Usage: shape-gen [options] >out.shapes";

/// Generate `count` shapes that fit in a `width`×`height` image.
///
/// Shapes are axis-aligned rectangles whose sides are at most `max_side`
/// pixels long, except for a `degenerate_ratio` share of them which are
/// single points.
fn gen_shapes<R>(
    rng: &mut R,
    count: usize,
    width: i32,
    height: i32,
    max_side: i32,
    degenerate_ratio: f64,
) -> Vec<Vec<Point2D>>
where
    R: Rng,
{
    (0..count)
        .map(|_| {
            let x = rng.gen_range(0..width - 1);
            let y = rng.gen_range(0..height - 1);
            if rng.gen_bool(degenerate_ratio) {
                return vec![Point2D::new(x, y)];
            }
            let x1 = i32::min(x + rng.gen_range(1..=max_side), width - 1);
            let y1 = i32::min(y + rng.gen_range(1..=max_side), height - 1);
            vec![
                Point2D::new(x, y),
                Point2D::new(x1, y),
                Point2D::new(x1, y1),
                Point2D::new(x, y1),
            ]
        })
        .collect()
}

fn main() -> Result<()> {
    let mut options = getopts::Options::new();
    options.optopt("n", "count", "number of shapes (default: 100)", "N");
    options.optopt("s", "size", "size of the image", "WIDTHxHEIGHT");
    options.optopt("m", "max-side", "maximum side of shapes (default: 32)", "N");
    options.optopt(
        "d",
        "degenerate",
        "share of shapes with a null area (default: 0)",
        "RATIO",
    );
    options.optopt("", "seed", "seed of the random generator (default: 0)", "N");

    let matches = grille_tools::parse_args(options, USAGE, Some(0))?;

    let count: usize = matches
        .opt_get_default("n", 100)
        .context("invalid value for option 'count'")?;
    let max_side: i32 = matches
        .opt_get_default("m", 32)
        .context("invalid value for option 'max-side'")?;
    let degenerate_ratio: f64 = matches
        .opt_get_default("d", 0.0)
        .context("invalid value for option 'degenerate'")?;
    let seed: u64 = matches
        .opt_get_default("seed", 0)
        .context("invalid value for option 'seed'")?;
    let size = matches
        .opt_str("s")
        .context("missing required option 'size'")?;
    let (width, height) = grille_tools::parse_size(&size)?;

    let width = i32::try_from(usize::from(width)).context("image is too wide")?;
    let height = i32::try_from(usize::from(height)).context("image is too high")?;
    if width < 2 || height < 2 {
        anyhow::bail!("expected an image of at least 2x2 pixels");
    }
    if max_side < 1 {
        anyhow::bail!("expected 'max-side' to be strictly positive");
    }
    if !(0.0..=1.0).contains(&degenerate_ratio) {
        anyhow::bail!("expected 'degenerate' to be between 0 and 1");
    }

    let mut rng = rand_pcg::Pcg64::seed_from_u64(seed);
    let shapes = gen_shapes(&mut rng, count, width, height, max_side, degenerate_ratio);

    let output = grille_tools::writer(None)?;
    grille_tools::shapes::write(output, &shapes).context("failed to write shapes")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use grille::Shape as _;
    use proptest::prelude::*;

    proptest!(
        #[test]
        fn shapes_within_image(
            seed in any::<u64>(),
            width in 2..500_i32,
            height in 2..500_i32,
            max_side in 1..50_i32,
        ) {
            let mut rng = rand_pcg::Pcg64::seed_from_u64(seed);
            let shapes = gen_shapes(&mut rng, 50, width, height, max_side, 0.2);

            prop_assert_eq!(shapes.len(), 50);
            for shape in &shapes {
                for p in shape {
                    prop_assert!(0 <= p.x && p.x < width, "{p:?} out of {width}x{height}");
                    prop_assert!(0 <= p.y && p.y < height, "{p:?} out of {width}x{height}");
                }
                if shape.len() == 1 {
                    prop_assert!(shape.moments().is_degenerate());
                }
            }
        }
    );

    #[test]
    fn test_deterministic() {
        let mut rng = rand_pcg::Pcg64::seed_from_u64(7);
        let a = gen_shapes(&mut rng, 20, 100, 80, 10, 0.5);
        let mut rng = rand_pcg::Pcg64::seed_from_u64(7);
        let b = gen_shapes(&mut rng, 20, 100, 80, 10, 0.5);
        assert_eq!(a, b);

        let mut rng = rand_pcg::Pcg64::seed_from_u64(7);
        let none = gen_shapes(&mut rng, 20, 100, 80, 10, 0.0);
        assert!(none.iter().all(|shape| !shape.moments().is_degenerate()));
    }
}
