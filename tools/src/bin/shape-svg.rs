use anyhow::Context as _;
use anyhow::Result;

const USAGE: &str = "Usage: shape-svg [options] [in-shapes [out-svg]] <in.shapes >out.svg";

fn main() -> Result<()> {
    let mut options = getopts::Options::new();
    grille_tools::grid_options(&mut options);

    let matches = grille_tools::parse_args(options, USAGE, Some(2))?;

    let _chrome_trace_guard = grille_tools::set_up_logging(None);

    let (algo, width, height) = grille_tools::grid_from_matches(&matches)?;

    let shapes = grille_tools::read_shapes(matches.free.first())?;
    let clusters = algo
        .cluster(&shapes, width, height)
        .context("failed to group shapes")?;

    let output = grille_tools::writer(matches.free.get(1))?;
    grille_tools::svg::write_svg(output, &clusters, width, height)
        .context("failed to write svg")?;

    Ok(())
}
