use anyhow::Context as _;
use anyhow::Result;
use grille::GridCluster;
use grille::GroupOrder;
use grille::Point2D;
use std::env;
use std::fs;
use std::io;
use std::num::NonZeroUsize;
use std::process;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::Registry;
use tracing_tree::HierarchicalLayer;

pub mod shapes;
pub mod svg;

/// Parse the command-line arguments.
///
/// Adds and handles the `--help` flag, and fails if more than `max_free`
/// positional arguments are given.
pub fn parse_args(
    mut options: getopts::Options,
    usage: &str,
    max_free: Option<usize>,
) -> Result<getopts::Matches> {
    options.optflag("h", "help", "print this help menu");

    let matches = options.parse(env::args().skip(1))?;

    if matches.opt_present("h") {
        eprintln!("{}", options.usage(usage));
        process::exit(0);
    }
    if let Some(max_free) = max_free {
        if matches.free.len() > max_free {
            anyhow::bail!("too many arguments\n\n{}", options.usage(usage));
        }
    }

    Ok(matches)
}

/// Install the `tracing` subscriber.
///
/// Events are filtered through the `LOG` environment variable and printed on
/// standard error.  When `trace_file` is set, a chrome trace is also written
/// there; it is flushed when the returned guard is dropped.
pub fn set_up_logging(trace_file: Option<String>) -> Option<tracing_chrome::FlushGuard> {
    let registry = Registry::default().with(EnvFilter::from_env("LOG")).with(
        HierarchicalLayer::new(4)
            .with_thread_ids(true)
            .with_targets(true)
            .with_bracketed_fields(true),
    );
    match trace_file {
        Some(filename) => {
            let (chrome_layer, guard) = tracing_chrome::ChromeLayerBuilder::new()
                .file(filename)
                .build();
            registry.with(chrome_layer).init();
            Some(guard)
        }
        None => {
            registry.init();
            None
        }
    }
}

/// Parse an image size of the form `WIDTHxHEIGHT`.
pub fn parse_size(s: &str) -> Result<(NonZeroUsize, NonZeroUsize)> {
    let (width, height) = s
        .split_once(|c: char| c == 'x' || c == 'X')
        .with_context(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    let width = width
        .trim()
        .parse::<NonZeroUsize>()
        .with_context(|| format!("invalid image width {width:?}"))?;
    let height = height
        .trim()
        .parse::<NonZeroUsize>()
        .with_context(|| format!("invalid image height {height:?}"))?;
    Ok((width, height))
}

pub fn parse_order(s: &str) -> Result<GroupOrder> {
    Ok(match s {
        "label" => GroupOrder::Label,
        "row-major" | "rowmajor" => GroupOrder::RowMajor,
        _ => anyhow::bail!("unknown group order {s:?}, expected 'label' or 'row-major'"),
    })
}

/// Register the options read by [`grid_from_matches`].
pub fn grid_options(options: &mut getopts::Options) {
    options.optopt("r", "rows", "number of rows of the grid (default: 1)", "N");
    options.optopt("c", "cols", "number of columns of the grid (default: 1)", "N");
    options.optopt("s", "size", "size of the image", "WIDTHxHEIGHT");
    options.optopt(
        "o",
        "order",
        "order of the groups, 'label' (default) or 'row-major'",
        "ORDER",
    );
}

/// Build the grid clustering algorithm and the image size from the options
/// registered by [`grid_options`].
pub fn grid_from_matches(
    matches: &getopts::Matches,
) -> Result<(GridCluster, NonZeroUsize, NonZeroUsize)> {
    fn count_arg(matches: &getopts::Matches, name: &str) -> Result<usize> {
        match matches.opt_str(name) {
            Some(arg) => arg
                .parse::<usize>()
                .with_context(|| format!("invalid value {arg:?} for option {name:?}")),
            None => Ok(1),
        }
    }

    let row_count = count_arg(matches, "rows")?;
    let col_count = count_arg(matches, "cols")?;
    let order = match matches.opt_str("order") {
        Some(order) => parse_order(&order)?,
        None => GroupOrder::default(),
    };
    let size = matches
        .opt_str("size")
        .context("missing required option 'size'")?;
    let (width, height) = parse_size(&size)?;

    let algo = GridCluster {
        row_count,
        col_count,
        order,
    };
    Ok((algo, width, height))
}

/// Read a shape file, or standard input when `path` is `None` or `-`.
pub fn read_shapes(path: Option<&String>) -> Result<Vec<Vec<Point2D>>> {
    match path.map(String::as_str) {
        None | Some("-") => {
            let input = io::stdin().lock();
            shapes::read(input).context("failed to read shapes from standard input")
        }
        Some(path) => {
            let file = fs::File::open(path).with_context(|| format!("failed to open {path:?}"))?;
            shapes::read(io::BufReader::new(file))
                .with_context(|| format!("failed to read shapes from {path:?}"))
        }
    }
}

/// A buffered writer to the given file, or to standard output when `path`
/// is `None` or `-`.
pub fn writer(path: Option<&String>) -> Result<Box<dyn io::Write>> {
    Ok(match path.map(String::as_str) {
        None | Some("-") => Box::new(io::BufWriter::new(io::stdout().lock())),
        Some(path) => {
            let file =
                fs::File::create(path).with_context(|| format!("failed to create {path:?}"))?;
            Box::new(io::BufWriter::new(file))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        let (width, height) = parse_size("640x480").unwrap();
        assert_eq!(usize::from(width), 640);
        assert_eq!(usize::from(height), 480);

        let (width, height) = parse_size("12X7").unwrap();
        assert_eq!(usize::from(width), 12);
        assert_eq!(usize::from(height), 7);

        assert!(parse_size("640").is_err());
        assert!(parse_size("0x480").is_err());
        assert!(parse_size("640x-1").is_err());
    }

    #[test]
    fn test_parse_order() {
        assert_eq!(parse_order("label").unwrap(), GroupOrder::Label);
        assert_eq!(parse_order("row-major").unwrap(), GroupOrder::RowMajor);
        assert!(parse_order("column-major").is_err());
    }

    #[test]
    fn test_grid_from_matches() {
        let mut options = getopts::Options::new();
        grid_options(&mut options);

        let matches = options
            .parse(["-r", "3", "--cols", "4", "-s", "100x50", "-o", "row-major"])
            .unwrap();
        let (algo, width, height) = grid_from_matches(&matches).unwrap();
        assert_eq!(algo.row_count, 3);
        assert_eq!(algo.col_count, 4);
        assert_eq!(algo.order, GroupOrder::RowMajor);
        assert_eq!(usize::from(width), 100);
        assert_eq!(usize::from(height), 50);

        let matches = options.parse(["-s", "10x10"]).unwrap();
        let (algo, _, _) = grid_from_matches(&matches).unwrap();
        assert_eq!((algo.row_count, algo.col_count), (1, 1));
        assert_eq!(algo.order, GroupOrder::Label);

        let matches = options.parse(["-r", "2"]).unwrap();
        assert!(grid_from_matches(&matches).is_err());
    }
}
