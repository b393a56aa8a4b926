use anyhow::Context as _;
use anyhow::Result;
use grille::Clusters;
use rayon::iter::IndexedParallelIterator as _;
use rayon::iter::IntoParallelRefIterator as _;
use rayon::iter::ParallelIterator as _;
use std::fmt::Write as _;
use std::io::Write as _;

const USAGE: &str = "Usage: shape-group [options] [in.shapes...] >out.groups";

/// Format one group per line, as the list of its shape indices.
fn format_clusters<S>(clusters: &Clusters<'_, S>, verbose: bool) -> Result<String> {
    let mut report = String::new();
    if verbose && !clusters.dropped().is_empty() {
        let dropped = itertools::join(clusters.dropped(), " ");
        writeln!(report, "# dropped: {dropped}")?;
    }
    for group in clusters.groups() {
        if verbose {
            write!(report, "{}: ", group.cell)?;
        }
        writeln!(report, "{}", itertools::join(&group.indices, " "))?;
    }
    Ok(report)
}

fn main() -> Result<()> {
    let mut options = getopts::Options::new();
    grille_tools::grid_options(&mut options);
    options.optopt("t", "trace", "emit a chrome trace", "FILE");
    options.optflag("v", "verbose", "print cell labels and dropped shapes");

    let matches = grille_tools::parse_args(options, USAGE, None)?;

    let _chrome_trace_guard = grille_tools::set_up_logging(matches.opt_str("t"));

    let (algo, width, height) = grille_tools::grid_from_matches(&matches)?;
    let verbose = matches.opt_present("v");

    let inputs: Vec<Option<&String>> = if matches.free.is_empty() {
        vec![None]
    } else {
        matches.free.iter().map(Some).collect()
    };

    // Files are independent from one another, group them in parallel.
    let reports: Vec<Result<String>> = inputs
        .par_iter()
        .enumerate()
        .map(|(step, input)| {
            let file = input.map_or("-", String::as_str);
            let span = tracing::info_span!("input", step, file);
            let _enter = span.enter();

            let shapes = grille_tools::read_shapes(*input)?;
            let clusters = algo
                .cluster(&shapes, width, height)
                .with_context(|| format!("failed to group the shapes of {file:?}"))?;
            format_clusters(&clusters, verbose)
        })
        .collect();

    let output = std::io::stdout();
    let mut output = std::io::BufWriter::new(output.lock());
    let print_headers = inputs.len() > 1;
    for (input, report) in inputs.iter().zip(reports) {
        let report = report?;
        if print_headers {
            writeln!(output, "==> {} <==", input.map_or("-", String::as_str))?;
        }
        output.write_all(report.as_bytes())?;
    }
    output.flush()?;

    Ok(())
}
