//! Shape file format encoder/decoder.
//!
//! Shape files are text files with one shape per line.  A shape is a list of
//! whitespace-separated points, and points are written `x,y` with integer
//! coordinates.  Empty lines and lines starting with `#` are skipped, so a
//! shape without any point is written as a lone `-` to keep its index.
//!
//! ```text
//! # two squares and two degenerate shapes
//! 0,0 2,0 2,2 0,2
//! 6,6 8,6 8,8 6,8
//! 4,4
//! -
//! ```

use grille::Point2D;
use std::error;
use std::fmt;
use std::io;
use std::num;

#[derive(Debug)]
pub enum ErrorKind {
    BadPoint(String),
    BadInteger(num::ParseIntError),
    Io(io::Error),
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    lineno: usize,
}

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn lineno(&self) -> usize {
        self.lineno
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::BadPoint(token) => write!(f, "expected a point 'x,y', found {token:?}"),
            ErrorKind::BadInteger(err) => write!(f, "when parsing integer: {err}"),
            ErrorKind::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at line {}: {}", self.lineno, self.kind)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.kind {
            ErrorKind::BadInteger(err) => Some(err),
            ErrorKind::Io(err) => Some(err),
            ErrorKind::BadPoint(_) => None,
        }
    }
}

impl From<num::ParseIntError> for ErrorKind {
    fn from(err: num::ParseIntError) -> ErrorKind {
        ErrorKind::BadInteger(err)
    }
}

/// Line of a shape that has no point.
const EMPTY_SHAPE: &str = "-";

fn parse_point(token: &str) -> Result<Point2D, ErrorKind> {
    let (x, y) = token
        .split_once(',')
        .ok_or_else(|| ErrorKind::BadPoint(token.to_owned()))?;
    Ok(Point2D::new(x.parse()?, y.parse()?))
}

/// Wrapping `r` in a [`std::io::BufReader`] is needed for files.
pub fn read<R>(r: R) -> Result<Vec<Vec<Point2D>>, Error>
where
    R: io::BufRead,
{
    let mut shapes = Vec::new();
    for (lineno, line) in (1..).zip(r.lines()) {
        let line = line.map_err(|err| Error {
            kind: ErrorKind::Io(err),
            lineno,
        })?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line == EMPTY_SHAPE {
            shapes.push(Vec::new());
            continue;
        }
        let shape = line
            .split_whitespace()
            .map(parse_point)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|kind| Error { kind, lineno })?;
        shapes.push(shape);
    }
    Ok(shapes)
}

/// Wrapping `w` in a [`std::io::BufWriter`] is recommended.
pub fn write<W, S>(mut w: W, shapes: &[S]) -> io::Result<()>
where
    W: io::Write,
    S: AsRef<[Point2D]>,
{
    for shape in shapes {
        let (first, points) = match shape.as_ref().split_first() {
            Some(v) => v,
            None => {
                writeln!(w, "{EMPTY_SHAPE}")?;
                continue;
            }
        };
        write!(w, "{},{}", first.x, first.y)?;
        for p in points {
            write!(w, " {},{}", p.x, p.y)?;
        }
        writeln!(w)?;
    }
    w.flush()
}
