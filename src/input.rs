use crate::terrain::{Elevation, Terrain};
use itertools::Itertools;
use std::{
    fmt::Display,
    fs::File,
    io::{prelude::*, BufReader, Cursor},
    ops::Deref,
    path::Path,
    str::FromStr,
};

const TEST_DATA_FILENAME: &str = "TEST DATA";

/// Parse the file at the specified path into a list of island terrains.
///
/// The first non-blank line holds the number of islands. Each island is introduced
/// by a `height width` line, followed by `height` rows of `width` whitespace-separated
/// elevations. Blank lines are ignored throughout.
///
/// See also [`parse_str`] for equivalent functionality for strings, useful for test data.
pub fn parse(path: &Path) -> Result<Vec<Terrain>, Error> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    parse_reader(
        reader,
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string()),
    )
}

/// Parse the provided data into a list of island terrains.
///
/// See also [`parse`] for equivalent functionality for input files.
pub fn parse_str(data: &str) -> Result<Vec<Terrain>, Error> {
    parse_reader(Cursor::new(data), TEST_DATA_FILENAME)
}

/// Parse the contents of the provided reader into a list of island terrains.
///
/// Often [`parse`] or [`parse_str`] are more ergonomic.
///
/// The file name can technically be anything which is `Display`, but it's used within
/// error messages as the file name, so it should be reasonably interpretable as such.
///
/// Nothing is returned unless every declared island parses: the first malformed
/// line aborts the whole parse.
pub fn parse_reader<Reader, Filename>(reader: Reader, file_name: Filename) -> Result<Vec<Terrain>, Error>
where
    Reader: BufRead,
    Filename: Display,
{
    let file_name = file_name.to_string();
    let mut records = Records::new(reader);

    let (line, text) = records.next_record()?.ok_or(Error::Empty)?;
    let count: usize = parse_record(&file_name, line, &text)?;

    // declared counts are not trusted for allocation; they grow with what is actually read
    let mut islands = Vec::new();
    for _ in 0..count {
        let Some((dimensions_line, text)) = records.next_record()? else {
            return Err(Error::shape(
                &file_name,
                records.line,
                InputShapeError::IslandCount {
                    expected: count,
                    found: islands.len(),
                },
            ));
        };
        let dimensions: Dimensions =
            parse_record(&file_name, dimensions_line, &text.split_whitespace().join(" "))?;
        let shape_at_header = |err| Error::shape(&file_name, dimensions_line, err);
        Terrain::padded_dimensions(dimensions.width, dimensions.height).map_err(shape_at_header)?;

        let terrain = if dimensions.width == 0 {
            // empty rows are indistinguishable from blank lines, so none are read
            let rows: Vec<[Elevation; 0]> = vec![[]; dimensions.height];
            Terrain::from_rows(0, dimensions.height, &rows)
        } else {
            let rows = read_rows(&mut records, &file_name, dimensions)?;
            Terrain::from_rows(dimensions.width, dimensions.height, &rows)
        };
        islands.push(terrain.map_err(shape_at_header)?);
    }

    if let Some((line, _)) = records.next_record()? {
        return Err(Error::shape(&file_name, line, InputShapeError::TrailingInput));
    }

    Ok(islands)
}

/// Read the `height` rows of an island whose header has already been consumed.
fn read_rows<Reader: BufRead>(
    records: &mut Records<Reader>,
    file_name: &str,
    dimensions: Dimensions,
) -> Result<Vec<Vec<Elevation>>, Error> {
    let mut rows: Vec<Vec<Elevation>> = Vec::new();
    while rows.len() < dimensions.height {
        let Some((line, text)) = records.next_record()? else {
            return Err(Error::shape(
                file_name,
                records.line,
                InputShapeError::RowCount {
                    expected: dimensions.height,
                    found: rows.len(),
                },
            ));
        };
        let values: WhitespaceSep<Elevation> = parse_record(file_name, line, &text)?;
        if values.len() != dimensions.width {
            return Err(Error::shape(
                file_name,
                line,
                InputShapeError::RowWidth {
                    row: rows.len() + 1,
                    expected: dimensions.width,
                    found: values.len(),
                },
            ));
        }
        rows.push(values.into());
    }
    Ok(rows)
}

fn parse_record<T>(file_name: &str, line: usize, text: &str) -> Result<T, Error>
where
    T: FromStr,
    <T as FromStr>::Err: Display,
{
    T::from_str(text).map_err(|err| Error::Parse {
        file_name: file_name.to_owned(),
        line,
        message: err.to_string(),
        text: text.to_owned(),
    })
}

/// Non-blank, trimmed lines of a reader, with their 1-based line numbers.
struct Records<Reader> {
    reader: Reader,
    buf: String,
    line: usize,
}

impl<Reader: BufRead> Records<Reader> {
    fn new(reader: Reader) -> Self {
        Records {
            reader,
            buf: String::new(),
            line: 0,
        }
    }

    fn next_record(&mut self) -> std::io::Result<Option<(usize, String)>> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;
            let trimmed = self.buf.trim();
            if !trimmed.is_empty() {
                return Ok(Some((self.line, trimmed.to_owned())));
            }
        }
    }
}

/// The `height width` header introducing an island.
#[derive(Debug, Clone, Copy, PartialEq, Eq, parse_display::Display, parse_display::FromStr)]
#[display("{height} {width}")]
pub struct Dimensions {
    pub height: usize,
    pub width: usize,
}

/// This adaptor plugs into record parsing, splitting each line into a set of whitespace-separated items.
///
/// Runs of whitespace count as a single separator.
pub struct WhitespaceSep<T>(Vec<T>);

impl<T> FromStr for WhitespaceSep<T>
where
    T: FromStr,
{
    type Err = <T as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<_>, _>>()
            .map(WhitespaceSep)
    }
}

impl<T> IntoIterator for WhitespaceSep<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<T> From<WhitespaceSep<T>> for Vec<T> {
    fn from(ws: WhitespaceSep<T>) -> Self {
        ws.0
    }
}

impl<T> Deref for WhitespaceSep<T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// The input declared one shape and supplied another.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputShapeError {
    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },
    #[error("row {row} has {found} values; expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("declared {expected} islands, found {found}")]
    IslandCount { expected: usize, found: usize },
    #[error("unexpected input after the last declared island")]
    TrailingInput,
    #[error("a {height}x{width} island is too large to index")]
    TooLarge { height: usize, width: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("no island count: input is empty")]
    Empty,
    #[error("{file_name}:{line}: {message} for {text:?}")]
    Parse {
        file_name: String,
        line: usize,
        message: String,
        text: String,
    },
    #[error("{file_name}:{line}: malformed island")]
    Shape {
        file_name: String,
        line: usize,
        #[source]
        source: InputShapeError,
    },
}

impl Error {
    fn shape(file_name: &str, line: usize, source: InputShapeError) -> Error {
        Error::Shape {
            file_name: file_name.to_owned(),
            line,
            source,
        }
    }

    /// The shape mismatch behind this error, if that's what it is.
    pub fn shape_error(&self) -> Option<&InputShapeError> {
        match self {
            Error::Shape { source, .. } => Some(source),
            _ => None,
        }
    }
}
