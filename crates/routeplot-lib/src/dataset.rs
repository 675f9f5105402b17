use std::env;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::{Error, LoadError, Result};
use crate::graph::{build_graph, EdgeRecord, Graph};
use crate::registry::{LocationRecord, LocationRegistry};

/// Environment variable overriding the default data directory.
pub const DATA_DIR_ENV: &str = "ROUTEPLOT_DATA_DIR";

const LOCATIONS_STEM: &str = "locations";
const EDGES_STEM: &str = "edges";

/// On-disk layout of a data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    /// One record per line, fields separated by whitespace, `#` comments.
    Whitespace,
    /// Headered CSV (`id,name,x,y` / `record,first,second,weight`).
    Csv,
}

impl DataFormat {
    /// Pick the format from the file extension; anything but `.csv` is whitespace.
    pub fn from_path(path: &Path) -> Self {
        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        if is_csv {
            DataFormat::Csv
        } else {
            DataFormat::Whitespace
        }
    }
}

/// Locations of the two input files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub locations: PathBuf,
    pub edges: PathBuf,
}

impl DataPaths {
    /// Find the data files inside `dir`.
    ///
    /// `locations.txt`/`edges.txt` are used when present, otherwise the
    /// `.csv` variants; if neither exists the `.txt` names are returned so the
    /// load reports a missing file.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            locations: pick_existing(dir, LOCATIONS_STEM),
            edges: pick_existing(dir, EDGES_STEM),
        }
    }
}

fn pick_existing(dir: &Path, stem: &str) -> PathBuf {
    let txt = dir.join(format!("{stem}.txt"));
    if txt.exists() {
        return txt;
    }
    let csv = dir.join(format!("{stem}.csv"));
    if csv.exists() {
        return csv;
    }
    txt
}

/// Resolve the default data directory using platform-specific project directories.
pub fn default_data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("org", "routeplot", "routeplot").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Resolve the data directory: explicit override, then `ROUTEPLOT_DATA_DIR`,
/// then the platform default.
pub fn resolve_data_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        debug!(dir = %dir.display(), "using data directory from caller");
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = env::var_os(DATA_DIR_ENV).filter(|value| !value.is_empty()) {
        let dir = PathBuf::from(dir);
        debug!(dir = %dir.display(), "using data directory from {DATA_DIR_ENV}");
        return Ok(dir);
    }
    default_data_dir()
}

/// Read location records from a file, choosing the format by extension.
pub fn load_locations(path: &Path) -> Result<Vec<LocationRecord>> {
    let file = open(path)?;
    load_locations_from_reader(file, DataFormat::from_path(path), path)
}

/// Read location records from any reader. `source` is only used in errors.
pub fn load_locations_from_reader<R: Read>(
    reader: R,
    format: DataFormat,
    source: &Path,
) -> Result<Vec<LocationRecord>> {
    match format {
        DataFormat::Csv => read_csv(reader),
        DataFormat::Whitespace => read_lines(reader, source, 4, "id name x y", |fields| {
            Ok(LocationRecord {
                id: parse_field(fields[0], "id")?,
                name: fields[1].to_string(),
                x: parse_field(fields[2], "x")?,
                y: parse_field(fields[3], "y")?,
            })
        }),
    }
}

/// Read edge records from a file, choosing the format by extension.
pub fn load_edges(path: &Path) -> Result<Vec<EdgeRecord>> {
    let file = open(path)?;
    load_edges_from_reader(file, DataFormat::from_path(path), path)
}

/// Read edge records from any reader. `source` is only used in errors.
pub fn load_edges_from_reader<R: Read>(
    reader: R,
    format: DataFormat,
    source: &Path,
) -> Result<Vec<EdgeRecord>> {
    match format {
        DataFormat::Csv => read_csv(reader),
        DataFormat::Whitespace => read_lines(
            reader,
            source,
            4,
            "record first second weight",
            |fields| {
                Ok(EdgeRecord {
                    record: parse_field(fields[0], "record")?,
                    first: parse_field(fields[1], "first")?,
                    second: parse_field(fields[2], "second")?,
                    weight: parse_field(fields[3], "weight")?,
                })
            },
        ),
    }
}

fn open(path: &Path) -> Result<File> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }
    Ok(File::open(path)?)
}

fn read_csv<R: Read, T: DeserializeOwned>(reader: R) -> Result<Vec<T>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut records = Vec::new();
    for row in csv_reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

fn read_lines<R, T, F>(
    reader: R,
    source: &Path,
    field_count: usize,
    layout: &str,
    parse: F,
) -> Result<Vec<T>>
where
    R: Read,
    F: Fn(&[&str]) -> std::result::Result<T, String>,
{
    let mut records = Vec::new();
    for (index, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        let parsed = if fields.len() != field_count {
            Err(format!(
                "expected {field_count} fields ({layout}), found {}",
                fields.len()
            ))
        } else {
            parse(&fields)
        };

        match parsed {
            Ok(record) => records.push(record),
            Err(message) => {
                return Err(LoadError::MalformedRecord {
                    path: source.to_path_buf(),
                    line: index + 1,
                    message,
                }
                .into())
            }
        }
    }
    Ok(records)
}

fn parse_field<T>(raw: &str, field: &str) -> std::result::Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse()
        .map_err(|err| format!("invalid {field} {raw:?}: {err}"))
}

/// Locations plus the graph built over them; immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct Network {
    pub registry: LocationRegistry,
    pub graph: Graph,
}

impl Network {
    /// Build a network from already-parsed records.
    pub fn from_records<L, E>(locations: L, edges: E) -> Result<Self>
    where
        L: IntoIterator<Item = LocationRecord>,
        E: IntoIterator<Item = EdgeRecord>,
    {
        let registry = LocationRegistry::from_records(locations)?;
        let graph = build_graph(registry.len(), edges)?;
        Ok(Self { registry, graph })
    }
}

/// Load both data files and build the network.
pub fn load_network(paths: &DataPaths) -> Result<Network> {
    let locations = load_locations(&paths.locations)?;
    let edges = load_edges(&paths.edges)?;
    let edge_records = edges.len();
    let network = Network::from_records(locations, edges)?;
    info!(
        locations = network.registry.len(),
        edge_records,
        edges = network.graph.edge_count(),
        "loaded network"
    );
    Ok(network)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_extension_selects_csv_format() {
        assert_eq!(DataFormat::from_path(Path::new("a/edges.CSV")), DataFormat::Csv);
        assert_eq!(
            DataFormat::from_path(Path::new("a/edges.txt")),
            DataFormat::Whitespace
        );
        assert_eq!(DataFormat::from_path(Path::new("edges")), DataFormat::Whitespace);
    }

    #[test]
    fn whitespace_locations_skip_comments_and_blank_lines() {
        let input = "# id name x y\n\n1 Budapest 10.5 20.0\n2   Szeged\t1 2\n";
        let records =
            load_locations_from_reader(input.as_bytes(), DataFormat::Whitespace, Path::new("mem"))
                .expect("parses");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name, "Szeged");
        assert_eq!(records[1].y, 2.0);
    }

    #[test]
    fn malformed_line_reports_position() {
        let input = "1 1 2 5.0\n2 1 three 4.0\n";
        let err = load_edges_from_reader(input.as_bytes(), DataFormat::Whitespace, Path::new("e.txt"))
            .expect_err("bad field");
        match err {
            Error::Load(LoadError::MalformedRecord { line, message, .. }) => {
                assert_eq!(line, 2);
                assert!(message.contains("second"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn wrong_field_count_is_malformed() {
        let input = "1 1 2\n";
        let err = load_edges_from_reader(input.as_bytes(), DataFormat::Whitespace, Path::new("e.txt"))
            .expect_err("missing weight");
        assert!(matches!(
            err,
            Error::Load(LoadError::MalformedRecord { line: 1, .. })
        ));
    }

    #[test]
    fn csv_edges_deserialize_by_header() {
        let input = "record, first, second, weight\n1, 1, 2, 5.5\n";
        let records = load_edges_from_reader(input.as_bytes(), DataFormat::Csv, Path::new("e.csv"))
            .expect("parses");
        assert_eq!(
            records,
            vec![EdgeRecord {
                record: 1,
                first: 1,
                second: 2,
                weight: 5.5
            }]
        );
    }

    #[test]
    fn explicit_override_wins() {
        let dir = resolve_data_dir(Some(Path::new("/tmp/routeplot-data"))).expect("resolves");
        assert_eq!(dir, PathBuf::from("/tmp/routeplot-data"));
    }

    #[test]
    fn missing_file_is_load_error() {
        let err = load_locations(Path::new("/definitely/not/here/locations.txt"))
            .expect_err("missing file");
        assert!(matches!(err, Error::Load(LoadError::FileNotFound { .. })));
    }
}
