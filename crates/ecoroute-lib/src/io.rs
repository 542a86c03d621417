//! JSON file boundaries: vehicle and stop inputs, costed route output.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{Error, Result};
use crate::model::{Location, Route, RouteSegment, Vehicle};

/// Starting point plus the ordered stops to visit from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    pub start: Location,
    pub destinations: Vec<Location>,
}

/// Load a single vehicle object.
pub fn load_vehicle(path: &Path) -> Result<Vehicle> {
    read_json(path, "vehicle data")
}

/// Load a JSON array of locations.
pub fn load_locations(path: &Path) -> Result<Vec<Location>> {
    read_json(path, "locations")
}

/// Load locations and split them into the start (first entry) and destinations.
pub fn load_itinerary(path: &Path) -> Result<Itinerary> {
    let mut locations = load_locations(path)?.into_iter();
    let start = locations.next().ok_or_else(|| Error::MissingStartLocation {
        path: path.to_path_buf(),
    })?;
    Ok(Itinerary {
        start,
        destinations: locations.collect(),
    })
}

fn read_json<T: DeserializeOwned>(path: &Path, kind: &'static str) -> Result<T> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(Error::FileNotFound {
                kind,
                path: path.to_path_buf(),
            })
        }
        Err(err) => return Err(Error::Io(err)),
    };

    serde_json::from_str(&contents).map_err(|source| Error::InvalidJson {
        kind,
        path: path.to_path_buf(),
        source,
    })
}

/// Output shape of one route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteRecord<'a> {
    pub total_distance: f64,
    pub total_duration: f64,
    pub total_emissions: f64,
    pub segments: Vec<SegmentRecord<'a>>,
}

/// Output shape of one segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentRecord<'a> {
    pub start: &'a Location,
    pub end: &'a Location,
    pub distance: f64,
    pub duration: f64,
    pub emissions: f64,
}

impl<'a> From<&'a Route> for RouteRecord<'a> {
    fn from(route: &'a Route) -> Self {
        Self {
            total_distance: route.total_distance(),
            total_duration: route.total_duration(),
            total_emissions: route.total_emissions(),
            segments: route.segments().iter().map(SegmentRecord::from).collect(),
        }
    }
}

impl<'a> From<&'a RouteSegment> for SegmentRecord<'a> {
    fn from(segment: &'a RouteSegment) -> Self {
        Self {
            start: segment.start(),
            end: segment.end(),
            distance: segment.distance(),
            duration: segment.duration(),
            emissions: segment.emissions(),
        }
    }
}

/// Write `routes` as a pretty-printed JSON array, replacing `path` atomically.
pub fn save_routes(routes: &[Route], path: &Path) -> Result<()> {
    let records: Vec<RouteRecord<'_>> = routes.iter().map(RouteRecord::from).collect();

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let tmp = NamedTempFile::new_in(parent)?;
    {
        let mut writer = BufWriter::new(tmp.as_file());
        serde_json::to_writer_pretty(&mut writer, &records)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }
    tmp.persist(path).map_err(|err| err.error)?;

    info!(path = %path.display(), routes = routes.len(), "saved route data");
    Ok(())
}

