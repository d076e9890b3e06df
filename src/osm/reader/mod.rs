// (c) Copyright 2025 The speedroute Authors
// SPDX-License-Identifier: MIT

use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use crate::osm::Profile;
use crate::Graph;

pub use graph_builder::{build_graph, build_graph_with_profile, BuildError, GraphBuilder};
pub use model::{Feature, NodeRecord, WayRecord};

mod graph_builder;
mod model;
mod xml;

/// Format of the input OSM file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Unknown format - guess the format based on the content
    Unknown,

    /// Force uncompressed [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    Xml,

    /// Force [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    /// with [gzip](https://en.wikipedia.org/wiki/Gzip) compression
    XmlGz,

    /// Force [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    /// with [bzip2](https://en.wikipedia.org/wiki/Bzip2) compression
    XmlBz2,
}

impl FileFormat {
    /// Guesses the format from the first bytes of a file.
    pub fn detect(prefix: &[u8]) -> Self {
        if prefix.starts_with(&[0x1f, 0x8b]) {
            Self::XmlGz
        } else if prefix.starts_with(b"BZh") {
            Self::XmlBz2
        } else {
            Self::Xml
        }
    }
}

/// Additional controls for interpreting OSM data as a routing [Graph].
#[derive(Debug)]
pub struct Options<'a> {
    /// How OSM features should be interpreted and converted into a [Graph].
    pub profile: &'a Profile<'a>,

    /// Format of the input data.
    pub file_format: FileFormat,
}

/// Error which can occur when loading a [Graph] from OSM files.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("xml: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Returns an iterator over all [Features](Feature) from a stream in the given format.
///
/// The provided stream will be automatically wrapped in a buffered reader.
pub fn features_from_io<'r, R: io::Read + 'r>(
    file_format: FileFormat,
    reader: R,
) -> Result<Box<dyn Iterator<Item = Result<Feature, Error>> + 'r>, Error> {
    let mut b = io::BufReader::new(reader);
    let file_format = match file_format {
        FileFormat::Unknown => FileFormat::detect(b.fill_buf()?),
        f => f,
    };

    Ok(match file_format {
        FileFormat::Unknown | FileFormat::Xml => boxed_xml_features(b),
        FileFormat::XmlGz => {
            boxed_xml_features(io::BufReader::new(flate2::read::MultiGzDecoder::new(b)))
        }
        FileFormat::XmlBz2 => {
            boxed_xml_features(io::BufReader::new(bzip2::read::MultiBzDecoder::new(b)))
        }
    })
}

fn boxed_xml_features<'r, R: io::BufRead + 'r>(
    reader: R,
) -> Box<dyn Iterator<Item = Result<Feature, Error>> + 'r> {
    Box::new(xml::Reader::from_io(reader).map(|f| f.map_err(Error::from)))
}

/// Returns an iterator over all [Features](Feature) from an in-memory buffer in the given format.
pub fn features_from_buffer(
    file_format: FileFormat,
    data: &[u8],
) -> Result<Box<dyn Iterator<Item = Result<Feature, Error>> + '_>, Error> {
    let file_format = match file_format {
        FileFormat::Unknown => FileFormat::detect(data),
        f => f,
    };

    if file_format == FileFormat::Xml {
        // Fast path is available for in-memory XML data
        Ok(Box::new(
            xml::Reader::from_buffer(data).map(|f| f.map_err(Error::from)),
        ))
    } else {
        features_from_io(file_format, data)
    }
}

/// Adds all ways from `ways` and then all nodes from `nodes` into a [GraphBuilder].
fn build_from_features<'a, N, W>(options: &'a Options<'a>, nodes: N, ways: W) -> Result<Graph, Error>
where
    N: Iterator<Item = Result<Feature, Error>>,
    W: Iterator<Item = Result<Feature, Error>>,
{
    let mut b = GraphBuilder::new(options.profile);

    for f in ways {
        if let Feature::Way(w) = f? {
            b.add_way(&w)?;
        }
    }

    for f in nodes {
        if let Feature::Node(n) = f? {
            b.add_node(&n);
        }
    }

    Ok(b.finish())
}

/// Loads a [Graph] from OSM files, as per the provided [Options].
///
/// Ways are read from `ways_path` first, then nodes from `nodes_path`.
/// Both paths may point to the same file, which is then read twice.
pub fn load_graph_from_files<'a, P: AsRef<Path>, Q: AsRef<Path>>(
    options: &'a Options<'a>,
    nodes_path: P,
    ways_path: Q,
) -> Result<Graph, Error> {
    let ways = features_from_io(options.file_format, File::open(ways_path)?)?;
    let nodes = features_from_io(options.file_format, File::open(nodes_path)?)?;
    build_from_features(options, nodes, ways)
}

/// Loads a [Graph] from OSM data held in memory, as per the provided [Options].
///
/// Ways are read from `ways` first, then nodes from `nodes`.
/// Both buffers may be the same.
pub fn load_graph_from_buffers<'a>(
    options: &'a Options<'a>,
    nodes: &[u8],
    ways: &[u8],
) -> Result<Graph, Error> {
    let ways = features_from_buffer(options.file_format, ways)?;
    let nodes = features_from_buffer(options.file_format, nodes)?;
    build_from_features(options, nodes, ways)
}
