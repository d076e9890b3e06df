// (c) Copyright 2025 The speedroute Authors
// SPDX-License-Identifier: MIT

mod profile;
mod reader;

pub use profile::{Profile, SpeedLimit, CAR_PROFILE};
pub use reader::{
    build_graph, build_graph_with_profile, features_from_buffer, features_from_io,
    load_graph_from_buffers, load_graph_from_files, BuildError, Error, Feature, FileFormat,
    GraphBuilder, NodeRecord, Options, WayRecord,
};

#[cfg(test)]
mod tests {
    use super::super::{shortest_distance_path, shortest_time_path, Coordinate, Graph, KDTree};
    use super::*;

    const CAMPUS_XML: &[u8] = include_bytes!("reader/test_fixtures/campus.osm");
    const CAMPUS_XML_GZ: &[u8] = include_bytes!("reader/test_fixtures/campus.osm.gz");
    const CAMPUS_XML_BZ2: &[u8] = include_bytes!("reader/test_fixtures/campus.osm.bz2");

    macro_rules! assert_edge {
        ($graph:expr, $from:expr, $to:expr, $speed:expr) => {
            assert_eq!($graph.get_edge($from, $to), Some($speed));
        };
    }

    macro_rules! assert_no_edge {
        ($graph:expr, $from:expr, $to:expr) => {
            assert_eq!($graph.get_edge($from, $to), None);
        };
    }

    fn load(data: &[u8], file_format: FileFormat) -> Graph {
        let options = Options {
            profile: &CAR_PROFILE,
            file_format,
        };
        load_graph_from_buffers(&options, data, data).unwrap()
    }

    fn check_campus_graph(g: &Graph) {
        //  -1 ── -2 ══ -3 ── -4
        //   │     │     ↑     │
        //  -11   -12 → -13   -14
        //   │           ↓     │
        //   │          -30    │
        //   │                 │
        //  -21 ═ -22 ═ -23 ═ -24

        // -40 is not on any way; footway -108 and service -109 aren't routable
        assert_eq!(g.len(), 13);
        assert!(!g.contains(-40));
        assert_no_edge!(g, -11, -12);
        assert_no_edge!(g, -14, -13);

        // Default and overridden speed limits
        assert_edge!(g, -1, -11, 30.0);
        assert_edge!(g, -4, -14, 25.0);
        assert_edge!(g, -21, -22, 50.0);
        assert_edge!(g, -24, -23, 50.0);

        // Overlapping ways: -2 ↔ -3 is both residential and primary
        assert_edge!(g, -2, -3, 35.0);
        assert_edge!(g, -3, -2, 35.0);
        assert_edge!(g, -1, -2, 25.0);

        // Oneway handling: -12 → -13 → -3 and -13 → -30
        assert_edge!(g, -12, -13, 25.0);
        assert_edge!(g, -13, -3, 25.0);
        assert_edge!(g, -13, -30, 25.0);
        assert_no_edge!(g, -13, -12);
        assert_no_edge!(g, -3, -13);
        assert_no_edge!(g, -30, -13);
        assert!(g.get_edges(-30).is_empty());

        assert_eq!(
            g.get_node(-30).map(|n| n.position),
            Some(Coordinate::new(42.3585, -71.0935))
        );
    }

    fn positions(g: &Graph, ids: &[i64]) -> Vec<Coordinate> {
        ids.iter().map(|&id| g.get_node(id).unwrap().position).collect()
    }

    #[test]
    fn test_build_graph_xml() {
        check_campus_graph(&load(CAMPUS_XML, FileFormat::Xml));
    }

    #[test]
    fn test_build_graph_gz() {
        check_campus_graph(&load(CAMPUS_XML_GZ, FileFormat::XmlGz));
    }

    #[test]
    fn test_build_graph_bz2() {
        check_campus_graph(&load(CAMPUS_XML_BZ2, FileFormat::XmlBz2));
    }

    #[test]
    fn test_build_graph_detect_format() {
        let g = load(CAMPUS_XML, FileFormat::Xml);
        assert_eq!(load(CAMPUS_XML, FileFormat::Unknown), g);
        assert_eq!(load(CAMPUS_XML_GZ, FileFormat::Unknown), g);
        assert_eq!(load(CAMPUS_XML_BZ2, FileFormat::Unknown), g);
    }

    #[test]
    fn test_build_graph_deterministic() {
        assert_eq!(
            load(CAMPUS_XML, FileFormat::Xml),
            load(CAMPUS_XML, FileFormat::Xml)
        );
    }

    #[test]
    fn test_load_graph_from_files() {
        let path = concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/src/osm/reader/test_fixtures/campus.osm.gz"
        );
        let options = Options {
            profile: &CAR_PROFILE,
            file_format: FileFormat::Unknown,
        };
        let g = load_graph_from_files(&options, path, path).unwrap();
        check_campus_graph(&g);
    }

    #[test]
    fn test_load_graph_missing_file() {
        let options = Options {
            profile: &CAR_PROFILE,
            file_format: FileFormat::Xml,
        };
        let err = load_graph_from_files(&options, "does/not/exist.osm", "does/not/exist.osm");
        assert!(matches!(err, Err(Error::Io(_))));
    }

    #[test]
    fn test_nearest_node() {
        let g = load(CAMPUS_XML, FileFormat::Xml);
        let tree = KDTree::from_graph(&g).unwrap();

        for (lat, lon, expected) in [
            // Close to -40, which is not part of the graph
            (42.3574, -71.0976, -12),
            (42.3586, -71.0934, -30),
            (42.3, -71.2, -21),
            (42.37, -71.08, -4),
        ] {
            let at = Coordinate::new(lat, lon);
            assert_eq!(g.find_nearest_node(at).unwrap().id, expected);
            assert_eq!(tree.find_nearest_node(at).id, expected);
        }
    }

    #[test]
    fn test_kd_tree_agrees_with_scan() {
        let g = load(CAMPUS_XML, FileFormat::Xml);
        let tree = KDTree::from_graph(&g).unwrap();

        for i in 0..20 {
            for j in 0..20 {
                let at = Coordinate::new(
                    42.35413 + 0.00037 * i as f64,
                    -71.10213 + 0.00079 * j as f64,
                );
                assert_eq!(
                    tree.find_nearest_node(at).id,
                    g.find_nearest_node(at).unwrap().id,
                    "at {:?}",
                    at
                );
            }
        }
    }

    #[test]
    fn test_shortest_paths_diverge() {
        let g = load(CAMPUS_XML, FileFormat::Xml);
        let origin = Coordinate::new(42.3601, -71.1001);
        let destination = Coordinate::new(42.3559, -71.0879);

        assert_eq!(
            shortest_distance_path(&g, origin, destination).unwrap(),
            Some(positions(&g, &[-1, -2, -3, -4, -14, -24]))
        );
        assert_eq!(
            shortest_time_path(&g, origin, destination).unwrap(),
            Some(positions(&g, &[-1, -11, -21, -22, -23, -24]))
        );

        let origin = Coordinate::new(42.3559, -71.1001);
        let destination = Coordinate::new(42.3601, -71.0879);

        assert_eq!(
            shortest_distance_path(&g, origin, destination).unwrap(),
            Some(positions(&g, &[-21, -11, -1, -2, -3, -4]))
        );
        assert_eq!(
            shortest_time_path(&g, origin, destination).unwrap(),
            Some(positions(&g, &[-21, -22, -23, -24, -14, -4]))
        );
    }

    #[test]
    fn test_shortest_paths_respect_oneway() {
        let g = load(CAMPUS_XML, FileFormat::Xml);
        let p13 = positions(&g, &[-13])[0];
        let p12 = positions(&g, &[-12])[0];

        // -13 → -12 is against the oneway, a detour is needed
        let expected = Some(positions(&g, &[-13, -3, -2, -12]));
        assert_eq!(shortest_distance_path(&g, p13, p12).unwrap(), expected);
        assert_eq!(shortest_time_path(&g, p13, p12).unwrap(), expected);

        let expected = Some(positions(&g, &[-12, -13, -30]));
        let parking_lot = Coordinate::new(42.3586, -71.0934);
        assert_eq!(shortest_distance_path(&g, p12, parking_lot).unwrap(), expected);
        assert_eq!(shortest_time_path(&g, p12, parking_lot).unwrap(), expected);
    }

    #[test]
    fn test_shortest_paths_unreachable() {
        let g = load(CAMPUS_XML, FileFormat::Xml);
        let parking_lot = Coordinate::new(42.3586, -71.0934);
        let destination = Coordinate::new(42.36, -71.1);

        assert_eq!(shortest_distance_path(&g, parking_lot, destination).unwrap(), None);
        assert_eq!(shortest_time_path(&g, parking_lot, destination).unwrap(), None);
    }

    #[test]
    fn test_shortest_paths_identity() {
        let g = load(CAMPUS_XML, FileFormat::Xml);
        let a = Coordinate::new(42.3599, -71.0961);
        let b = Coordinate::new(42.3601, -71.0959);
        let expected = Some(positions(&g, &[-2]));

        assert_eq!(shortest_distance_path(&g, a, b).unwrap(), expected);
        assert_eq!(shortest_time_path(&g, a, b).unwrap(), expected);
    }
}
