// (c) Copyright 2025 The speedroute Authors
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

/// Describes how to convert OSM data into a [Graph](crate::Graph).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Profile<'a> {
    /// Human readable name of the routing profile. Only used for logging.
    pub name: &'a str,

    /// Values of the [highway](https://wiki.openstreetmap.org/wiki/Key:highway) tag
    /// of OSM ways which can be used for routing. Ways with any other (or without any)
    /// `highway` tag are ignored.
    pub allowed_highways: &'a [&'a str],

    /// Speed limits assumed for ways without an explicit `maxspeed_mph` tag.
    ///
    /// Every entry of [Profile::allowed_highways] should have a corresponding entry here,
    /// ways which can't be assigned a speed limit fail graph building with
    /// [BuildError::MissingDefaultSpeed](super::BuildError::MissingDefaultSpeed).
    pub default_speeds: &'a [SpeedLimit<'a>],
}

/// Default speed limit for ways of a specific [highway](https://wiki.openstreetmap.org/wiki/Key:highway) type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedLimit<'a> {
    /// Value of the `highway` tag, e.g. "motorway" or "residential".
    pub highway: &'a str,

    /// Speed limit in miles per hour. Must be finite and positive.
    pub mph: f64,
}

impl<'a> Profile<'a> {
    /// Checks if a way with the given tags can be used for routing.
    pub fn is_allowed(&self, tags: &HashMap<String, String>) -> bool {
        tags.get("highway")
            .is_some_and(|highway| self.allowed_highways.contains(&highway.as_str()))
    }

    /// Returns the speed limit of a way with given tags, in miles per hour.
    ///
    /// An explicit, valid `maxspeed_mph` tag takes precedence; otherwise the limit comes from
    /// [Profile::default_speeds]. Returns `None` if neither is available.
    pub fn way_speed_limit(&self, tags: &HashMap<String, String>) -> Option<f64> {
        if let Some(raw) = tags.get("maxspeed_mph") {
            match Self::parse_speed(raw) {
                Some(mph) => return Some(mph),
                None => log::warn!("{}: ignoring invalid maxspeed_mph={:?}", self.name, raw),
            }
        }

        let highway = tags.get("highway")?;
        self.default_speed(highway)
    }

    /// Returns the default speed limit for a highway type, if known.
    pub fn default_speed(&self, highway: &str) -> Option<f64> {
        self.default_speeds
            .iter()
            .find(|s| s.highway == highway)
            .map(|s| s.mph)
    }

    /// Checks if a way may only be traversed in the order of its nodes.
    /// Only `oneway=yes` is recognized; every other value means a two-way road.
    pub fn is_one_way(&self, tags: &HashMap<String, String>) -> bool {
        tags.get("oneway").map(|v| v.as_str()) == Some("yes")
    }

    fn parse_speed(raw: &str) -> Option<f64> {
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|mph| mph.is_finite() && *mph > 0.0)
    }
}

/// Routing [Profile] for cars, admitting all public roads from motorways down to living streets.
pub const CAR_PROFILE: Profile = Profile {
    name: "motorcar",
    allowed_highways: &[
        "motorway",
        "trunk",
        "primary",
        "secondary",
        "tertiary",
        "unclassified",
        "residential",
        "living_street",
        "motorway_link",
        "trunk_link",
        "primary_link",
        "secondary_link",
        "tertiary_link",
    ],
    default_speeds: &[
        SpeedLimit {
            highway: "motorway",
            mph: 60.0,
        },
        SpeedLimit {
            highway: "trunk",
            mph: 45.0,
        },
        SpeedLimit {
            highway: "primary",
            mph: 35.0,
        },
        SpeedLimit {
            highway: "secondary",
            mph: 30.0,
        },
        SpeedLimit {
            highway: "residential",
            mph: 25.0,
        },
        SpeedLimit {
            highway: "tertiary",
            mph: 25.0,
        },
        SpeedLimit {
            highway: "unclassified",
            mph: 25.0,
        },
        SpeedLimit {
            highway: "living_street",
            mph: 10.0,
        },
        SpeedLimit {
            highway: "motorway_link",
            mph: 30.0,
        },
        SpeedLimit {
            highway: "trunk_link",
            mph: 30.0,
        },
        SpeedLimit {
            highway: "primary_link",
            mph: 30.0,
        },
        SpeedLimit {
            highway: "secondary_link",
            mph: 30.0,
        },
        SpeedLimit {
            highway: "tertiary_link",
            mph: 25.0,
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! tags {
        {} => { HashMap::default() };
        {$( $k:literal : $v:literal ),+} => {
            HashMap::from_iter([ $( ($k.to_string(), $v.to_string()) ),+ ])
        };
    }

    #[test]
    fn car_profile_is_consistent() {
        for highway in CAR_PROFILE.allowed_highways {
            assert!(
                CAR_PROFILE.default_speed(highway).is_some(),
                "no default speed for {highway}"
            );
        }
        assert_eq!(
            CAR_PROFILE.allowed_highways.len(),
            CAR_PROFILE.default_speeds.len()
        );
    }

    #[test]
    fn is_allowed() {
        assert!(CAR_PROFILE.is_allowed(&tags! {"highway": "motorway"}));
        assert!(CAR_PROFILE.is_allowed(&tags! {"highway": "living_street", "name": "Vassar St"}));
        assert!(!CAR_PROFILE.is_allowed(&tags! {"highway": "footway"}));
        assert!(!CAR_PROFILE.is_allowed(&tags! {"highway": "service"}));
        assert!(!CAR_PROFILE.is_allowed(&tags! {"railway": "rail"}));
        assert!(!CAR_PROFILE.is_allowed(&tags! {}));
    }

    #[test]
    fn way_speed_limit() {
        assert_eq!(CAR_PROFILE.way_speed_limit(&tags! {"highway": "motorway"}), Some(60.0));
        assert_eq!(CAR_PROFILE.way_speed_limit(&tags! {"highway": "trunk"}), Some(45.0));
        assert_eq!(CAR_PROFILE.way_speed_limit(&tags! {"highway": "living_street"}), Some(10.0));
        assert_eq!(
            CAR_PROFILE.way_speed_limit(&tags! {"highway": "residential", "maxspeed_mph": "20"}),
            Some(20.0)
        );
        assert_eq!(
            CAR_PROFILE.way_speed_limit(&tags! {"highway": "primary", "maxspeed_mph": "27.5"}),
            Some(27.5)
        );
    }

    #[test]
    fn way_speed_limit_invalid_override() {
        assert_eq!(
            CAR_PROFILE.way_speed_limit(&tags! {"highway": "primary", "maxspeed_mph": "fast"}),
            Some(35.0)
        );
        assert_eq!(
            CAR_PROFILE.way_speed_limit(&tags! {"highway": "primary", "maxspeed_mph": "0"}),
            Some(35.0)
        );
        assert_eq!(
            CAR_PROFILE.way_speed_limit(&tags! {"highway": "primary", "maxspeed_mph": "-5"}),
            Some(35.0)
        );
    }

    #[test]
    fn way_speed_limit_missing() {
        assert_eq!(CAR_PROFILE.way_speed_limit(&tags! {"highway": "footway"}), None);
        assert_eq!(CAR_PROFILE.way_speed_limit(&tags! {}), None);
        assert_eq!(
            CAR_PROFILE.way_speed_limit(&tags! {"highway": "footway", "maxspeed_mph": "5"}),
            Some(5.0)
        );
    }

    #[test]
    fn is_one_way() {
        assert!(CAR_PROFILE.is_one_way(&tags! {"highway": "primary", "oneway": "yes"}));
        assert!(!CAR_PROFILE.is_one_way(&tags! {"highway": "primary", "oneway": "no"}));
        assert!(!CAR_PROFILE.is_one_way(&tags! {"highway": "primary", "oneway": "-1"}));
        assert!(!CAR_PROFILE.is_one_way(&tags! {"highway": "primary", "oneway": "true"}));
        assert!(!CAR_PROFILE.is_one_way(&tags! {"highway": "motorway"}));
    }
}
