// SPDX-License-Identifier: MIT OR Apache-2.0
//! The GeoTour animation-script command language.
//!
//! A script is a flat ASCII string of `;`-separated command invocations,
//! each of the form `name=key1=value1,key2=value2,...`. The `message`
//! command instead takes a single double-quoted string. Point lists for
//! polylines and polygons are quoted strings of `lat,lng` pairs joined by
//! `;`.
//!
//! This crate turns such a string into an ordered list of typed
//! [`Command`] values, rejecting the whole script on the first error.
//!
//! ```
//! use geotour_script::{parse_animation, Command};
//!
//! let commands = parse_animation("delay=dur=1000;message=\"hi\"").unwrap();
//! assert_eq!(commands.len(), 2);
//! assert!(matches!(commands[1], Command::Message(ref text) if text == "hi"));
//! ```

pub mod command;
pub mod parser;
pub mod types;

pub use command::{
    Command, FlyAroundOptions, FlyToOptions, MarkerOptions, ModelOptions, PolygonOptions,
    PolylineOptions,
};
pub use parser::{parse_animation, ParseError};
pub use types::{AltitudeMode, Color};
