// SPDX-License-Identifier: MIT OR Apache-2.0
//! Animation-script parser.
//!
//! Tokenization happens in two passes: commands are split on `;` and
//! key/value pairs on `,`, but both splits skip separators inside quoted
//! spans, which is what lets `message` text and `lat,lng;lat,lng` point
//! lists carry the separator characters. A quoted span uses `"` with `\"`
//! escapes.
//!
//! The whole script is rejected on the first error; a blank script yields
//! an empty command list.

use crate::command::{
    Command, FlyAroundOptions, FlyToOptions, MarkerOptions, PolygonOptions, PolylineOptions,
};
use crate::types::{AltitudeMode, Color};
use geotour_camera::{Camera, LatLngAltitude};
use indexmap::IndexMap;
use thiserror::Error;

/// Cap on the number of points in a single polyline or polygon.
pub const MAX_POINTS: usize = 100;

/// Default outline and line width in screen pixels.
const DEFAULT_STROKE_WIDTH: f64 = 3.0;

/// Why a script was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The command name is not part of the language.
    #[error("unknown command `{name}` at position {index}")]
    UnknownCommand {
        /// Zero-based position of the command in the script
        index: usize,
        /// The unrecognized name
        name: String,
    },

    /// The invocation does not have the `name=args` shape.
    #[error("malformed command at position {index}: `{raw}`")]
    Malformed {
        /// Zero-based position of the command in the script
        index: usize,
        /// The offending text
        raw: String,
    },

    /// A key/value pair is missing its `=` separator.
    #[error("malformed `{command}` argument at position {index}: `{pair}`")]
    MalformedPair {
        /// Zero-based position of the command in the script
        index: usize,
        /// Command being parsed
        command: &'static str,
        /// The offending pair text
        pair: String,
    },

    /// A required key is absent.
    #[error("`{command}` at position {index} is missing required key `{key}`")]
    MissingKey {
        /// Zero-based position of the command in the script
        index: usize,
        /// Command being parsed
        command: &'static str,
        /// The missing key
        key: &'static str,
    },

    /// A numeric field failed to parse or is out of its contract range.
    #[error("invalid number `{value}` for `{key}` in `{command}` at position {index}")]
    InvalidNumber {
        /// Zero-based position of the command in the script
        index: usize,
        /// Command being parsed
        command: &'static str,
        /// The key whose value is bad
        key: &'static str,
        /// The raw value text
        value: String,
    },

    /// An altitude-mode literal is not one of the four recognized modes.
    #[error("invalid altitude mode `{value}` at position {index}")]
    InvalidAltitudeMode {
        /// Zero-based position of the command in the script
        index: usize,
        /// The raw value text
        value: String,
    },

    /// A color is not a `#RRGGBB` or `#AARRGGBB` hex literal.
    #[error("invalid color `{value}` for `{key}` at position {index}")]
    InvalidColor {
        /// Zero-based position of the command in the script
        index: usize,
        /// The key whose value is bad
        key: &'static str,
        /// The raw value text
        value: String,
    },

    /// A point-list entry is not a `lat,lng` pair of numbers.
    #[error("invalid point `{value}` in `{key}` at position {index}")]
    InvalidPoint {
        /// Zero-based position of the command in the script
        index: usize,
        /// The point-list key
        key: &'static str,
        /// The offending entry text
        value: String,
    },

    /// A point list is outside its allowed size.
    #[error("`{key}` at position {index} needs {min}..={max} points, got {got}")]
    PointCount {
        /// Zero-based position of the command in the script
        index: usize,
        /// The point-list key
        key: &'static str,
        /// Minimum allowed points
        min: usize,
        /// Maximum allowed points
        max: usize,
        /// Points actually present
        got: usize,
    },

    /// A quoted span never closes.
    #[error("unterminated quoted string")]
    UnterminatedString,
}

/// Parse an animation script into its ordered command list.
///
/// Parsing is deterministic and all-or-nothing: any error rejects the
/// whole script. An empty or blank script is a valid empty sequence.
pub fn parse_animation(script: &str) -> Result<Vec<Command>, ParseError> {
    let mut commands = Vec::new();
    for raw in split_protected(script, ';')? {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        let command = parse_command(commands.len(), raw)?;
        commands.push(command);
    }
    Ok(commands)
}

/// Split on `separator`, skipping separators inside quoted spans.
/// The quotes and escapes are kept verbatim in the returned pieces.
fn split_protected(input: &str, separator: char) -> Result<Vec<String>, ParseError> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escaped = false;

    for ch in input.chars() {
        if in_quotes {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_quotes = false;
            }
            current.push(ch);
        } else if ch == '"' {
            in_quotes = true;
            current.push(ch);
        } else if ch == separator {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }

    if in_quotes {
        return Err(ParseError::UnterminatedString);
    }
    parts.push(current);
    Ok(parts)
}

/// Strip one layer of surrounding quotes (plain `"` or escaped `\"`) and
/// resolve `\"`/`\\` escapes. Unquoted values pass through trimmed.
fn unquote(value: &str) -> String {
    let value = value.trim();
    let inner = if value.len() >= 4 && value.starts_with("\\\"") && value.ends_with("\\\"") {
        &value[2..value.len() - 2]
    } else if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        return value.to_owned();
    };

    let mut out = String::with_capacity(inner.len());
    let mut escaped = false;
    for ch in inner.chars() {
        if escaped {
            out.push(ch);
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else {
            out.push(ch);
        }
    }
    if escaped {
        out.push('\\');
    }
    out
}

fn parse_command(index: usize, raw: &str) -> Result<Command, ParseError> {
    let Some((name, args)) = raw.split_once('=') else {
        return Err(ParseError::Malformed {
            index,
            raw: raw.to_owned(),
        });
    };

    match name.trim() {
        "flyTo" => parse_fly_to(index, args),
        "flyAround" => parse_fly_around(index, args),
        "delay" => parse_delay(index, args),
        "message" => Ok(Command::Message(unquote(args))),
        "addMarker" => parse_add_marker(index, args),
        "addPolyline" => parse_add_polyline(index, args),
        "addPolygon" => parse_add_polygon(index, args),
        unknown => Err(ParseError::UnknownCommand {
            index,
            name: unknown.to_owned(),
        }),
    }
}

fn parse_fly_to(index: usize, args: &str) -> Result<Command, ParseError> {
    let mut fields = Fields::new("flyTo", index, args)?;
    let camera = fields.camera()?;
    let duration_ms = fields.require_u64("dur")?;
    Ok(Command::FlyTo(FlyToOptions {
        camera,
        duration_ms,
    }))
}

fn parse_fly_around(index: usize, args: &str) -> Result<Command, ParseError> {
    let mut fields = Fields::new("flyAround", index, args)?;
    let center = fields.camera()?;
    let duration_ms = fields.require_u64("dur")?;
    let rounds = fields.require_f64("count")?;
    Ok(Command::FlyAround(FlyAroundOptions {
        center,
        duration_ms,
        rounds,
    }))
}

fn parse_delay(index: usize, args: &str) -> Result<Command, ParseError> {
    let mut fields = Fields::new("delay", index, args)?;
    let duration_ms = fields.require_u64("dur")?;
    Ok(Command::Delay { duration_ms })
}

fn parse_add_marker(index: usize, args: &str) -> Result<Command, ParseError> {
    let mut fields = Fields::new("addMarker", index, args)?;
    let id = fields.require("id")?;
    let latitude = fields.require_f64("lat")?;
    let longitude = fields.require_f64("lng")?;
    let altitude = fields.optional_f64("alt")?.unwrap_or(0.0);
    let label = fields.optional("label").unwrap_or_default();
    let altitude_mode = fields.altitude_mode("altMode", AltitudeMode::Absolute)?;
    Ok(Command::AddMarker(MarkerOptions {
        id,
        position: LatLngAltitude::new(latitude, longitude, altitude),
        label,
        altitude_mode,
    }))
}

fn parse_add_polyline(index: usize, args: &str) -> Result<Command, ParseError> {
    let mut fields = Fields::new("addPolyline", index, args)?;
    let id = fields.require("id")?;
    let points = fields.points("points", 1)?;
    let color = fields.color("color", Color::OPAQUE_BLUE)?;
    let width = fields.non_negative("width", DEFAULT_STROKE_WIDTH)?;
    let altitude_mode = fields.altitude_mode("altMode", AltitudeMode::ClampToGround)?;
    Ok(Command::AddPolyline(PolylineOptions {
        id,
        points,
        color,
        width,
        altitude_mode,
    }))
}

fn parse_add_polygon(index: usize, args: &str) -> Result<Command, ParseError> {
    let mut fields = Fields::new("addPolygon", index, args)?;
    let id = fields.require("id")?;
    let outer_points = fields.points("outerPoints", 3)?;
    let fill_color = fields.color("fillColor", Color::TRANSLUCENT_BLUE)?;
    let stroke_color = fields.color("strokeColor", Color::OPAQUE_BLUE)?;
    let stroke_width = fields.non_negative("strokeWidth", DEFAULT_STROKE_WIDTH)?;
    let altitude_mode = fields.altitude_mode("altMode", AltitudeMode::ClampToGround)?;
    Ok(Command::AddPolygon(PolygonOptions {
        id,
        outer_points,
        fill_color,
        stroke_color,
        stroke_width,
        altitude_mode,
    }))
}

/// Key/value arguments of one command invocation. Unknown keys are
/// tolerated and skipped so extensions (for example polygon hole lists)
/// do not break older parsers.
struct Fields {
    command: &'static str,
    index: usize,
    values: IndexMap<String, String>,
}

impl Fields {
    fn new(command: &'static str, index: usize, args: &str) -> Result<Self, ParseError> {
        let mut values = IndexMap::new();
        for pair in split_protected(args, ',')? {
            let pair = pair.trim();
            if pair.is_empty() {
                continue;
            }
            let Some((key, value)) = pair.split_once('=') else {
                return Err(ParseError::MalformedPair {
                    index,
                    command,
                    pair: pair.to_owned(),
                });
            };
            values.insert(key.trim().to_owned(), value.trim().to_owned());
        }
        Ok(Self {
            command,
            index,
            values,
        })
    }

    /// Take a required key, unquoted.
    fn require(&mut self, key: &'static str) -> Result<String, ParseError> {
        self.optional(key).ok_or(ParseError::MissingKey {
            index: self.index,
            command: self.command,
            key,
        })
    }

    /// Take an optional key, unquoted.
    fn optional(&mut self, key: &'static str) -> Option<String> {
        self.values.shift_remove(key).map(|value| unquote(&value))
    }

    fn require_f64(&mut self, key: &'static str) -> Result<f64, ParseError> {
        let raw = self.require(key)?;
        raw.parse().map_err(|_| self.bad_number(key, raw))
    }

    fn require_u64(&mut self, key: &'static str) -> Result<u64, ParseError> {
        let raw = self.require(key)?;
        raw.parse().map_err(|_| self.bad_number(key, raw))
    }

    fn optional_f64(&mut self, key: &'static str) -> Result<Option<f64>, ParseError> {
        match self.optional(key) {
            None => Ok(None),
            Some(raw) => match raw.parse() {
                Ok(value) => Ok(Some(value)),
                Err(_) => Err(self.bad_number(key, raw)),
            },
        }
    }

    /// An optional non-negative float with a default.
    fn non_negative(&mut self, key: &'static str, default: f64) -> Result<f64, ParseError> {
        match self.optional(key) {
            None => Ok(default),
            Some(raw) => match raw.parse::<f64>() {
                Ok(value) if value >= 0.0 => Ok(value),
                _ => Err(self.bad_number(key, raw)),
            },
        }
    }

    /// The shared lat/lng/alt/hdg/tilt/range block of the camera commands.
    /// All six keys are required; there are no defaults.
    fn camera(&mut self) -> Result<Camera, ParseError> {
        let latitude = self.require_f64("lat")?;
        let longitude = self.require_f64("lng")?;
        let altitude = self.require_f64("alt")?;
        let heading = self.require_f64("hdg")?;
        let tilt = self.require_f64("tilt")?;
        let range = self.require_f64("range")?;
        Ok(Camera::new(
            LatLngAltitude::new(latitude, longitude, altitude),
            heading,
            tilt,
            range,
        ))
    }

    fn altitude_mode(
        &mut self,
        key: &'static str,
        default: AltitudeMode,
    ) -> Result<AltitudeMode, ParseError> {
        match self.optional(key) {
            None => Ok(default),
            Some(raw) => {
                AltitudeMode::from_literal(&raw).ok_or(ParseError::InvalidAltitudeMode {
                    index: self.index,
                    value: raw,
                })
            }
        }
    }

    fn color(&mut self, key: &'static str, default: Color) -> Result<Color, ParseError> {
        match self.optional(key) {
            None => Ok(default),
            Some(raw) => Color::from_hex(&raw).ok_or(ParseError::InvalidColor {
                index: self.index,
                key,
                value: raw,
            }),
        }
    }

    /// A required `lat,lng;lat,lng;...` list with at least `min` points.
    /// Point altitudes are zero; the altitude mode decides how they land.
    fn points(&mut self, key: &'static str, min: usize) -> Result<Vec<LatLngAltitude>, ParseError> {
        let raw = self.require(key)?;
        let mut points = Vec::new();
        for pair in raw.split(';') {
            let pair = pair.trim();
            if pair.is_empty() {
                continue;
            }
            let parsed = pair.split_once(',').and_then(|(lat, lng)| {
                let latitude: f64 = lat.trim().parse().ok()?;
                let longitude: f64 = lng.trim().parse().ok()?;
                Some(LatLngAltitude::new(latitude, longitude, 0.0))
            });
            match parsed {
                Some(point) => points.push(point),
                None => {
                    return Err(ParseError::InvalidPoint {
                        index: self.index,
                        key,
                        value: pair.to_owned(),
                    })
                }
            }
        }
        if points.len() < min || points.len() > MAX_POINTS {
            return Err(ParseError::PointCount {
                index: self.index,
                key,
                min,
                max: MAX_POINTS,
                got: points.len(),
            });
        }
        Ok(points)
    }

    fn bad_number(&self, key: &'static str, value: String) -> ParseError {
        ParseError::InvalidNumber {
            index: self.index,
            command: self.command,
            key,
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_script_is_empty_sequence() {
        assert_eq!(parse_animation("").unwrap(), vec![]);
        assert_eq!(parse_animation("  ; ;; ").unwrap(), vec![]);
    }

    #[test]
    fn delay_then_message() {
        let commands = parse_animation("delay=dur=1000;message=\"hi\"").unwrap();
        assert_eq!(
            commands,
            vec![
                Command::Delay { duration_ms: 1000 },
                Command::Message("hi".to_owned()),
            ]
        );
    }

    #[test]
    fn fly_to_parses_exact_fields() {
        let commands = parse_animation(
            "flyTo=lat=40.0,lng=-74.0,alt=100,hdg=0,tilt=45,range=1000,dur=2000",
        )
        .unwrap();
        assert_eq!(commands.len(), 1);
        let Command::FlyTo(options) = &commands[0] else {
            panic!("expected flyTo, got {:?}", commands[0]);
        };
        assert_eq!(options.camera.center.latitude, 40.0);
        assert_eq!(options.camera.center.longitude, -74.0);
        assert_eq!(options.camera.center.altitude, 100.0);
        assert_eq!(options.camera.heading, 0.0);
        assert_eq!(options.camera.tilt, 45.0);
        assert_eq!(options.camera.range, 1000.0);
        assert_eq!(options.camera.roll, 0.0);
        assert_eq!(options.duration_ms, 2000);
    }

    #[test]
    fn fly_around_count_may_be_fractional_or_negative() {
        let commands = parse_animation(
            "flyAround=lat=47.1,lng=11.3,alt=2200,hdg=221.4,tilt=65,range=1200,dur=3500,count=0.5",
        )
        .unwrap();
        let Command::FlyAround(options) = &commands[0] else {
            panic!("expected flyAround");
        };
        assert_eq!(options.rounds, 0.5);

        let commands = parse_animation(
            "flyAround=lat=0,lng=0,alt=0,hdg=0,tilt=0,range=100,dur=1000,count=-2",
        )
        .unwrap();
        let Command::FlyAround(options) = &commands[0] else {
            panic!("expected flyAround");
        };
        assert_eq!(options.rounds, -2.0);
    }

    #[test]
    fn add_marker_with_quoted_label() {
        let commands = parse_animation(
            "addMarker=id=m1,lat=10,lng=20,alt=5,label=\"X\",altMode=clampToGround",
        )
        .unwrap();
        assert_eq!(
            commands,
            vec![Command::AddMarker(MarkerOptions {
                id: "m1".to_owned(),
                position: LatLngAltitude::new(10.0, 20.0, 5.0),
                label: "X".to_owned(),
                altitude_mode: AltitudeMode::ClampToGround,
            })]
        );
    }

    #[test]
    fn marker_defaults_apply() {
        let commands = parse_animation("addMarker=id=m1,lat=1,lng=2").unwrap();
        let Command::AddMarker(options) = &commands[0] else {
            panic!("expected addMarker");
        };
        assert_eq!(options.position.altitude, 0.0);
        assert_eq!(options.label, "");
        assert_eq!(options.altitude_mode, AltitudeMode::Absolute);
    }

    #[test]
    fn quoted_point_list_survives_command_split() {
        let commands = parse_animation(
            "addPolyline=id=route,points=\"40.7,-74.0;40.8,-74.1;40.9,-74.2\",color=\"#FF00FF00\",width=2.5,altMode=clampToGround",
        )
        .unwrap();
        let Command::AddPolyline(options) = &commands[0] else {
            panic!("expected addPolyline");
        };
        assert_eq!(options.points.len(), 3);
        assert_eq!(options.points[1], LatLngAltitude::new(40.8, -74.1, 0.0));
        assert_eq!(options.color, Color::argb(0xFF, 0x00, 0xFF, 0x00));
        assert_eq!(options.width, 2.5);
    }

    #[test]
    fn polygon_from_generated_script() {
        // The shape of script the text generator actually emits, escaped
        // quotes included.
        let script = "flyTo=lat=40.7829,lng=-73.9654,alt=100,hdg=0,tilt=30,range=5000,dur=5000;addPolygon=id=central_park_area,outerPoints=\"40.7960,-73.9580;40.7639,-73.9720;40.7675,-73.9820;40.8000,-73.9670\",fillColor=\"#8000FF00\",strokeColor=\"#FF008000\",strokeWidth=2.0,altMode=clampToGround;message=\"Central Park Area\";delay=dur=5000";
        let commands = parse_animation(script).unwrap();
        assert_eq!(commands.len(), 4);
        let Command::AddPolygon(options) = &commands[1] else {
            panic!("expected addPolygon");
        };
        assert_eq!(options.outer_points.len(), 4);
        assert_eq!(options.fill_color, Color::argb(0x80, 0x00, 0xFF, 0x00));
        assert_eq!(options.stroke_width, 2.0);
        assert_eq!(commands[2], Command::Message("Central Park Area".to_owned()));
    }

    #[test]
    fn polygon_defaults_apply() {
        let commands =
            parse_animation("addPolygon=id=p,outerPoints=\"0,0;0,1;1,1\"").unwrap();
        let Command::AddPolygon(options) = &commands[0] else {
            panic!("expected addPolygon");
        };
        assert_eq!(options.fill_color, Color::TRANSLUCENT_BLUE);
        assert_eq!(options.stroke_color, Color::OPAQUE_BLUE);
        assert_eq!(options.stroke_width, 3.0);
        assert_eq!(options.altitude_mode, AltitudeMode::ClampToGround);
    }

    #[test]
    fn message_with_inner_escapes_and_separators() {
        let commands =
            parse_animation("message=\"stops: one; two, three \\\"done\\\"\"").unwrap();
        assert_eq!(
            commands,
            vec![Command::Message(
                "stops: one; two, three \"done\"".to_owned()
            )]
        );
    }

    #[test]
    fn unknown_command_is_rejected() {
        let err = parse_animation("spin=dur=100").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownCommand {
                index: 0,
                name: "spin".to_owned(),
            }
        );
    }

    #[test]
    fn error_anywhere_rejects_whole_script() {
        let err = parse_animation("delay=dur=1000;spin=dur=100").unwrap_err();
        assert!(matches!(err, ParseError::UnknownCommand { index: 1, .. }));
    }

    #[test]
    fn missing_required_key_is_rejected() {
        let err =
            parse_animation("flyTo=lat=40.0,lng=-74.0,alt=100,hdg=0,tilt=45,range=1000")
                .unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingKey {
                index: 0,
                command: "flyTo",
                key: "dur",
            }
        );
    }

    #[test]
    fn bad_number_is_rejected_not_defaulted() {
        let err = parse_animation("delay=dur=soon").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidNumber {
                index: 0,
                command: "delay",
                key: "dur",
                value: "soon".to_owned(),
            }
        );
    }

    #[test]
    fn unrecognized_altitude_mode_is_rejected() {
        let err =
            parse_animation("addMarker=id=m,lat=0,lng=0,altMode=floating").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidAltitudeMode {
                index: 0,
                value: "floating".to_owned(),
            }
        );
    }

    #[test]
    fn too_few_polygon_points_is_rejected() {
        let err = parse_animation("addPolygon=id=p,outerPoints=\"0,0;1,1\"").unwrap_err();
        assert_eq!(
            err,
            ParseError::PointCount {
                index: 0,
                key: "outerPoints",
                min: 3,
                max: MAX_POINTS,
                got: 2,
            }
        );
    }

    #[test]
    fn oversized_point_list_is_rejected() {
        let points = (0..101)
            .map(|i| format!("{}.0,{}.0", i % 90, i % 180))
            .collect::<Vec<_>>()
            .join(";");
        let script = format!("addPolyline=id=big,points=\"{points}\"");
        let err = parse_animation(&script).unwrap_err();
        assert!(matches!(err, ParseError::PointCount { got: 101, .. }));
    }

    #[test]
    fn unquoted_point_list_is_rejected() {
        // Without quotes the pair splitter cuts the list at the `,`,
        // leaving an orphaned longitude.
        let err = parse_animation("addPolyline=id=p,points=40.7,-74.0").unwrap_err();
        assert_eq!(
            err,
            ParseError::MalformedPair {
                index: 0,
                command: "addPolyline",
                pair: "-74.0".to_owned(),
            }
        );
    }

    #[test]
    fn unterminated_quote_is_rejected() {
        assert_eq!(
            parse_animation("message=\"oops").unwrap_err(),
            ParseError::UnterminatedString
        );
    }

    #[test]
    fn unknown_keys_are_skipped() {
        let commands =
            parse_animation("addPolygon=id=p,outerPoints=\"0,0;0,1;1,1\",innerPoints=\"0,0;0,1;1,1\"")
                .unwrap();
        assert_eq!(commands.len(), 1);
    }

    #[test]
    fn parsing_is_deterministic() {
        let script = "delay=dur=2000;flyTo=lat=51.5057832,lng=-0.0751902,alt=5.6035,hdg=-16.36154,tilt=65,range=564,dur=3500;delay=dur=1500;flyAround=lat=51.5057832,lng=-0.0751902,alt=5.6035,hdg=-16.36154,tilt=65,range=564,dur=5000,count=1";
        let first = parse_animation(script).unwrap();
        let second = parse_animation(script).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
    }
}
