// SPDX-License-Identifier: MIT OR Apache-2.0
//! GeoTour - console player for scripted 3D map tours
//!
//! Plays animation scripts against a console-backed map controller:
//! - Built-in scenario catalogue (`--list`)
//! - Scripts from a file (`--script <file>`)
//! - Parsed command dump as JSON (`--dump`)
//!
//! ## Architecture
//!
//! The binary wires a [`ConsoleController`] into a `geotour_engine`
//! [`Player`] and prints session events as they arrive. All playback
//! semantics live in the engine crates; this is presentation only.

mod console;
mod scenarios;

use console::ConsoleController;
use geotour_engine::{MapController, Player, SessionEvent};
use geotour_script::parse_animation;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const USAGE: &str = "usage: geotour [--list] [--dump] [--script <file>] [<scenario>]";

struct Args {
    list: bool,
    dump: bool,
    scenario: Option<String>,
    script_path: Option<String>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut parsed = Self {
            list: false,
            dump: false,
            scenario: None,
            script_path: None,
        };
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--list" => parsed.list = true,
                "--dump" => parsed.dump = true,
                "--script" => {
                    parsed.script_path =
                        Some(args.next().ok_or_else(|| {
                            "--script needs a file path".to_owned()
                        })?);
                }
                other if other.starts_with('-') => {
                    return Err(format!("unknown option `{other}`"));
                }
                other => {
                    if parsed.scenario.replace(other.to_owned()).is_some() {
                        return Err("at most one scenario name".to_owned());
                    }
                }
            }
        }
        Ok(parsed)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("geotour_app=debug".parse().unwrap())
        .add_directive("geotour_engine=info".parse().unwrap());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(error) => {
            eprintln!("{error}");
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    if args.list {
        for scenario in scenarios::scenarios() {
            println!("{:<14} {}", scenario.name, scenario.title);
        }
        return ExitCode::SUCCESS;
    }

    let (script, initial_camera, models) = if let Some(path) = &args.script_path {
        match std::fs::read_to_string(path) {
            Ok(script) => (script, None, Vec::new()),
            Err(error) => {
                eprintln!("cannot read `{path}`: {error}");
                return ExitCode::FAILURE;
            }
        }
    } else if let Some(name) = &args.scenario {
        match scenarios::find(name) {
            Some(scenario) => (
                scenario.script.to_owned(),
                Some(scenario.initial_camera),
                scenario.models,
            ),
            None => {
                eprintln!("unknown scenario `{name}`; try --list");
                return ExitCode::FAILURE;
            }
        }
    } else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    if args.dump {
        return match parse_animation(&script) {
            Ok(commands) => {
                println!("{}", serde_json::to_string_pretty(&commands).unwrap());
                ExitCode::SUCCESS
            }
            Err(error) => {
                eprintln!("parse error: {error}");
                ExitCode::FAILURE
            }
        };
    }

    let controller = Arc::new(ConsoleController::new());
    if let Some(camera) = initial_camera {
        controller.set_camera(&camera);
    }
    let mut placed = Vec::new();
    for model in &models {
        match controller.add_model(model).await {
            Ok(Some(handle)) => placed.push(handle),
            Ok(None) => warn!(id = %model.id, "controller declined model"),
            Err(error) => warn!(id = %model.id, error = %error, "model placement failed"),
        }
    }

    let (mut player, mut events) = Player::new(controller as Arc<dyn MapController>);
    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                SessionEvent::Message(text) => info!("message: {text}"),
                SessionEvent::Error(text) => warn!("{text}"),
            }
        }
    });

    if player.play(&script).is_err() {
        return ExitCode::FAILURE;
    }
    player.join().await;
    player.clear_scene();
    for mut handle in placed {
        handle.remove();
    }
    drop(player);
    let _ = printer.await;
    ExitCode::SUCCESS
}
