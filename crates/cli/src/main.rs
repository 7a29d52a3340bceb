//! `studioflow` -- interactive session for the StudioFlow render service.
//!
//! Reads commands from stdin, drives the session coordinator, and prints
//! results. All state lives in one [`Coordinator`]; the loop below only
//! parses lines and renders outcomes.
//!
//! # Environment variables
//!
//! | Variable               | Required | Default                 | Description                    |
//! |------------------------|----------|-------------------------|--------------------------------|
//! | `STUDIO_BACKEND_URL`   | no       | `http://localhost:8000` | Render service base URL        |
//! | `REQUEST_TIMEOUT_SECS` | no       | `30`                    | Per-request HTTP timeout       |
//! | `RUST_LOG`             | no       | `studioflow=info`       | Tracing filter                 |

mod commands;

use std::io::Write as _;
use std::sync::Arc;

use tokio::io::AsyncBufReadExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use studioflow_backend::api::RenderServiceApi;
use studioflow_backend::config::BackendConfig;
use studioflow_core::params::{ControlKind, RenderParameters};
use studioflow_core::version::SnapshotOrigin;
use studioflow_session::coordinator::{Action, Coordinator, Outcome};

use crate::commands::{parse_command, parse_update, Command, HELP};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "studioflow=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = BackendConfig::from_env();
    tracing::info!(base_url = %config.base_url, "Starting studioflow session");

    let api = RenderServiceApi::from_config(&config)?;
    let mut coordinator = Coordinator::new(Arc::new(api));

    // Pre-seed history from the service listing; a cold service is not
    // fatal, the session just starts with an empty ledger.
    match coordinator.seed_versions().await {
        Ok(count) => println!("loaded {count} version(s) from {}", config.base_url),
        Err(e) => eprintln!("could not load version history: {e}"),
    }

    println!("type 'help' for commands");
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("studioflow> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break; // stdin closed
        };

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };

        match command {
            Command::Empty => {}
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
            Command::Show => print_summary(&coordinator),
            Command::ShowJson => match serde_json::to_string_pretty(coordinator.state().params()) {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("could not serialize parameters: {e}"),
            },
            Command::Set { field, value } => {
                match parse_update(&field, &value, coordinator.state().params()) {
                    Ok(update) => {
                        print_outcome(coordinator.dispatch(Action::Update(update)).await);
                    }
                    Err(message) => eprintln!("{message}"),
                }
            }
            Command::Translate => print_outcome(coordinator.dispatch(Action::Translate).await),
            Command::Validate => print_outcome(coordinator.dispatch(Action::Validate).await),
            Command::Render => print_outcome(coordinator.dispatch(Action::Render).await),
            Command::Versions => print_versions(&coordinator),
            Command::Select(id) => {
                print_outcome(coordinator.dispatch(Action::SelectVersion(id)).await)
            }
            Command::Upload { path, kind } => {
                let Some(kind) = ControlKind::parse(&kind) else {
                    eprintln!("'{kind}' is not a control kind (sketch, depth, canny)");
                    continue;
                };
                match tokio::fs::read(&path).await {
                    Ok(bytes) => {
                        let file_name = path
                            .file_name()
                            .and_then(|n| n.to_str())
                            .unwrap_or("control_image")
                            .to_string();
                        let action = Action::UploadControlImage {
                            file_name,
                            bytes,
                            kind,
                        };
                        print_outcome(coordinator.dispatch(action).await);
                    }
                    Err(e) => eprintln!("could not read {}: {e}", path.display()),
                }
            }
            Command::Import(path) => match tokio::fs::read_to_string(&path).await {
                Ok(text) => match serde_json::from_str::<RenderParameters>(&text) {
                    Ok(params) => {
                        print_outcome(coordinator.dispatch(Action::ReplaceParams(params)).await);
                    }
                    Err(e) => eprintln!("{} is not a parameter JSON: {e}", path.display()),
                },
                Err(e) => eprintln!("could not read {}: {e}", path.display()),
            },
            Command::Export(path) => {
                match serde_json::to_string_pretty(coordinator.state().params()) {
                    Ok(json) => match tokio::fs::write(&path, json).await {
                        Ok(()) => println!("wrote {}", path.display()),
                        Err(e) => eprintln!("could not write {}: {e}", path.display()),
                    },
                    Err(e) => eprintln!("could not serialize parameters: {e}"),
                }
            }
        }
    }

    println!("bye");
    Ok(())
}

fn print_outcome(outcome: Outcome) {
    match outcome {
        Outcome::Updated => println!("ok"),
        Outcome::Translated { prompt } => println!("translated prompt:\n  {prompt}"),
        Outcome::Validated {
            enhanced_prompt,
            message,
        } => {
            println!("valid: {}", message.as_deref().unwrap_or("parameters accepted"));
            if let Some(enhanced) = enhanced_prompt {
                println!("enhanced prompt:\n  {enhanced}");
            }
        }
        Outcome::Rendered {
            version_id,
            image_url,
        } => println!("rendered version {version_id}\n  {image_url}"),
        Outcome::RenderAlreadyInFlight => println!("a render is already in flight"),
        Outcome::Uploaded { reference } => println!("uploaded control image: {reference}"),
        Outcome::VersionRestored { id, placeholder } => {
            if placeholder {
                println!(
                    "restored {id} (placeholder parameters: defaults plus the stored seed, \
                     not the original snapshot)"
                );
            } else {
                println!("restored {id}");
            }
        }
        Outcome::Failed(failure) => eprintln!("error: {failure}"),
    }
}

fn print_summary(coordinator: &Coordinator) {
    let state = coordinator.state();
    let p = state.params();
    println!("prompt:       {}", p.prompt);
    println!(
        "camera:       {} mm, yaw {}, pitch {}",
        p.focal_length, p.yaw, p.pitch
    );
    println!(
        "look:         lighting {}%, palette {}, colour space {}",
        p.lighting,
        p.color_palette.as_str(),
        p.color_space.as_str()
    );
    println!(
        "control net:  {} (strength {}, image {})",
        p.control_net.kind.as_str(),
        p.control_net.strength,
        p.control_net.image.as_deref().unwrap_or("none")
    );
    println!(
        "output:       seed {}, {}x{}",
        p.seed, p.resolution.width, p.resolution.height
    );
    println!(
        "session:      validated {}, rendering {}, versions {}",
        state.validated(),
        state.rendering(),
        state.ledger().len()
    );
}

fn print_versions(coordinator: &Coordinator) {
    let ledger = coordinator.state().ledger();
    if ledger.is_empty() {
        println!("no versions yet");
        return;
    }
    for version in ledger.list() {
        let marker = match version.origin {
            SnapshotOrigin::Captured => "",
            SnapshotOrigin::Placeholder => " (placeholder)",
        };
        println!(
            "{}  {}{}\n    {}",
            version.timestamp.format("%Y-%m-%d %H:%M:%S"),
            version.id,
            marker,
            version.thumbnail
        );
    }
}
