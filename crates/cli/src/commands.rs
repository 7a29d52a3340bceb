//! Line-oriented command parsing for the interactive session.
//!
//! Commands mirror the control-surface affordances: field edits, the
//! translate/validate/render buttons, the JSON editor (import/export),
//! the version bar, and the control-image upload.

use std::path::PathBuf;

use studioflow_core::params::{
    ColorPalette, ColorSpace, ControlKind, ControlNet, ParamUpdate, RenderParameters, Resolution,
};

/// One parsed input line.
#[derive(Debug, PartialEq)]
pub enum Command {
    /// Print a parameter summary and session flags.
    Show,
    /// Print the full parameter JSON.
    ShowJson,
    /// Replace one parameter field.
    Set { field: String, value: String },
    /// Translate the prompt through the render service.
    Translate,
    /// Validate the current parameters.
    Validate,
    /// Run the render pipeline.
    Render,
    /// List the version history.
    Versions,
    /// Restore a version's parameter snapshot.
    Select(String),
    /// Upload a control reference image.
    Upload { path: PathBuf, kind: String },
    /// Replace the whole parameter set from a JSON file.
    Import(PathBuf),
    /// Write the current parameter JSON to a file.
    Export(PathBuf),
    Help,
    Quit,
    /// Blank line; nothing to do.
    Empty,
}

/// Parse one input line. Errors are user-readable messages.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Empty);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };

    match word {
        "show" if rest == "json" => Ok(Command::ShowJson),
        "show" if rest.is_empty() => Ok(Command::Show),
        "show" => Err(format!("unknown show target '{rest}' (try 'show' or 'show json')")),
        "set" => {
            let (field, value) = rest
                .split_once(char::is_whitespace)
                .map(|(f, v)| (f, v.trim()))
                .ok_or_else(|| "usage: set <field> <value>".to_string())?;
            Ok(Command::Set {
                field: field.to_string(),
                value: value.to_string(),
            })
        }
        "translate" => Ok(Command::Translate),
        "validate" => Ok(Command::Validate),
        "render" => Ok(Command::Render),
        "versions" => Ok(Command::Versions),
        "select" => {
            if rest.is_empty() {
                return Err("usage: select <version-id>".to_string());
            }
            Ok(Command::Select(rest.to_string()))
        }
        "upload" => {
            let (path, kind) = rest
                .rsplit_once(char::is_whitespace)
                .map(|(p, k)| (p.trim(), k))
                .ok_or_else(|| "usage: upload <path> <sketch|depth|canny>".to_string())?;
            Ok(Command::Upload {
                path: PathBuf::from(path),
                kind: kind.to_string(),
            })
        }
        "import" => {
            if rest.is_empty() {
                return Err("usage: import <path>".to_string());
            }
            Ok(Command::Import(PathBuf::from(rest)))
        }
        "export" => {
            if rest.is_empty() {
                return Err("usage: export <path>".to_string());
            }
            Ok(Command::Export(PathBuf::from(rest)))
        }
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command '{other}' (try 'help')")),
    }
}

/// Turn a `set <field> <value>` pair into a [`ParamUpdate`].
///
/// Field names match the service's camelCase wire names. The control net
/// sub-fields build a full replacement sub-object from the current
/// parameters, so the update stays an atomic swap.
pub fn parse_update(
    field: &str,
    value: &str,
    current: &RenderParameters,
) -> Result<ParamUpdate, String> {
    match field {
        "prompt" => Ok(ParamUpdate::Prompt(value.to_string())),
        "focalLength" => parse_number(field, value).map(ParamUpdate::FocalLength),
        "yaw" => parse_number(field, value).map(ParamUpdate::Yaw),
        "pitch" => parse_number(field, value).map(ParamUpdate::Pitch),
        "lighting" => parse_number(field, value).map(ParamUpdate::Lighting),
        "colorPalette" => ColorPalette::parse(value)
            .map(ParamUpdate::ColorPalette)
            .ok_or_else(|| {
                format!("'{value}' is not a palette (warm, cool, neutral, cinematic, vibrant)")
            }),
        "controlNetType" => ControlKind::parse(value)
            .map(|kind| {
                ParamUpdate::ControlNet(ControlNet {
                    kind,
                    ..current.control_net.clone()
                })
            })
            .ok_or_else(|| {
                format!("'{value}' is not a control kind (sketch, depth, canny, none)")
            }),
        "controlNetStrength" => parse_number(field, value).map(|strength| {
            ParamUpdate::ControlNet(ControlNet {
                strength,
                ..current.control_net.clone()
            })
        }),
        "controlNetImage" => Ok(ParamUpdate::ControlImage(if value == "none" {
            None
        } else {
            Some(value.to_string())
        })),
        "seed" => value
            .parse::<i64>()
            .map(ParamUpdate::Seed)
            .map_err(|_| format!("seed must be an integer, got '{value}'")),
        "resolution" => {
            let (w, h) = value
                .split_once('x')
                .ok_or_else(|| format!("resolution must look like 1920x1080, got '{value}'"))?;
            let width = w
                .parse::<u32>()
                .map_err(|_| format!("bad width '{w}'"))?;
            let height = h
                .parse::<u32>()
                .map_err(|_| format!("bad height '{h}'"))?;
            Ok(ParamUpdate::Resolution(Resolution { width, height }))
        }
        "colorSpace" => ColorSpace::parse(value)
            .map(ParamUpdate::ColorSpace)
            .ok_or_else(|| {
                format!("'{value}' is not a colour space (sRGB, Adobe RGB, Display P3)")
            }),
        other => Err(format!("unknown field '{other}'")),
    }
}

fn parse_number(field: &str, value: &str) -> Result<f64, String> {
    value
        .parse::<f64>()
        .map_err(|_| format!("{field} must be a number, got '{value}'"))
}

/// Help text listing every command.
pub const HELP: &str = "\
commands:
  show               parameter summary and session flags
  show json          full parameter JSON
  set <field> <val>  replace one field (prompt, focalLength, yaw, pitch,
                     lighting, colorPalette, controlNetType,
                     controlNetStrength, controlNetImage, seed,
                     resolution <WxH>, colorSpace)
  translate          translate the prompt through the render service
  validate           validate the current parameters
  render             render and record a new version
  versions           list the version history (newest first)
  select <id>        restore a version's parameter snapshot
  upload <path> <sketch|depth|canny>
                     upload a control reference image
  import <path>      replace all parameters from a JSON file
  export <path>      write the parameter JSON to a file
  quit               leave the session";
