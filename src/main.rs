// SPDX-License-Identifier: MPL-2.0
use background_video::application::port::{ControlFlag, MediaEvent};
use background_video::config::{self, MediaConfiguration};
use background_video::domain::breakpoint::Breakpoint;
use background_video::i18n::fluent::I18n;
use background_video::infrastructure::{RecordingSurface, SimulatedPlatform};
use background_video::video_player::{create_component, BackgroundVideo, DocumentVisibilityHub};
use std::path::PathBuf;
use std::process::ExitCode;

const HELP: &str = "\
Walks a background video through a sequence of breakpoints.

USAGE:
  background-video [OPTIONS] <BREAKPOINT>...

OPTIONS:
  --config <PATH>      Read settings from this TOML file
  --lang <LOCALE>      Locale for control labels (e.g. en-US, fr)
  --id <ID>            Element id used in the rendered markup [default: background-video]
  --reduced-motion     Behave as if the user prefers reduced motion
  -h, --help           Print this help

BREAKPOINTS:
  small, medium, large, xlarge (anything else is treated as large)
";

struct Args {
    config: Option<PathBuf>,
    lang: Option<String>,
    id: String,
    reduced_motion: bool,
    breakpoints: Vec<Breakpoint>,
}

fn parse_args() -> Result<Option<Args>, String> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let config = args
        .opt_value_from_os_str("--config", |s| Ok::<_, String>(PathBuf::from(s)))
        .map_err(|e| e.to_string())?;
    let lang = args.opt_value_from_str("--lang").map_err(|e| e.to_string())?;
    let id = args
        .opt_value_from_str("--id")
        .map_err(|e| e.to_string())?
        .unwrap_or_else(|| "background-video".to_string());
    let reduced_motion = args.contains("--reduced-motion");

    let breakpoints = args
        .finish()
        .into_iter()
        .map(|raw| {
            let raw = raw.to_string_lossy();
            if let Err(err) = raw.parse::<Breakpoint>() {
                log::warn!("{err}, using {}", Breakpoint::default());
            }
            Breakpoint::from_label(&raw)
        })
        .collect::<Vec<_>>();
    if breakpoints.is_empty() {
        return Err("at least one breakpoint is required".to_string());
    }

    Ok(Some(Args {
        config,
        lang,
        id,
        reduced_motion,
        breakpoints,
    }))
}

fn load_config(path: Option<&PathBuf>) -> Result<MediaConfiguration, String> {
    match path {
        Some(path) => config::load_from_path(path).map_err(|e| e.to_string()),
        None => {
            let (config, warning) = config::load();
            if let Some(key) = warning {
                log::warn!("{}", I18n::default().tr(&key));
            }
            Ok(config)
        }
    }
}

/// Delivers the events a page would fire once a new element is ready.
fn settle(video: &mut BackgroundVideo<SimulatedPlatform, RecordingSurface>) {
    let requests = video.platform_mut().take_settle_requests();
    let Some(binding) = video.binding_id() else {
        return;
    };
    video.handle_media_event(binding, MediaEvent::MetadataLoaded);
    video.handle_media_event(binding, MediaEvent::LoadedData);
    for (requested, _) in requests {
        video.on_settle_elapsed(requested);
    }
}

fn report(video: &BackgroundVideo<SimulatedPlatform, RecordingSurface>, i18n: &I18n) {
    println!("  state:    {:?}", video.state());
    if let Some(url) = video.current_url() {
        println!("  source:   {url}");
    }
    let flags: Vec<_> = video
        .surface()
        .flags()
        .map(ControlFlag::class_name)
        .collect();
    if !flags.is_empty() {
        println!("  flags:    {}", flags.join(" "));
    }
    if let Some((label, pressed)) = video.surface().toggle() {
        println!("  toggle:   {label} (pressed: {pressed})");
    }
    if let Some(err) = video.last_error() {
        println!("  error:    {}", i18n.tr(err.i18n_key()));
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("error: {message}\n\n{HELP}");
            return ExitCode::FAILURE;
        }
    };

    let config = match load_config(args.config.as_ref()) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::FAILURE;
        }
    };

    let i18n = I18n::new(args.lang, &config);
    let platform = SimulatedPlatform::new().with_reduced_motion(args.reduced_motion);
    let mut video = create_component(
        args.id,
        config,
        Some(&i18n),
        platform,
        RecordingSurface::new(),
        DocumentVisibilityHub::new(),
    );

    for (index, breakpoint) in args.breakpoints.into_iter().enumerate() {
        let output = if index == 0 {
            video.mount(breakpoint)
        } else {
            video.on_breakpoint_changed(breakpoint)
        };
        settle(&mut video);

        println!("[{breakpoint}]");
        println!("  render:   {output}");
        report(&video, &i18n);
    }

    video.unmount();
    ExitCode::SUCCESS
}
