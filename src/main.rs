use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use particle_field::{FieldConfig, Runner, Snapshot};

const USAGE: &str = "\
Usage:
  particle-field [--preset contact] [--seed S] [CONFIG.json]
  particle-field --snapshot OUT.png [--frames N] [--size WxH] [--dpr R]
                 [--seed S] [--preset contact] [CONFIG.json]";

#[derive(Debug, Default)]
struct Args {
    config_path: Option<PathBuf>,
    preset: Option<String>,
    snapshot: Option<PathBuf>,
    frames: Option<u64>,
    size: Option<(u32, u32)>,
    dpr: Option<f32>,
    seed: Option<u64>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .ok_or_else(|| format!("{} needs a value", name))
        };
        match arg.as_str() {
            "--snapshot" => parsed.snapshot = Some(PathBuf::from(value("--snapshot")?)),
            "--preset" => parsed.preset = Some(value("--preset")?),
            "--frames" => {
                let v = value("--frames")?;
                parsed.frames = Some(v.parse().map_err(|_| format!("invalid frame count {:?}", v))?);
            }
            "--size" => {
                let v = value("--size")?;
                let size = v
                    .split_once('x')
                    .and_then(|(w, h)| Some((w.parse::<u32>().ok()?, h.parse::<u32>().ok()?)))
                    .ok_or_else(|| format!("invalid size {:?}, expected WxH", v))?;
                parsed.size = Some(size);
            }
            "--dpr" => {
                let v = value("--dpr")?;
                parsed.dpr = Some(v.parse().map_err(|_| format!("invalid pixel ratio {:?}", v))?);
            }
            "--seed" => {
                let v = value("--seed")?;
                parsed.seed = Some(v.parse().map_err(|_| format!("invalid seed {:?}", v))?);
            }
            flag if flag.starts_with("--") => return Err(format!("unknown option {}", flag)),
            path => {
                if parsed.config_path.is_some() {
                    return Err(format!("unexpected argument {}", path));
                }
                parsed.config_path = Some(PathBuf::from(path));
            }
        }
    }

    if parsed.snapshot.is_none() {
        if parsed.frames.is_some() {
            return Err("--frames only applies with --snapshot".to_string());
        }
        if parsed.dpr.is_some() {
            return Err("--dpr only applies with --snapshot".to_string());
        }
    }

    Ok(parsed)
}

fn load_config(args: &Args) -> Result<FieldConfig, String> {
    let mut config = match &args.config_path {
        Some(path) => FieldConfig::load(path)
            .map_err(|e| format!("Failed to load config from {:?}: {}", path, e))?,
        None => FieldConfig::default(),
    };

    match args.preset.as_deref() {
        None => {}
        Some("contact") => {
            let preset = FieldConfig::contact_hero();
            config.quantity = preset.quantity;
            config.ease = preset.ease;
            config.color = preset.color;
        }
        Some(other) => return Err(format!("unknown preset {:?}", other)),
    }

    Ok(config)
}

fn run(args: Args) -> Result<(), String> {
    let config = load_config(&args)?;

    if let Some(out) = &args.snapshot {
        let mut snapshot = Snapshot::new(config);
        if let Some((w, h)) = args.size {
            snapshot = snapshot.with_size(w, h);
        }
        if let Some(dpr) = args.dpr {
            snapshot = snapshot.with_pixel_ratio(dpr);
        }
        if let Some(frames) = args.frames {
            snapshot = snapshot.with_frames(frames);
        }
        if let Some(seed) = args.seed {
            snapshot = snapshot.with_seed(seed);
        }
        return snapshot.save(out).map_err(|e| e.to_string());
    }

    let mut runner = Runner::new(config);
    if let Some((w, h)) = args.size {
        runner = runner.with_window_size(w, h);
    }
    if let Some(seed) = args.seed {
        runner = runner.with_seed(seed);
    }
    runner.run().map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
