use std::path::PathBuf;
use std::process::ExitCode;

use glowtrail::{Experience, ExperienceConfig, Variant};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
usage: glowtrail [options]

  --basic             pointer-only variant without tint or glow modulation
  --debug             show the tint color panel
  --touch             force touch input
  --picture <path>    picture sampled by the particles
  --glow <path>       glow stamp image
  --config <path>     JSON config file, flags override its values
  -h, --help          print this message";

#[derive(Debug, Default)]
struct Args {
    basic: bool,
    debug: bool,
    touch: bool,
    picture: Option<PathBuf>,
    glow: Option<PathBuf>,
    config: Option<PathBuf>,
    help: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        let mut value = |flag: &str| args.next().map(PathBuf::from).ok_or_else(|| format!("{flag} needs a path"));
        match arg.as_str() {
            "--basic" => parsed.basic = true,
            "--debug" => parsed.debug = true,
            "--touch" => parsed.touch = true,
            "--picture" => parsed.picture = Some(value("--picture")?),
            "--glow" => parsed.glow = Some(value("--glow")?),
            "--config" => parsed.config = Some(value("--config")?),
            "-h" | "--help" => parsed.help = true,
            other => return Err(format!("unknown argument `{other}`")),
        }
    }
    Ok(parsed)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("glowtrail=info")),
        )
        .init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}\n\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };
    if args.help {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    let config = match &args.config {
        Some(path) => match ExperienceConfig::from_json_file(path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config");
                config
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to load config");
                return ExitCode::FAILURE;
            }
        },
        None => ExperienceConfig::default(),
    };

    let mut experience = Experience::from_config(config);
    if args.debug {
        experience = experience.with_debug(true);
    }
    if args.basic {
        experience = experience.with_variant(Variant::Basic);
    }
    if args.touch {
        experience = experience.with_touch(true);
    }
    if let Some(picture) = args.picture {
        experience = experience.with_picture(picture);
    }
    if let Some(glow) = args.glow {
        experience = experience.with_glow(glow);
    }

    match experience.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "glowtrail exited with an error");
            ExitCode::FAILURE
        }
    }
}
