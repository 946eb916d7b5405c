use std::error::Error;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use panosphere::config::PanoramaJobConfig;
use panosphere::core::CropParams;
use panosphere::cubemap::{CubemapParams, FaceInterpolation};
use panosphere::pipeline::{crop_file, merge_files, run_job, split_file};

/// Panorama projection and cubemap conversion.
#[derive(Debug, Parser)]
#[command(author, version, about = "Equirectangular panorama and cubemap tools")]
struct Cli {
    /// Log progress (repeat for more detail).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Project a ring of captures into an equirectangular panorama.
    Project(ProjectArgs),
    /// Split an equirectangular panorama into six `<stem>_<face>.jpg` faces.
    Split {
        panorama: PathBuf,
        #[arg(long)]
        out_dir: PathBuf,
        #[arg(long)]
        face_size: Option<usize>,
    },
    /// Compose six faces back into an equirectangular panorama.
    Merge {
        #[arg(long)]
        faces_dir: PathBuf,
        /// Face file prefix, as in `<base>_front.jpg`.
        #[arg(long)]
        base: String,
        #[arg(long)]
        width: usize,
        #[arg(long)]
        height: usize,
        #[arg(long)]
        output: PathBuf,
        /// Interpolate face pixels instead of copying the nearest one.
        #[arg(long)]
        bilinear: bool,
    },
    /// Trim the dark borders a stitcher leaves around a panorama.
    Crop {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, default_value_t = 25)]
        dark_threshold: u32,
    },
}

#[derive(Debug, Args)]
struct ProjectArgs {
    /// JSON job config; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    input_dir: Option<String>,
    #[arg(long)]
    output: Option<String>,
    #[arg(long)]
    yaw_step: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pitch: Option<f64>,
    #[arg(long)]
    width: Option<usize>,
    #[arg(long)]
    height: Option<usize>,
    #[arg(long)]
    faces_dir: Option<String>,
    #[arg(long)]
    crop: bool,
}

impl ProjectArgs {
    fn into_config(self) -> Result<PanoramaJobConfig, Box<dyn Error>> {
        let mut cfg = match (&self.config, &self.input_dir) {
            (Some(path), _) => PanoramaJobConfig::load_json(path)?,
            (None, Some(dir)) => PanoramaJobConfig::new(dir.clone()),
            (None, None) => return Err("project needs --config or --input-dir".into()),
        };
        if let Some(dir) = self.input_dir {
            cfg.input_dir = dir;
        }
        if let Some(output) = self.output {
            cfg.output_path = Some(output);
        }
        if let Some(step) = self.yaw_step {
            cfg.yaw_step_deg = step;
        }
        if let Some(pitch) = self.pitch {
            cfg.pitch_deg = pitch;
        }
        if let Some(w) = self.width {
            cfg.projector.output_width = w;
        }
        if let Some(h) = self.height {
            cfg.projector.output_height = h;
        }
        if let Some(dir) = self.faces_dir {
            cfg.faces_dir = Some(dir);
        }
        if self.crop && cfg.crop.is_none() {
            cfg.crop = Some(CropParams::default());
        }
        Ok(cfg)
    }
}

fn init_logging(verbose: u8) {
    #[cfg(feature = "tracing")]
    {
        let _ = tracing_log::LogTracer::init();
        panosphere::core::init_tracing(false, verbose);
    }
    #[cfg(not(feature = "tracing"))]
    {
        let _ = panosphere::core::init_verbosity(verbose);
    }
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Project(args) => {
            let cfg = args.into_config()?;
            let summary = run_job(&cfg)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Split {
            panorama,
            out_dir,
            face_size,
        } => {
            let params = CubemapParams {
                face_size,
                ..CubemapParams::default()
            };
            for (face, path) in split_file(&panorama, &out_dir, params)? {
                println!("{face}: {}", path.display());
            }
        }
        Command::Merge {
            faces_dir,
            base,
            width,
            height,
            output,
            bilinear,
        } => {
            let params = CubemapParams {
                face_size: None,
                interpolation: if bilinear {
                    FaceInterpolation::Bilinear
                } else {
                    FaceInterpolation::Nearest
                },
            };
            merge_files(&faces_dir, &base, width, height, params, &output)?;
            println!("{}", output.display());
        }
        Command::Crop {
            input,
            output,
            dark_threshold,
        } => {
            let params = CropParams {
                dark_threshold,
                ..CropParams::default()
            };
            crop_file(&input, &output, &params)?;
            println!("{}", output.display());
        }
    }
    Ok(())
}
