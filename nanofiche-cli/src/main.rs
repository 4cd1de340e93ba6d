use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use jiff::Zoned;
use log::{error, info, warn};
use nanofiche::Packer;
use nanofiche::io::export::export_result;
use nanofiche::io::ext_repr::ExtPackRequest;
use nanofiche::io::import::import_request;
use nanofiche::io::svg::result_to_svg;
use nanofiche_cli::config::NanoficheConfig;
use nanofiche_cli::io;
use nanofiche_cli::io::cli::Cli;
use nanofiche_cli::io::output::PackOutput;
use nanofiche_cli::manifest::{self, Manifest};
use nanofiche_cli::project_log::{ProjectLog, RunStatus};

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config = match args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            NanoficheConfig::default()
        }
        Some(config_file) => io::read_json(&config_file).context("incorrect config file format")?,
    };

    info!("[MAIN] Successfully parsed NanoficheConfig: {config:?}");

    let input_stem = args
        .input_file
        .file_stem()
        .and_then(|s| s.to_str())
        .context("input file has no valid name")?
        .to_owned();

    if !args.solution_folder.exists() {
        fs::create_dir_all(&args.solution_folder)
            .with_context(|| format!("could not create solution folder: {:?}", args.solution_folder))?;
    }

    let mut ext_request = io::read_request(&args.input_file)?;

    let images = match &args.image_folder {
        None => None,
        Some(folder) => {
            let images = manifest::list_images(folder)?;
            if ext_request.n != images.len() as i64 {
                warn!(
                    "[MAIN] request asks for {} bins, using the {} images found in {}",
                    ext_request.n,
                    images.len(),
                    folder.display()
                );
            }
            ext_request.n = images.len() as i64;
            Some(images)
        }
    };

    main_pack(ext_request, config, images, &input_stem, &args.solution_folder)
}

fn main_pack(
    ext_request: ExtPackRequest,
    config: NanoficheConfig,
    images: Option<Vec<PathBuf>>,
    input_stem: &str,
    output_folder: &Path,
) -> Result<()> {
    let request = import_request(&ext_request).context("invalid packing request")?;

    let started = Zoned::now();
    let start = Instant::now();
    let outcome = Packer::new(request.bin, config.packer_config).pack(request.n, &request.envelope);
    let processing_time = start.elapsed();

    if config.write_project_log {
        let log = ProjectLog {
            project_name: input_stem,
            started: &started,
            request: &request,
            outcome: &outcome,
            processing_time,
        };
        io::write_text(&log.render(), &output_folder.join(log.file_name()))?;
        if log.status() == RunStatus::Failed {
            error!("[MAIN] run of {input_stem} failed, see the project log for details");
        }
    }

    let result = outcome.context("packing failed")?;

    {
        let output = PackOutput {
            request: ext_request,
            result: export_result(&result),
            config,
        };
        let solution_path = output_folder.join(format!("sol_{input_stem}.json"));
        io::write_json(&output, &solution_path)?;
    }

    if config.write_svg {
        let svg_path = output_folder.join(format!("sol_{input_stem}.svg"));
        let svg = result_to_svg(&result, config.svg_draw_options, input_stem);
        io::write_svg(&svg, &svg_path)?;
    }

    match (&images, config.write_manifest) {
        (Some(images), true) => {
            let manifest = Manifest::new(&result, images)?;
            let manifest_path = output_folder.join(format!("manifest_{input_stem}.json"));
            io::write_json(&manifest, &manifest_path)?;
        }
        (None, true) => info!("[MAIN] no image folder provided, skipping the manifest"),
        (_, false) => {}
    }

    Ok(())
}
