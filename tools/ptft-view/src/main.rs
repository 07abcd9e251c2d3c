mod scene;
mod sheet;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use image::{RgbImage, imageops::FilterType};
use ptft::{Color, Config, Display, HEIGHT, Palette, WIDTH};
use ptft_emu::{Clock, Controller};
use tracing::{Level, info, warn};
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "ptft-view")]
#[command(version, about = "Render through the TFT controller emulator to PNG", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output PNG path
    #[arg(short, long, global = true, default_value = "ptft.png")]
    out: PathBuf,

    /// Integer upscale of the saved image
    #[arg(short, long, global = true, default_value_t = 2)]
    zoom: u32,

    /// Scroll offset applied after drawing (0..=218)
    #[arg(long, global = true, default_value_t = 0)]
    scroll: u8,

    /// Load the gamma table during bring-up
    #[arg(long, global = true)]
    gamma: bool,

    /// More logging; repeat for trace
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw the built-in demo scene
    Demo,

    /// Lay out a raw 3bpp tile sheet on the panel
    Sheet {
        /// File of back-to-back 24-byte tiles
        path: PathBuf,

        /// Tile scale factor
        #[arg(short, long, default_value_t = 2)]
        scale: u8,

        /// Seven RGB565 colors for indices 0-6, comma separated hex
        #[arg(short, long, value_parser = parse_palette)]
        palette: Option<Palette>,
    },
}

fn parse_palette(s: &str) -> Result<Palette, String> {
    let colors = s
        .split(',')
        .map(|c| u16::from_str_radix(c.trim().trim_start_matches("0x"), 16).map(Color::new))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e.to_string())?;
    let colors: [Color; 7] = colors
        .try_into()
        .map_err(|v: Vec<Color>| format!("expected 7 colors, got {}", v.len()))?;
    Ok(Palette::new(colors))
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).compact().finish().init();
}

fn save_png(controller: &Controller, path: &Path, zoom: u32) -> anyhow::Result<()> {
    let (width, height) = (u32::from(WIDTH), u32::from(HEIGHT));
    let frame = RgbImage::from_raw(width, height, controller.to_rgb8()).context("frame buffer has the wrong size")?;
    let frame = match zoom {
        0 | 1 => frame,
        z => image::imageops::resize(&frame, width * z, height * z, FilterType::Nearest),
    };
    frame.save(path).with_context(|| format!("writing {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let mut clock = Clock::new();
    let config = Config { gamma: cli.gamma, ..Config::default() };
    let mut display = Display::new(Controller::new(), &mut clock, config);
    info!("panel up after {:?} of delays", clock.elapsed());

    match cli.command {
        Commands::Demo => scene::draw(&mut display)?,
        Commands::Sheet { path, scale, palette } => {
            let tiles = sheet::load(&path)?;
            sheet::draw(&mut display, &tiles, scale, &palette.unwrap_or(scene::PALETTE))?;
        }
    }

    display.set_scroll(cli.scroll)?;

    let controller = display.release();
    let stats = controller.stats();
    info!(
        "{} register writes, {} pixel writes, {} strobes",
        stats.register_writes, stats.pixel_writes, stats.strobes
    );
    if !controller.faults().is_empty() {
        warn!("controller saw bus faults: {:?}", controller.faults());
    }

    save_png(&controller, &cli.out, cli.zoom)
}
