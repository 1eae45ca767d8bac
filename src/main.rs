use std::borrow::Cow;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing::info;

use imgscope::logger;
use imgscope::viewer::analysis::{self, ProfileData};
use imgscope::viewer::color::hsv_or_raw;
use imgscope::viewer::{
    ChannelMode, Direction, HistogramReport, HistogramResult, ImageCatalog, ImageReader, IntensityTransform, PixelBuffer,
    ProfileChannel, ProfileOptions, RasterImageReader, TiffCompression, ViewerConfig, ViewerSession, project,
};

#[derive(Parser)]
#[command(name = "imgscope")]
#[command(about = "Inspect images: pixel values, line profiles, histograms and fitted renders")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Channel projection applied before any analysis (color, gray, blue, green, red, hue, saturation, value)
    #[arg(short, long, global = true, default_value = "color")]
    channel: ChannelMode,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List images under a directory, recursively
    List {
        dir: PathBuf,

        /// File name wildcard (`*` and `?`)
        #[arg(short, long, default_value = "*.*")]
        pattern: String,
    },
    /// Print the value and HSV of one pixel
    Inspect {
        file: PathBuf,
        x: usize,
        y: usize,
    },
    /// Print a line profile through a pixel
    Profile {
        file: PathBuf,
        x: usize,
        y: usize,

        /// Scan direction: hor or ver
        #[arg(short, long, default_value = "hor")]
        direction: Direction,

        /// Band width across the scan line
        #[arg(short, long, default_value_t = analysis::DEFAULT_PROFILE_WIDTH)]
        width: usize,

        /// Print the raw band instead of its mean
        #[arg(long)]
        raw: bool,

        /// Channel to sample: all, blue, green or red
        #[arg(long, default_value = "all")]
        band_channel: ProfileChannel,
    },
    /// Print the histogram of a rectangle
    Histogram {
        file: PathBuf,
        x0: i64,
        y0: i64,
        x1: i64,
        y1: i64,

        /// Convert to HSV before counting
        #[arg(long)]
        hsv: bool,
    },
    /// Fit an image into a frame, as the viewer shows it, and save the result
    Render {
        file: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        /// Frame height
        #[arg(long, default_value_t = 720)]
        height: usize,

        /// Frame width
        #[arg(long, default_value_t = 1280)]
        width: usize,

        /// Intensity coefficient applied before projection
        #[arg(long)]
        coeff: Option<f64>,

        /// Output compression: none, lzw, deflate
        #[arg(long, default_value = "none")]
        compression: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init(if cli.verbose { "debug" } else { "info" });

    match cli.command {
        Commands::List { dir, pattern } => {
            let catalog = ImageCatalog::scan(&dir, &pattern)?;
            for path in catalog.paths() {
                println!("{}", path.display());
            }
            info!("{} images", catalog.len());
        }
        Commands::Inspect { file, x, y } => {
            let image = load(&file, cli.channel)?;
            println!("value: {}", analysis::value_at(&image, x, y));
            println!("HSV: {}", analysis::hsv_at(&image, x, y));
        }
        Commands::Profile {
            file,
            x,
            y,
            direction,
            width,
            raw,
            band_channel,
        } => {
            let image = load(&file, cli.channel)?;
            let options = ProfileOptions {
                width,
                averaged: !raw,
                channel: band_channel,
            };
            let profile = analysis::extract(&image, x, y, direction, &options);
            print_profile(&profile.positions, &profile.data);
        }
        Commands::Histogram {
            file,
            x0,
            y0,
            x1,
            y1,
            hsv,
        } => {
            let image = load(&file, cli.channel)?;
            let (image, converted) = if hsv {
                hsv_or_raw(&image)
            } else {
                (Cow::Borrowed(&image), false)
            };
            let report = HistogramReport::new(analysis::histogram(&image, (x0, y0), (x1, y1))?, converted);
            print_histogram(&report.result, &report.labels);
        }
        Commands::Render {
            file,
            output,
            height,
            width,
            coeff,
            compression,
        } => {
            let config = ViewerConfig::builder()
                .compression(parse_compression(&compression)?)
                .build();
            let mut session = ViewerSession::new(config);
            session.set_channel_mode(cli.channel);
            if let Some(coeff) = coeff {
                session.set_transform(IntensityTransform::new(coeff, 0.0));
            }
            session.resize_frame(height, width);
            session.open_files(vec![file.clone()]);

            let transform = session
                .fit_transform(0)
                .with_context(|| format!("could not load {}", file.display()))?;
            session.save_display(0, &output)?;
            info!(
                "Rendered {} at ratio {:.3} ({}x{}) to {}",
                file.display(),
                transform.ratio,
                transform.display_width,
                transform.display_height,
                output.display()
            );
        }
    }

    Ok(())
}

fn load(path: &Path, mode: ChannelMode) -> anyhow::Result<PixelBuffer> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let image = RasterImageReader
        .read_image(&bytes)
        .with_context(|| format!("decoding {}", path.display()))?;
    Ok(project(&image, mode))
}

fn parse_compression(name: &str) -> anyhow::Result<TiffCompression> {
    Ok(match name.to_ascii_lowercase().as_str() {
        "none" => TiffCompression::None,
        "lzw" => TiffCompression::Lzw,
        "deflate" | "deflate-balanced" => TiffCompression::DeflateBalanced,
        "deflate-fast" => TiffCompression::DeflateFast,
        "deflate-best" => TiffCompression::DeflateBest,
        other => bail!("unknown compression '{}'", other),
    })
}

fn print_profile(positions: &[usize], data: &ProfileData) {
    match data {
        ProfileData::Averaged(values) => {
            for (pos, value) in positions.iter().zip(values) {
                println!("{}\t{:.2}", pos, value);
            }
        }
        ProfileData::Raw(rows) => {
            for (pos, band) in positions.iter().zip(rows) {
                let band: Vec<String> = band.iter().map(u8::to_string).collect();
                println!("{}\t{}", pos, band.join(" "));
            }
        }
    }
}

fn print_histogram(result: &HistogramResult, labels: &[&str]) {
    println!("region: {:?} ({} px)", result.region, result.pixel_count());
    for (label, hist) in labels.iter().zip(&result.channels) {
        println!("{}: peak {} mean {:.2}", label, hist.peak(), hist.mean());
    }
    println!("bin\t{}", labels.join("\t"));
    for bin in 0..analysis::BINS {
        let counts: Vec<String> = result.channels.iter().map(|h| h.bins[bin].to_string()).collect();
        println!("{}\t{}", bin, counts.join("\t"));
    }
}
