use anyhow::Result;
use clap::Parser;
use log::info;

mod display;
mod grid;
mod loader;
mod pipeline;

use pipeline::SpectrumPipeline;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// path to the input image, read as grayscale
    input: String,

    /// output path for the log-magnitude spectrum image
    #[arg(short, long, default_value = "spectrum.png")]
    spectrum: String,

    /// output path for the image reconstructed by the inverse transform
    #[arg(short, long, default_value = "restored.png")]
    restored: String,
}

fn main() -> Result<()> {
    // initialize the logger
    env_logger::init();

    // parse command-line arguments
    let args = Args::parse();

    let image = loader::load_grayscale(&args.input)?;
    info!(
        "loaded {}x{} grayscale image from '{}'",
        image.height(),
        image.width(),
        args.input
    );

    let mut pipeline = SpectrumPipeline::new();

    // pad to FFT-friendly dimensions, then transform
    let padded = pipeline.pad_for_transform(&image)?;
    if padded.height() != image.height() || padded.width() != image.width() {
        info!(
            "padded to {}x{} for the transform",
            padded.height(),
            padded.width()
        );
    }
    let complex = pipeline.forward_transform(&padded);

    // spectrum image: log magnitude, DC centered, normalized to 8 bit
    let magnitude = pipeline.compute_display_magnitude(&complex);
    display::save(&magnitude, &args.spectrum)?;
    info!("wrote spectrum to '{}'", args.spectrum);

    // reconstruct the image from the frequency domain
    let restored = pipeline.inverse_transform_and_reconstruct(complex);
    display::save(&restored, &args.restored)?;
    info!("wrote reconstruction to '{}'", args.restored);

    Ok(())
}
