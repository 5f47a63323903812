//! A CLI tool for inspecting the pixel representations
//! derived from an image's geometry and modality rescale.
use clap::Parser;
use dicom_pixelrep::{
    ColorOutputPixel, ColorPixel, InputPixel, ModalityTransform, MonoOutputPixel, MonoPixel,
    PixelRepresentation, Rescale, SampleRepresentation,
};
use snafu::{Report, ResultExt, Whatever};
use tracing::{error, info, Level};

/// Exit code for when the input description is invalid.
const ERROR_INPUT: i32 = -2;
/// Exit code for when an output representation could not be derived.
const ERROR_OUTPUT: i32 = -3;

/// Show the sample counts of an image's pixel representations
#[derive(Debug, Parser)]
#[command(version)]
struct App {
    /// Total number of raw samples
    /// (default is to compute it from the image geometry)
    #[arg(long = "samples", conflicts_with_all = ["rows", "columns"])]
    samples: Option<usize>,

    /// Number of rows per frame
    #[arg(long = "rows", default_value = "0")]
    rows: u16,

    /// Number of columns per frame
    #[arg(long = "columns", default_value = "0")]
    columns: u16,

    /// Samples per pixel (1 for monochrome, 3 for color)
    #[arg(long = "samples-per-pixel", default_value = "1")]
    samples_per_pixel: u16,

    /// Number of frames
    #[arg(short = 'n', long = "frames", default_value = "1")]
    frames: u32,

    /// Frame number (0-indexed) to locate in the sample buffer
    #[arg(short = 'F', long = "frame", default_value = "0")]
    frame_number: u32,

    /// Bits effectively used by each sample
    #[arg(long = "bits-stored", default_value = "16")]
    bits_stored: u16,

    /// Sample values are signed
    #[arg(long = "signed")]
    signed: bool,

    /// Modality rescale slope
    #[arg(long = "slope", default_value = "1", allow_hyphen_values = true)]
    slope: f64,

    /// Modality rescale intercept
    #[arg(long = "intercept", default_value = "0", allow_hyphen_values = true)]
    intercept: f64,

    /// Treat the image as color
    #[arg(long = "color")]
    color: bool,

    /// Number of extra monochrome representations sharing the transform
    #[arg(long = "siblings", default_value = "0")]
    siblings: usize,

    /// Print more information about the pixel representations
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() {
    let app = App::parse();

    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(if app.verbose { Level::TRACE } else { Level::INFO })
            .finish(),
    )
    .whatever_context("Could not set up global logging subscriber")
    .unwrap_or_else(|e: Whatever| {
        eprintln!("[ERROR] {}", Report::from_error(e));
    });

    let input = build_input(&app).unwrap_or_else(|e| {
        error!("{}", Report::from_error(e));
        std::process::exit(ERROR_INPUT);
    });

    let result = if app.color {
        run_color(&app, &input)
    } else {
        run_mono(&app, &input)
    };
    if let Err(e) = result {
        error!("{}", Report::from_error(e));
        std::process::exit(ERROR_OUTPUT);
    }
}

fn build_input(app: &App) -> Result<InputPixel, dicom_pixelrep::Error> {
    let representation = if app.signed {
        SampleRepresentation::Signed
    } else {
        SampleRepresentation::Unsigned
    };
    let input = match app.samples {
        Some(samples) => InputPixel::new(samples),
        None => InputPixel::from_geometry(app.rows, app.columns, app.samples_per_pixel, app.frames)?,
    };
    input.with_bits_stored(app.bits_stored, representation)
}

fn run_mono(app: &App, input: &InputPixel) -> Result<(), dicom_pixelrep::Error> {
    let modality = ModalityTransform::new(Rescale::new(app.slope, app.intercept));
    let mono = if modality.is_identity() {
        MonoPixel::from_input(Some(input), None)
    } else {
        MonoPixel::from_input(Some(input), Some(modality.shared()))
    };

    let siblings: Vec<_> = (0..app.siblings)
        .map(|_| mono.reframe(mono.sample_count()))
        .collect();
    if let Some(modality) = mono.modality() {
        info!(
            owners = ModalityTransform::reference_count(modality),
            "Modality transform shared"
        );
    }
    drop(siblings);

    let output = MonoOutputPixel::new(Some(&mono), app.frames)?;
    let range = output.frame_range(app.frame_number)?;
    let (min, max) = mono.modality_value_range(input);

    println!("input samples:     {}", input.sample_count());
    println!("monochrome samples: {}", mono.sample_count());
    println!("samples per frame: {}", output.sample_count());
    println!("frame #{} samples:  {}..{}", app.frame_number, range.start, range.end);
    if app.verbose {
        println!("modality range:    {} ..= {}", min, max);
    }
    Ok(())
}

fn run_color(app: &App, input: &InputPixel) -> Result<(), dicom_pixelrep::Error> {
    let color = ColorPixel::from_input(Some(input), app.samples_per_pixel)?;
    let output = ColorOutputPixel::new(Some(&color), app.frames)?;
    let range = output.frame_range(app.frame_number)?;

    println!("input samples:     {}", input.sample_count());
    println!("color samples:     {}", color.sample_count());
    println!("samples per frame: {}", output.sample_count());
    println!("pixels per frame:  {}", output.pixel_count());
    println!("frame #{} samples:  {}..{}", app.frame_number, range.start, range.end);
    if app.verbose {
        let mono = MonoPixel::from_color(&color);
        println!("as monochrome:     {}", mono.sample_count());
    }
    Ok(())
}
