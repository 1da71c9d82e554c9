use argh::FromArgs;
use std::path::{Path, PathBuf};

use linehough::image::{EdgeMask, ImageSize};
use linehough::imgproc::hough::{self, HoughLinesParams};
use linehough::imgproc::parallel::ExecutionStrategy;

#[derive(FromArgs)]
/// Detect line segments in a binary edge mask and print them as JSON
struct Args {
    /// path to the edge mask image, non-zero pixels are edges
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// path to a JSON file with the detection parameters
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// minimum number of votes for a line
    #[argh(option)]
    threshold: Option<u32>,

    /// minimum segment length in pixels
    #[argh(option)]
    min_line_length: Option<u32>,

    /// maximum gap in pixels merged inside a segment
    #[argh(option)]
    max_line_gap: Option<u32>,

    /// seed for the pixel sampling order
    #[argh(option)]
    seed: Option<u64>,

    /// accumulate every pixel before extracting instead of sampling
    #[argh(switch)]
    exhaustive: bool,

    /// path to write the segments to instead of stdout
    #[argh(option, short = 'o')]
    output: Option<PathBuf>,
}

fn load_params(path: &Path) -> Result<HoughLinesParams, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let params = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    Ok(params)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let mut params = match &args.config {
        Some(path) => load_params(path)?,
        None => HoughLinesParams::default(),
    };
    if let Some(threshold) = args.threshold {
        params.threshold = threshold;
    }
    if let Some(min_line_length) = args.min_line_length {
        params.min_line_length = min_line_length;
    }
    if let Some(max_line_gap) = args.max_line_gap {
        params.max_line_gap = max_line_gap;
    }
    if args.seed.is_some() {
        params.random_seed = args.seed;
    }
    log::info!("detection parameters: {params:?}");

    // read the mask as grayscale
    let gray = image::open(&args.image_path)?.to_luma8();
    let size = ImageSize {
        width: gray.width() as usize,
        height: gray.height() as usize,
    };
    let mask = EdgeMask::from_gray_u8(size, gray.as_raw(), 0)?;
    log::info!("loaded {} with {} edge pixels", size, mask.count_edges());

    let segments = if args.exhaustive {
        hough::hough_lines_segments_exhaustive(&mask, &params, ExecutionStrategy::default())?
    } else {
        hough::hough_lines_segments(&mask, &params)?
    };
    log::info!("found {} segments", segments.len());

    let json = serde_json::to_string_pretty(&segments)?;
    match args.output {
        Some(path) => std::fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
