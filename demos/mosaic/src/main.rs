use argh::FromArgs;
use std::path::PathBuf;

use planefix::imgproc::mosaic;
use planefix::io::functional as F;
use planefix::layout::LayoutConfig;

fn parse_rgba(value: &str) -> Result<[u8; 4], String> {
    let hex = value.trim_start_matches('#');
    if hex.len() != 8 || !hex.is_ascii() {
        return Err(format!("expected RRGGBBAA, got `{value}`"));
    }

    let mut rgba = [0u8; 4];
    for (i, channel) in rgba.iter_mut().enumerate() {
        *channel = u8::from_str_radix(&hex[2 * i..2 * i + 2], 16)
            .map_err(|e| format!("invalid colour `{value}`: {e}"))?;
    }
    Ok(rgba)
}

#[derive(FromArgs)]
/// Arrange images in justified rows and save them as a single mosaic
struct Args {
    /// path to the output image
    #[argh(option, short = 'o')]
    output_path: PathBuf,

    /// JSON file with a layout configuration
    #[argh(option)]
    config: Option<PathBuf>,

    /// canvas width in pixels
    #[argh(option)]
    canvas_size: Option<u32>,

    /// space between images, in pixels
    #[argh(option)]
    gap: Option<f64>,

    /// target row height as a fraction of the canvas width
    #[argh(option)]
    ratio: Option<f64>,

    /// background colour as RRGGBBAA
    #[argh(option, from_str_fn(parse_rgba), default = "[255, 255, 255, 255]")]
    background: [u8; 4],

    /// input images, in placement order
    #[argh(positional)]
    images: Vec<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    let mut config = match &args.config {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => LayoutConfig::default(),
    };
    if let Some(canvas_size) = args.canvas_size {
        config.canvas_size = canvas_size;
    }
    if let Some(gap) = args.gap {
        config.gap = gap;
    }
    if let Some(ratio) = args.ratio {
        config.target_row_height_ratio = ratio;
    }
    config.validate()?;

    let tiles = args
        .images
        .iter()
        .map(|path| F::read_image_rgba8(path))
        .collect::<Result<Vec<_>, _>>()?;
    log::info!("loaded {} images", tiles.len());

    let canvas = mosaic::layout_mosaic(&tiles, &config, args.background)?;
    log::info!("composed {} mosaic", canvas.size());

    F::write_image(&args.output_path, &canvas)?;
    log::info!("saved {:?}", args.output_path);

    Ok(())
}
