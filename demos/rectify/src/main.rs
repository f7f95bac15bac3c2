use argh::FromArgs;
use std::path::PathBuf;

use planefix::geometry::Point2D;
use planefix::imgproc::{parallel::ExecutionStrategy, warp};
use planefix::io::functional as F;

#[derive(FromArgs)]
/// Rectify a quadrilateral of an image into an upright rectangle
struct Args {
    /// path to an input image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// path to the output image
    #[argh(option, short = 'o')]
    output_path: PathBuf,

    /// corner as `x,y`, given four times: top-left, top-right, bottom-right, bottom-left
    #[argh(option, short = 'c')]
    corner: Vec<Point2D>,

    /// resample rows in parallel
    #[argh(switch)]
    parallel: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    let corners: [Point2D; 4] = args
        .corner
        .try_into()
        .map_err(|c: Vec<Point2D>| format!("expected 4 corners, got {}", c.len()))?;

    let strategy = if args.parallel {
        ExecutionStrategy::ParallelRows
    } else {
        ExecutionStrategy::Serial
    };

    // read the image
    let image = F::read_image_rgba8(&args.image_path)?;
    log::info!("loaded {} image from {:?}", image.size(), args.image_path);

    let rectified = warp::rectify_with(&image, &corners, strategy)?;
    log::info!("rectified to {}", rectified.size());

    F::write_image(&args.output_path, &rectified)?;
    log::info!("saved {:?}", args.output_path);

    Ok(())
}
