use argh::FromArgs;
use std::path::PathBuf;
use std::time::Duration;

use flatmorph::{
    imgproc::{
        morphology::{
            Anchor, ElementShape, EmptyWindow, MorphOp, MorphOptions, MorphologyError,
            StructuringElement, DEFAULT_ELEMENT_SIZE,
        },
        parallel::ExecutionStrategy,
    },
    io::{functional as F, DynImage, IoError},
};

#[derive(FromArgs)]
/// Apply a flat morphological transform (dilate, erode, open, close) to an image
struct Args {
    /// operation to apply: dilate, erode, open or close
    #[argh(positional)]
    op: MorphOp,

    /// path to the input image
    #[argh(positional)]
    input: PathBuf,

    /// path to the output image, the format follows the extension
    #[argh(positional)]
    output: PathBuf,

    /// structuring element size (default: 5)
    #[argh(positional)]
    size: Option<String>,

    /// structuring element shape: box, cross, ellipse (default: box)
    #[argh(option, short = 'k', default = "String::from(\"box\")")]
    shape: String,

    /// anchor as `x,y` (default: element center)
    #[argh(option, short = 'a')]
    anchor: Option<String>,

    /// output for pixels whose window misses the image: zero, source (default: zero)
    #[argh(option, default = "String::from(\"zero\")")]
    empty_window: String,

    /// process image rows in parallel
    #[argh(switch, short = 'p')]
    parallel: bool,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    Morphology(#[from] MorphologyError),

    #[error("invalid anchor '{0}', expected `x,y`")]
    InvalidAnchor(String),

    #[error("unknown element shape '{0}', expected box, cross or ellipse")]
    UnknownShape(String),

    #[error("unknown empty window policy '{0}', expected zero or source")]
    UnknownEmptyWindow(String),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    let size = parse_size(args.size.as_deref());
    let element = StructuringElement::new(parse_shape(&args.shape, size)?)?;
    let anchor = args.anchor.as_deref().map(parse_anchor).transpose()?;
    let options = MorphOptions {
        empty_window: parse_empty_window(&args.empty_window)?,
        strategy: if args.parallel {
            ExecutionStrategy::ParallelRows
        } else {
            ExecutionStrategy::Serial
        },
    };

    log::info!("Beginning {}", args.op);

    let image = F::read_image_any(&args.input)?;
    log::info!(
        "read {} image: {} channels, {} bits per sample",
        image.size(),
        image.num_channels(),
        image.bits_per_sample()
    );

    let (output, elapsed) = run(args.op, &image, &element, anchor, &options)?;

    F::write_image_any(&args.output, &output)?;

    log::info!(
        "{} finished. Time elapsed: {} ms",
        capitalize(args.op.name()),
        elapsed.as_millis()
    );

    Ok(())
}

/// Apply `op` to whichever pixel layout was decoded.
fn run(
    op: MorphOp,
    image: &DynImage,
    element: &StructuringElement,
    anchor: Option<Anchor>,
    options: &MorphOptions,
) -> Result<(DynImage, Duration), CliError> {
    macro_rules! apply {
        ($variant:ident, $img:expr) => {{
            let timed = op.apply($img, element, anchor, options)?;
            (DynImage::$variant(timed.output), timed.elapsed)
        }};
    }

    Ok(match image {
        DynImage::L8(img) => apply!(L8, img),
        DynImage::La8(img) => apply!(La8, img),
        DynImage::Rgb8(img) => apply!(Rgb8, img),
        DynImage::Rgba8(img) => apply!(Rgba8, img),
        DynImage::L16(img) => apply!(L16, img),
        DynImage::La16(img) => apply!(La16, img),
        DynImage::Rgb16(img) => apply!(Rgb16, img),
        DynImage::Rgba16(img) => apply!(Rgba16, img),
    })
}

fn parse_size(arg: Option<&str>) -> usize {
    let Some(arg) = arg else {
        return DEFAULT_ELEMENT_SIZE;
    };
    match arg.trim().parse::<usize>() {
        Ok(size) if size > 0 => size,
        _ => {
            log::warn!(
                "invalid element size '{arg}', using {}",
                DEFAULT_ELEMENT_SIZE
            );
            DEFAULT_ELEMENT_SIZE
        }
    }
}

fn parse_shape(shape: &str, size: usize) -> Result<ElementShape, CliError> {
    match shape.to_ascii_lowercase().as_str() {
        "box" => Ok(ElementShape::Box { size }),
        "cross" => Ok(ElementShape::Cross { size }),
        "ellipse" => Ok(ElementShape::Ellipse {
            width: size,
            height: size,
        }),
        _ => Err(CliError::UnknownShape(shape.to_string())),
    }
}

fn parse_anchor(arg: &str) -> Result<Anchor, CliError> {
    let invalid = || CliError::InvalidAnchor(arg.to_string());
    let (x, y) = arg.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse().map_err(|_| invalid())?;
    let y = y.trim().parse().map_err(|_| invalid())?;
    Ok(Anchor::new(x, y))
}

fn parse_empty_window(arg: &str) -> Result<EmptyWindow, CliError> {
    match arg.to_ascii_lowercase().as_str() {
        "zero" => Ok(EmptyWindow::Zero),
        "source" => Ok(EmptyWindow::Source),
        _ => Err(CliError::UnknownEmptyWindow(arg.to_string())),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
