use argh::FromArgs;
use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
    time::Instant,
};

use vispyx::{
    image::Image,
    imgproc::{
        enhance,
        morphology::{self, Kernel, KernelShape},
        threshold,
    },
    io::functional as F,
};

/// Processing applied to the input image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Clahe,
    Otsu,
    Erode,
    Dilate,
    Open,
    Close,
    Gradient,
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clahe" => Ok(Method::Clahe),
            "otsu" => Ok(Method::Otsu),
            "erode" => Ok(Method::Erode),
            "dilate" => Ok(Method::Dilate),
            "open" => Ok(Method::Open),
            "close" => Ok(Method::Close),
            "gradient" => Ok(Method::Gradient),
            _ => Err(format!("unknown method '{s}', see --help for the methods")),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Clahe => "clahe",
            Method::Otsu => "otsu",
            Method::Erode => "erode",
            Method::Dilate => "dilate",
            Method::Open => "open",
            Method::Close => "close",
            Method::Gradient => "gradient",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Box,
    Cross,
}

impl FromStr for Shape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "box" => Ok(Shape::Box),
            "cross" => Ok(Shape::Cross),
            _ => Err(format!("unknown kernel shape '{s}', expected box or cross")),
        }
    }
}

#[derive(FromArgs, Debug)]
/// Preprocess a grayscale image with CLAHE, Otsu or binary morphology
struct Args {
    /// processing method: clahe, otsu, erode, dilate, open, close, gradient
    #[argh(positional)]
    method: Method,

    /// path to the input image
    #[argh(positional)]
    image_path: PathBuf,

    /// path to save the processed image, format taken from the extension (optional)
    #[argh(option, short = 'o')]
    output: Option<PathBuf>,

    /// kernel size for morphology (default: 3)
    #[argh(option, short = 'k', default = "3")]
    kernel_size: usize,

    /// kernel shape: box, cross (default: box)
    #[argh(option, short = 's', default = "Shape::Box")]
    shape: Shape,

    /// number of morphology passes (default: 1)
    #[argh(option, short = 'n', default = "morphology::DEFAULT_ITERATIONS")]
    iterations: usize,

    /// CLAHE clip limit (default: 2.0)
    #[argh(option, default = "enhance::DEFAULT_CLIP_LIMIT")]
    clip_limit: f32,

    /// CLAHE tiles along each axis, images smaller than the grid are padded (default: 8)
    #[argh(option, default = "8")]
    tile_grid: usize,
}

fn process(args: &Args, gray: &Image<u8, 1>) -> Result<Image<u8, 1>, Box<dyn std::error::Error>> {
    let kernel = Kernel::new(match args.shape {
        Shape::Box => KernelShape::Box {
            size: args.kernel_size,
        },
        Shape::Cross => KernelShape::Cross {
            size: args.kernel_size,
        },
    });

    let result = match args.method {
        Method::Clahe => {
            let mut dst = Image::from_size_val(gray.size(), 0)?;
            enhance::clahe(
                gray,
                &mut dst,
                args.clip_limit,
                (args.tile_grid, args.tile_grid),
            )?;
            dst
        }
        Method::Otsu => {
            let mut dst = Image::from_size_val(gray.size(), 0)?;
            let level = threshold::otsu_threshold(gray, &mut dst, 255)?;
            log::info!("otsu level: {level}");
            dst
        }
        Method::Erode => morphology::erode(gray, &kernel, args.iterations)?,
        Method::Dilate => morphology::dilate(gray, &kernel, args.iterations)?,
        Method::Open => morphology::open(gray, &kernel, args.iterations)?,
        Method::Close => morphology::close(gray, &kernel, args.iterations)?,
        Method::Gradient => morphology::gradient(gray, &kernel, args.iterations)?,
    };

    Ok(result)
}

fn foreground_ratio(image: &Image<u8, 1>) -> f64 {
    let area = image.size().area();
    if area == 0 {
        return 0.0;
    }
    let foreground = image.as_slice().iter().filter(|&&v| v != 0).count();
    foreground as f64 / area as f64
}

fn save_result(
    result: &Image<u8, 1>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(output) => {
            F::write_image_any_gray8(output, result)?;
            log::info!("image saved to {}", output.display());
        }
        None => log::info!("image processed, not saved"),
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::init_from_env(env);

    let args: Args = argh::from_env();

    // read the image as grayscale
    let gray = F::read_image_any_gray8(&args.image_path)?;

    let start = Instant::now();
    let result = process(&args, &gray)?;
    log::info!(
        "{} on {} took {:?}",
        args.method,
        gray.size(),
        start.elapsed()
    );
    log::info!("foreground ratio: {:.4}", foreground_ratio(&result));

    save_result(&result, args.output.as_deref())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, argh::EarlyExit> {
        Args::from_args(&["vispyx"], args)
    }

    #[test]
    fn parse_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let args = parse(&["erode", "input.png"]).map_err(|e| e.output)?;
        assert_eq!(args.method, Method::Erode);
        assert_eq!(args.image_path, PathBuf::from("input.png"));
        assert_eq!(args.output, None);
        assert_eq!(args.kernel_size, 3);
        assert_eq!(args.shape, Shape::Box);
        assert_eq!(args.iterations, 1);
        assert_eq!(args.clip_limit, 2.0);
        assert_eq!(args.tile_grid, 8);
        Ok(())
    }

    #[test]
    fn parse_options() -> Result<(), Box<dyn std::error::Error>> {
        let args = parse(&[
            "gradient", "in.jpg", "-o", "out/edges.png", "-k", "5", "-s", "cross", "-n", "2",
        ])
        .map_err(|e| e.output)?;
        assert_eq!(args.method, Method::Gradient);
        assert_eq!(args.output, Some(PathBuf::from("out/edges.png")));
        assert_eq!(args.kernel_size, 5);
        assert_eq!(args.shape, Shape::Cross);
        assert_eq!(args.iterations, 2);
        Ok(())
    }

    #[test]
    fn parse_rejects_unknown_values() {
        assert!(parse(&["sharpen", "in.png"]).is_err());
        assert!(parse(&["erode", "in.png", "-s", "ellipse"]).is_err());
    }

    #[test]
    fn process_methods() -> Result<(), Box<dyn std::error::Error>> {
        let data = (0..64u32).map(|i| if i % 8 < 4 { 30 } else { 220 }).collect();
        let gray = Image::<u8, 1>::new([8, 8].into(), data)?;

        for method in ["clahe", "otsu", "erode", "dilate", "open", "close", "gradient"] {
            let args = parse(&[method, "in.png", "--tile-grid", "2"]).map_err(|e| e.output)?;
            let result = process(&args, &gray)?;
            assert_eq!(result.size(), gray.size(), "{method}");
        }

        let args = parse(&["otsu", "in.png"]).map_err(|e| e.output)?;
        let binary = process(&args, &gray)?;
        assert_eq!(foreground_ratio(&binary), 0.5);

        Ok(())
    }

    #[test]
    fn process_rejects_even_kernel() -> Result<(), Box<dyn std::error::Error>> {
        let gray = Image::<u8, 1>::from_size_val([8, 8].into(), 255)?;
        let args = parse(&["erode", "in.png", "-k", "4"]).map_err(|e| e.output)?;
        assert!(process(&args, &gray).is_err());
        Ok(())
    }

    #[test]
    fn save_result_follows_extension() -> Result<(), Box<dyn std::error::Error>> {
        let tmp_dir = tempfile::tempdir()?;
        let result = Image::<u8, 1>::from_size_val([8, 8].into(), 255)?;

        let jpg_path = tmp_dir.path().join("out").join("result.jpg");
        save_result(&result, Some(jpg_path.as_path()))?;
        assert_eq!(&std::fs::read(&jpg_path)?[..2], &[0xFF, 0xD8]);

        let png_path = tmp_dir.path().join("out").join("result.png");
        save_result(&result, Some(png_path.as_path()))?;
        assert_eq!(&std::fs::read(&png_path)?[1..4], b"PNG");

        let unknown = tmp_dir.path().join("result.unknown");
        assert!(save_result(&result, Some(unknown.as_path())).is_err());
        save_result(&result, None)?;

        Ok(())
    }
}
