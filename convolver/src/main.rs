use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use fast_plane_convolve as fpc;
use fast_plane_convolve::{Plane, Rect, ThreadPool};
use image::{GrayImage, ImageReader, Luma};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

mod structs;

/// Convolves a plane with a lowpass kernel and checks the result
/// against the slow reference implementation.
#[derive(Parser)]
#[clap(version, about, long_about = None)]
#[clap(disable_help_flag = true)]
struct Cli {
    #[clap(long, action = clap::ArgAction::HelpLong)]
    help: Option<bool>,

    /// Path to source image file, its luminance is convolved.
    /// A pseudo-random plane is generated if it is not specified.
    #[clap(short, long, value_parser)]
    source: Option<PathBuf>,

    /// Path to result image file
    #[clap(short, long, value_parser)]
    output: Option<PathBuf>,

    /// Overwrite output file
    #[clap(long, action)]
    overwrite: bool,

    /// Width of generated plane
    #[clap(short, long, default_value_t = 1920)]
    width: u32,

    /// Height of generated plane
    #[clap(short, long, default_value_t = 1080)]
    height: u32,

    /// Seed of the generator of pseudo-random values
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// Kernel used to convolve the plane
    #[clap(short, long, value_enum, default_value_t = structs::Kernel::Symmetric3)]
    kernel: structs::Kernel,

    /// SIMD extension of CPU used by the fast path
    #[clap(short, long, value_enum, default_value_t = structs::Cpu::Auto)]
    cpu: structs::Cpu,

    /// Count of worker threads, zero runs everything on the main thread
    #[clap(short, long, default_value_t = 0)]
    threads: usize,

    /// How many times the convolution is repeated to measure its time
    #[clap(short, long, default_value_t = 1)]
    repeat: u32,

    /// Do not compare the result with the slow reference implementation
    #[clap(long, action)]
    no_check: bool,

    #[clap(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

fn main() -> Result<()> {
    let cli: Cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();
    convolve(&cli)
}

fn convolve(cli: &Cli) -> Result<()> {
    let src = open_source_plane(cli)?;
    let rect = Rect::from_plane(&src);

    let mut convolver = fpc::Convolver::new();
    let cpu_extensions = cli.cpu.cpu_extensions()?;
    // SAFETY: `cpu_extensions()` returns only extensions supported by CPU.
    unsafe { convolver.set_cpu_extensions(cpu_extensions) };
    let pool = ThreadPool::new(cli.threads).with_context(|| "Failed to create thread pool")?;

    let mut dst = Plane::new(rect.width, rect.height);
    info!(
        "Convolve {}x{} plane with {:?} kernel using {:?} and {} threads",
        rect.width,
        rect.height,
        cli.kernel,
        cpu_extensions,
        pool.num_threads()
    );
    let start = Instant::now();
    for _ in 0..cli.repeat.max(1) {
        run_kernel(cli.kernel, &convolver, &src, rect, &pool, &mut dst)
            .with_context(|| "Failed to convolve plane")?;
    }
    let elapsed = start.elapsed() / cli.repeat.max(1);
    let megapixels = rect.width as f64 * rect.height as f64 / 1e6;
    info!(
        "Time of one convolution: {:.3} ms ({:.1} MP/s)",
        elapsed.as_secs_f64() * 1e3,
        megapixels / elapsed.as_secs_f64()
    );

    if !cli.no_check {
        check_result(cli.kernel, &src, rect, &pool, &dst)?;
    }
    if let Some(path) = &cli.output {
        save_result(path, cli.overwrite, &dst)?;
    }
    Ok(())
}

fn open_source_plane(cli: &Cli) -> Result<Plane> {
    let plane = match &cli.source {
        Some(path) => {
            debug!("Opening the source image {:?}", path);
            let image = ImageReader::open(path)
                .with_context(|| format!("Failed to read source file from {:?}", path))?
                .decode()
                .with_context(|| "Failed to decode source image")?;
            Plane::from(&image)
        }
        None => {
            debug!(
                "Generate {}x{} plane with seed {}",
                cli.width, cli.height, cli.seed
            );
            let mut rng = StdRng::seed_from_u64(cli.seed);
            let mut plane = Plane::new(cli.width, cli.height);
            for row in plane.rows_mut() {
                row.iter_mut().for_each(|v| *v = rng.gen());
            }
            plane
        }
    };
    let radius = cli.kernel.radius();
    if plane.width() <= radius || plane.height() <= radius {
        return Err(anyhow!(
            "Plane {}x{} is too small for {:?} kernel",
            plane.width(),
            plane.height(),
            cli.kernel
        ));
    }
    Ok(plane)
}

fn run_kernel(
    kernel: structs::Kernel,
    convolver: &fpc::Convolver,
    src: &Plane,
    rect: Rect,
    pool: &ThreadPool,
    dst: &mut Plane,
) -> Result<(), fpc::ConvolveError> {
    let pool = Some(pool);
    match kernel {
        structs::Kernel::Symmetric3 => {
            convolver.symmetric3(src, rect, &fpc::WeightsSymmetric3::lowpass(), pool, dst)
        }
        structs::Kernel::Symmetric5 => {
            convolver.symmetric5(src, rect, &fpc::WeightsSymmetric5::lowpass(), pool, dst)
        }
        structs::Kernel::Separable5 => {
            convolver.separable5(src, rect, &fpc::WeightsSeparable5::lowpass(), pool, dst)
        }
    }
}

fn check_result(
    kernel: structs::Kernel,
    src: &Plane,
    rect: Rect,
    pool: &ThreadPool,
    actual: &Plane,
) -> Result<()> {
    use fpc::reference;

    debug!("Convolve the plane with the reference implementation");
    let mut expected = Plane::new(rect.width, rect.height);
    let pool = Some(pool);
    match kernel {
        structs::Kernel::Symmetric3 => reference::slow_symmetric3(
            src,
            rect,
            &fpc::WeightsSymmetric3::lowpass(),
            pool,
            &mut expected,
        ),
        structs::Kernel::Symmetric5 => reference::slow_symmetric5(
            src,
            rect,
            &fpc::WeightsSymmetric5::lowpass(),
            pool,
            &mut expected,
        ),
        structs::Kernel::Separable5 => reference::slow_separable5(
            src,
            rect,
            &fpc::WeightsSeparable5::lowpass(),
            pool,
            &mut expected,
        ),
    }
    .with_context(|| "Failed to run the reference implementation")?;

    fpc::testing::verify_relative_error(&expected, actual, 1e-5, 1e-5)
        .with_context(|| "Result differs from the reference")?;
    let max_diff = fpc::testing::max_abs_difference(&expected, actual)?;
    info!("Result matches the reference, max abs difference is {max_diff:e}");
    Ok(())
}

fn save_result(path: &Path, overwrite: bool, plane: &Plane) -> Result<()> {
    if path.exists() && !overwrite {
        return Err(anyhow!("Destination path {:?} already exists.", path));
    }
    debug!("Save the result image into the file {:?}", path);
    let image = GrayImage::from_fn(plane.width(), plane.height(), |x, y| {
        let value = plane.get(x, y).clamp(0., 1.) * 255.;
        Luma([value.round() as u8])
    });
    image
        .save(path)
        .with_context(|| "Failed to save the result image")?;
    Ok(())
}
