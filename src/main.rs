// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#[macro_use]
extern crate clap;
extern crate failure;
#[macro_use]
extern crate log;
extern crate mandelbrot;
extern crate simplelog;

use clap::{App, Arg, ArgMatches};
use failure::Error;
use mandelbrot::registry::DEFAULT_PALETTE;
use mandelbrot::{default_threads, Coloring, PaletteRegistry, RenderConfig, RenderError, Viewport};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::path::Path;
use std::str::FromStr;

fn validate_float(s: &str, err: &str) -> Result<(), String> {
    match f64::from_str(s) {
        Ok(v) if v.is_finite() => Ok(()),
        _ => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTFILE: &str = "outfile";
const WIDTH: &str = "width";
const HEIGHT: &str = "height";
const XMIN: &str = "xmin";
const XMAX: &str = "xmax";
const YMIN: &str = "ymin";
const YMAX: &str = "ymax";
const ITERATIONS: &str = "iters";
const PALETTE: &str = "palette";
const PROCS: &str = "procs";
const NO_SMOOTH: &str = "no-smooth";
const LIST_PALETTES: &str = "list-palettes";
const VERBOSE: &str = "verbose";

const MAX_SIDE: usize = 65_535;
const MAX_ITERATIONS: usize = 100_000_000;
const MAX_PROCS: usize = 1024;

fn coordinate<'a>(name: &'a str, default: &'a str, help: &'a str) -> Arg<'a, 'a> {
    Arg::with_name(name)
        .long(name)
        .takes_value(true)
        .allow_hyphen_values(true)
        .default_value(default)
        .validator(move |s| validate_float(&s, "Could not parse coordinate"))
        .help(help)
}

fn args<'a>() -> ArgMatches<'a> {
    App::new("mandelbrot")
        .version(crate_version!())
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTFILE)
                .long(OUTFILE)
                .short("o")
                .takes_value(true)
                .default_value("mandelbrot.png")
                .help("Output file; the format follows the extension"),
        )
        .arg(
            Arg::with_name(WIDTH)
                .long(WIDTH)
                .short("w")
                .takes_value(true)
                .default_value("1600")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        MAX_SIDE,
                        "Could not parse image width",
                        &format!("Image width must be between 1 and {}", MAX_SIDE),
                    )
                })
                .help("Output image width in pixels"),
        )
        .arg(
            Arg::with_name(HEIGHT)
                .long(HEIGHT)
                .takes_value(true)
                .default_value("1200")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        MAX_SIDE,
                        "Could not parse image height",
                        &format!("Image height must be between 1 and {}", MAX_SIDE),
                    )
                })
                .help("Output image height in pixels"),
        )
        .arg(coordinate(XMIN, "-2.2", "Left edge of the viewport"))
        .arg(coordinate(XMAX, "1.0", "Right edge of the viewport"))
        .arg(coordinate(YMIN, "-1.6", "Bottom edge of the viewport"))
        .arg(coordinate(YMAX, "1.6", "Top edge of the viewport"))
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("1200")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        MAX_ITERATIONS,
                        "Could not parse iteration count",
                        &format!("Iteration count must be between 1 and {}", MAX_ITERATIONS),
                    )
                })
                .help("Maximum iterations per point"),
        )
        .arg(
            Arg::with_name(PALETTE)
                .long(PALETTE)
                .short("p")
                .takes_value(true)
                .default_value(DEFAULT_PALETTE)
                .help("Palette name (case-sensitive)"),
        )
        .arg(
            Arg::with_name(PROCS)
                .long(PROCS)
                .short("t")
                .takes_value(true)
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        MAX_PROCS,
                        "Could not parse worker count",
                        &format!("Worker count must be between 1 and {}", MAX_PROCS),
                    )
                })
                .help("Number of render workers [default: number of CPUs]"),
        )
        .arg(
            Arg::with_name(NO_SMOOTH)
                .long(NO_SMOOTH)
                .help("Color by raw iteration count instead of smooth escape time"),
        )
        .arg(
            Arg::with_name(LIST_PALETTES)
                .long(LIST_PALETTES)
                .help("Print the available palettes and exit"),
        )
        .arg(
            Arg::with_name(VERBOSE)
                .long(VERBOSE)
                .short("v")
                .multiple(true)
                .help("More logging; repeat for more"),
        )
        .get_matches()
}

fn init_logging(verbosity: u64) -> Result<(), Error> {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;
    Ok(())
}

fn config_from(matches: &ArgMatches) -> Result<RenderConfig, Error> {
    let viewport = Viewport::new(
        value_t!(matches, XMIN, f64)?,
        value_t!(matches, XMAX, f64)?,
        value_t!(matches, YMIN, f64)?,
        value_t!(matches, YMAX, f64)?,
    )?;
    let threads = match matches.value_of(PROCS) {
        Some(procs) => usize::from_str(procs)?,
        None => default_threads(),
    };
    Ok(RenderConfig {
        width: value_t!(matches, WIDTH, usize)?,
        height: value_t!(matches, HEIGHT, usize)?,
        viewport,
        iterations: value_t!(matches, ITERATIONS, usize)?,
        palette: matches.value_of(PALETTE).unwrap_or(DEFAULT_PALETTE).to_string(),
        threads,
        coloring: Coloring::from_smooth(!matches.is_present(NO_SMOOTH)),
    })
}

fn run(matches: &ArgMatches, registry: &PaletteRegistry) -> Result<(), Error> {
    let config = config_from(matches)?;
    debug!("{:?}", config);
    let image = config.render(registry)?;

    let outfile = matches.value_of(OUTFILE).unwrap_or("mandelbrot.png");
    image.save(Path::new(outfile))?;
    println!(
        "Saved {} ({}x{}) using palette {}",
        outfile, config.width, config.height, config.palette
    );
    Ok(())
}

fn main() {
    let matches = args();
    if let Err(e) = init_logging(matches.occurrences_of(VERBOSE)) {
        eprintln!("Could not start logging: {}", e);
    }

    let registry = PaletteRegistry::builtin();
    if matches.is_present(LIST_PALETTES) {
        for name in registry.names() {
            println!("{}", name);
        }
        return;
    }

    if let Err(e) = run(&matches, &registry) {
        if let Some(RenderError::UnknownPalette { name }) = e.downcast_ref::<RenderError>() {
            eprintln!("palette {:?} not found. Available palettes:", name);
            for name in registry.names() {
                eprintln!("  - {}", name);
            }
            std::process::exit(2);
        }
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
