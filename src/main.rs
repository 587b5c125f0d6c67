// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use svgbatch::{convert_dir, Options, DEFAULT_DPI, DEFAULT_RASTERIZER};

fn main() {
    if let Err(e) = process() {
        eprintln!("Error: {}.", e);
        std::process::exit(1);
    }
}

fn process() -> Result<(), String> {
    let args = match collect_args() {
        Ok(args) => args,
        Err(e) => {
            println!("{}", HELP);
            return Err(e.to_string());
        }
    };

    if !args.quiet {
        if let Ok(()) = log::set_logger(&LOGGER) {
            log::set_max_level(log::LevelFilter::Warn);
        }
    }

    let dir = args.dir;

    let opt = Options {
        rasterizer: args.rasterizer,
        dpi: args.dpi,
    };

    convert_dir(&dir, &opt)
        .map_err(|e| format!("failed to read directory '{}': {}", dir.display(), e))?;

    Ok(())
}

const HELP: &str = "\
svgbatch converts every SVG file in a directory to a PNG file
using an external rasterizer.

USAGE:
  svgbatch [OPTIONS] [DIR]

  svgbatch
  svgbatch --dpi 300 assets/icons

OPTIONS:
      --help                    Prints this help
  -V, --version                 Prints version

      --dpi DPI                 Sets the export resolution
                                [default: 600] [possible values: 10..4000]
      --rasterizer BIN          Sets the rasterizer executable
                                [default: inkscape]
      --quiet                   Disables warnings

ARGS:
  [DIR]                         Input directory [default: .]
";

#[derive(Debug)]
struct CliArgs {
    dpi: u32,
    rasterizer: String,
    quiet: bool,
    dir: PathBuf,
}

fn collect_args() -> Result<CliArgs, pico_args::Error> {
    let mut input = pico_args::Arguments::from_env();

    if input.contains("--help") {
        print!("{}", HELP);
        std::process::exit(0);
    }

    if input.contains(["-V", "--version"]) {
        println!("{}", env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    Ok(CliArgs {
        dpi:        input.opt_value_from_fn("--dpi", parse_dpi)?.unwrap_or(DEFAULT_DPI),
        rasterizer: input.opt_value_from_str("--rasterizer")?
                         .unwrap_or_else(|| DEFAULT_RASTERIZER.to_string()),
        quiet:      input.contains("--quiet"),
        dir:        input.opt_free_from_str()?.unwrap_or_else(|| PathBuf::from(".")),
    })
}

fn parse_dpi(s: &str) -> Result<u32, String> {
    let n: u32 = s.parse().map_err(|_| "invalid number")?;

    if (10..=4000).contains(&n) {
        Ok(n)
    } else {
        Err("DPI out of bounds".to_string())
    }
}

/// A simple stderr logger.
static LOGGER: SimpleLogger = SimpleLogger;
struct SimpleLogger;
impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::LevelFilter::Warn
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let target = if !record.target().is_empty() {
                record.target()
            } else {
                record.module_path().unwrap_or_default()
            };

            let line = record.line().unwrap_or(0);

            match record.level() {
                log::Level::Error => eprintln!("Error (in {}:{}): {}", target, line, record.args()),
                log::Level::Warn  => eprintln!("Warning (in {}:{}): {}", target, line, record.args()),
                log::Level::Info  => eprintln!("Info (in {}:{}): {}", target, line, record.args()),
                log::Level::Debug => eprintln!("Debug (in {}:{}): {}", target, line, record.args()),
                log::Level::Trace => eprintln!("Trace (in {}:{}): {}", target, line, record.args()),
            }
        }
    }

    fn flush(&self) {}
}
