// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`svgbatch` converts every SVG file in a directory into a PNG file.

It is not a rendering library. Rasterization is delegated to an external
tool (Inkscape by default), which is invoked once per file and must be
present in `PATH`.
*/

#![warn(missing_docs)]

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// The default export resolution.
pub const DEFAULT_DPI: u32 = 600;

/// The default rasterizer executable.
pub const DEFAULT_RASTERIZER: &str = "inkscape";

/// Run configuration.
#[derive(Clone, Debug)]
pub struct Options {
    /// The rasterizer executable name or path.
    pub rasterizer: String,
    /// Export resolution in dots per inch.
    pub dpi: u32,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            rasterizer: DEFAULT_RASTERIZER.to_string(),
            dpi: DEFAULT_DPI,
        }
    }
}

/// A single planned SVG to PNG conversion.
#[derive(Clone, Debug)]
pub struct ConversionTask {
    svg_path: PathBuf,
    png_path: PathBuf,
    dpi: u32,
}

impl ConversionTask {
    /// Creates a task for `svg_path`.
    ///
    /// Returns `None` when the file name does not end with `.svg`
    /// (ASCII case-insensitive) or is not valid UTF-8.
    pub fn new(svg_path: PathBuf, dpi: u32) -> Option<ConversionTask> {
        let file_name = svg_path.file_name()?.to_str()?;
        if !is_svg_file_name(file_name) {
            return None;
        }

        let png_path = svg_path.with_file_name(png_file_name(file_name));
        Some(ConversionTask { svg_path, png_path, dpi })
    }

    /// The source SVG path.
    pub fn svg_path(&self) -> &Path {
        &self.svg_path
    }

    /// The derived output path. Always a sibling of the source.
    pub fn png_path(&self) -> &Path {
        &self.png_path
    }

    /// The export resolution for this task.
    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    /// Builds the rasterizer invocation for this task.
    pub fn command(&self, rasterizer: &str) -> Command {
        let mut filename_arg = OsString::from("--export-filename=");
        filename_arg.push(&self.png_path);

        let mut cmd = Command::new(rasterizer);
        cmd.arg(&self.svg_path)
            .arg("--export-type=png")
            .arg(format!("--export-dpi={}", self.dpi))
            .arg(filename_arg);
        cmd
    }

    /// Runs the rasterizer and waits for it to finish.
    ///
    /// A spawn failure and a non-zero exit status are both errors.
    pub fn run(&self, rasterizer: &str) -> io::Result<()> {
        self.command(rasterizer).run()
    }
}

/// Checks that `file_name` ends with `.svg`, ASCII case-insensitive.
pub fn is_svg_file_name(file_name: &str) -> bool {
    let name = file_name.as_bytes();
    name.len() >= 4 && name[name.len() - 4..].eq_ignore_ascii_case(b".svg")
}

/// Derives the output file name from an SVG file name.
///
/// The first occurrence of `.svg` (ASCII case-insensitive) is replaced
/// with `_png.png`. Only the first match is replaced, so
/// `a.svg.backup.svg` becomes `a_png.png.backup.svg`.
pub fn png_file_name(file_name: &str) -> String {
    match file_name.to_ascii_lowercase().find(".svg") {
        Some(pos) => {
            let mut name = String::with_capacity(file_name.len() + 4);
            name.push_str(&file_name[..pos]);
            name.push_str("_png.png");
            name.push_str(&file_name[pos + 4..]);
            name
        }
        None => file_name.to_string(),
    }
}

/// Collects a conversion task for every SVG file in `dir`.
///
/// Entries that are not regular files are skipped.
/// Tasks are sorted by path.
pub fn collect_tasks(dir: &Path, dpi: u32) -> io::Result<Vec<ConversionTask>> {
    let mut tasks = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }

        if let Some(task) = ConversionTask::new(path, dpi) {
            tasks.push(task);
        }
    }

    tasks.sort_by(|a, b| a.svg_path.cmp(&b.svg_path));

    Ok(tasks)
}

/// Converts every SVG file in `dir`.
///
/// Prints a progress line per file and a completion message after the
/// scan. A failed invocation is reported as a warning and does not stop
/// the scan. Returns the number of attempted conversions.
pub fn convert_dir(dir: &Path, opt: &Options) -> io::Result<usize> {
    let tasks = collect_tasks(dir, opt.dpi)?;

    for task in &tasks {
        println!(
            "Converting {} -> {}",
            task.svg_path.display(),
            task.png_path.display()
        );

        if let Err(e) = task.run(&opt.rasterizer) {
            log::warn!("Failed to convert '{}' cause {}.", task.svg_path.display(), e);
        }
    }

    println!("Conversion complete.");

    Ok(tasks.len())
}

trait CommandExt {
    fn run(&mut self) -> io::Result<()>;
}

impl CommandExt for Command {
    fn run(&mut self) -> io::Result<()> {
        let status = self.status()?;
        if status.success() {
            Ok(())
        } else {
            Err(io::Error::new(
                io::ErrorKind::Other,
                format!("process failed: {}", status),
            ))
        }
    }
}
