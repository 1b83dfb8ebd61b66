//! Main Program for CP-Mask
//! Run with `--help` for more instruction

// Copyright (C) 2023 Dheatly23
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{bail, Context, Error};
use clap::Parser;
use image::io::Reader as ImageReader;
use image::{save_buffer, ColorType};
use ndarray::prelude::*;
use rayon::prelude::*;

use cpmask::transform;

/// Extensions picked up in batch mode, lowercased.
const EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "webp"];

/// Output subfolder created next to the inputs.
const OUTPUT_DIR: &str = "output_cp";

#[derive(Parser, Debug)]
#[command(author, version)]
struct Args {
    /// Input image file, or a directory to process as a batch
    input: PathBuf,

    /// Password (1-16 letters A-Z, case-insensitive); the same password
    /// scrambles and restores
    #[arg(short, long)]
    password: String,

    /// Output file or directory (default: `output_cp` next to the input)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Error> {
    let args = Args::parse();

    let password = args.password.trim();
    if password.is_empty() {
        bail!("Password must not be empty");
    }
    if password.len() > 16 || !password.chars().all(|c| c.is_ascii_alphabetic()) {
        println!("WARNING: Password is not 1-16 letters A-Z, but is used as typed");
    }

    if args.input.is_dir() {
        run_batch(&args.input, args.output.as_deref(), password)
    } else {
        let output = match args.output {
            Some(p) => p,
            None => args
                .input
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(OUTPUT_DIR)
                .join(
                    args.input
                        .file_name()
                        .context("Input path has no file name")?,
                ),
        };
        if let Some(dir) = output.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Cannot create {}", dir.display()))?;
        }
        process_file(&args.input, &output, password)?;
        println!("Wrote {}", output.display());
        Ok(())
    }
}

/// Transforms every image file in `input_dir`, one output per input
/// under the same filename. Items are independent, so they run in
/// parallel; a failing item is reported and skipped, never fatal.
fn run_batch(input_dir: &Path, output: Option<&Path>, password: &str) -> Result<(), Error> {
    let mut files = Vec::new();
    for entry in fs::read_dir(input_dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        match path.extension().and_then(OsStr::to_str) {
            Some(ext) if EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) => {
                files.push(path)
            }
            _ => {}
        }
    }
    files.sort();

    if files.is_empty() {
        bail!("No image files found in {}", input_dir.display());
    }

    let output_dir = match output {
        Some(p) => p.to_path_buf(),
        None => input_dir.join(OUTPUT_DIR),
    };
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Cannot create {}", output_dir.display()))?;

    let total = files.len();
    let done = AtomicUsize::new(0);
    let failed: usize = files
        .par_iter()
        .map(|path| {
            let name = path.file_name().expect("Listing yields file names");
            let res = process_file(path, &output_dir.join(name), password);
            let n = done.fetch_add(1, Ordering::Relaxed) + 1;
            match res {
                Ok(()) => {
                    println!("[{n}/{total}] {}", name.to_string_lossy());
                    0
                }
                Err(err) => {
                    eprintln!("[{n}/{total}] {}: {err:#}", name.to_string_lossy());
                    1
                }
            }
        })
        .sum();

    println!(
        "Done: {} ok, {} failed, output in {}",
        total - failed,
        failed,
        output_dir.display(),
    );
    if failed == total {
        bail!("All {total} files failed");
    }
    Ok(())
}

fn process_file(input: &Path, output: &Path, password: &str) -> Result<(), Error> {
    let im = ImageReader::new(BufReader::new(
        File::open(input).with_context(|| format!("Cannot open {}", input.display()))?,
    ))
    .with_guessed_format()?
    .decode()
    .with_context(|| format!("Cannot decode {}", input.display()))?
    .into_rgb8();

    let (width, height) = im.dimensions();
    let arr = <ArrayView3<u8>>::from_shape((height as usize, width as usize, 3), im.as_raw())?;

    let out = transform(arr, password)?;

    save_buffer(
        output,
        out.as_slice().expect("Should be standard-layout"),
        width,
        height,
        ColorType::Rgb8,
    )
    .with_context(|| format!("Cannot write {}", output.display()))?;

    Ok(())
}
