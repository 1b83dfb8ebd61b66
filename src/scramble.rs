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

use ndarray::parallel::prelude::*;
use ndarray::prelude::*;
use ndarray::Zip;

use crate::error::MaskError;
use crate::permute;

/// Side length of the atomic scrambling tile, in pixels.
pub const BLOCK: usize = 8;

/// Relocates 8x8 blocks of `src` into `dst` according to `cpm`.
///
/// Destination block `c` is filled from source block `cpm[c]`; when
/// `cpm[c] ^ c` is odd the block's two spatial axes are swapped.
/// `src` must be the untouched input snapshot, never an alias of `dst`.
fn scramble_blocks(
    src: ArrayView3<'_, u8>,
    mut dst: ArrayViewMut3<'_, u8>,
    x_blocks: usize,
    cpm: &[usize],
) {
    let channels = src.dim().2;

    Zip::indexed(dst.exact_chunks_mut((BLOCK, BLOCK, channels))).par_for_each(
        |(y_b, x_b, _), mut block| {
            let c = y_b * x_blocks + x_b;
            let s = cpm[c];
            let (row, col) = ((s / x_blocks) * BLOCK, (s % x_blocks) * BLOCK);
            let from = src.slice(s![row..row + BLOCK, col..col + BLOCK, ..]);

            if (s ^ c) & 1 == 1 {
                block.assign(&from.permuted_axes([1, 0, 2]));
            } else {
                block.assign(&from);
            }
        },
    );
}

/// Inverts every sample and swaps channels 1 and 2 of every pixel.
/// Both halves are involutions on their own.
fn recolor(mut area: ArrayViewMut3<'_, u8>) {
    area.par_mapv_inplace(|v| 255 - v);

    Zip::from(area.lanes_mut(Axis(2))).par_for_each(|mut px| px.swap(1, 2));
}

/// Applies the scrambling mask to a pixel buffer using a precomputed
/// swap map (see [`swap_map`](crate::swap_map)).
///
/// Lets batch callers reuse one map across images that share the same
/// password and block grid. `arr` is `(height, width, 3)`; `cpm` must
/// have one entry per 8x8 block of the cropped region.
///
/// # Panics
///
/// Panics if the channel count is not 3 or if `cpm` has the wrong
/// length for the buffer's block grid.
pub fn transform_with_map(arr: ArrayView3<'_, u8>, cpm: &[usize]) -> Array3<u8> {
    let (height, width, channels) = arr.dim();
    if channels != 3 {
        panic!("Pixel buffer must have 3 channels, got {channels}");
    }

    let (x_blocks, y_blocks) = (width / BLOCK, height / BLOCK);
    if cpm.len() != x_blocks * y_blocks {
        panic!(
            "Swap map length mismatch ({} != {} blocks)",
            cpm.len(),
            x_blocks * y_blocks,
        );
    }

    // Starting from a copy leaves the partial-block border untouched.
    let mut out = arr.to_owned();
    let mut area = out.slice_mut(s![..y_blocks * BLOCK, ..x_blocks * BLOCK, ..]);

    let src = arr.slice(s![..y_blocks * BLOCK, ..x_blocks * BLOCK, ..]);
    scramble_blocks(src, area.view_mut(), x_blocks, cpm);
    recolor(area);

    out
}

/// Scrambles (or restores) a pixel buffer with a password.
///
/// The transform is an involution: running it twice with the same
/// password reproduces the input byte-for-byte, so the same call serves
/// to obscure and to restore. Block relocation and recoloring cover the
/// largest 8x8-aligned region; any right/bottom border strip passes
/// through unchanged.
pub fn transform(arr: ArrayView3<'_, u8>, password: &str) -> Result<Array3<u8>, MaskError> {
    let (height, width, _) = arr.dim();
    let masu = (width / BLOCK) * (height / BLOCK);
    if masu == 0 {
        return Err(MaskError::ImageTooSmall { width, height });
    }

    let cpm = permute::swap_map(password, masu)?;
    Ok(transform_with_map(arr, &cpm))
}
