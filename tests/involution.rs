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

use ndarray::{s, Array3};
use proptest::prelude::*;

use cpmask::{swap_map, transform, BLOCK};

fn arb_password() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Z]{1,16}").unwrap()
}

/// Deterministic pseudo-random pixel fill, so failures shrink cleanly.
fn pixels(height: usize, width: usize, seed: u32) -> Array3<u8> {
    let mut state = seed;
    Array3::from_shape_fn((height, width, 3), |_| {
        state = state.wrapping_mul(1664525).wrapping_add(1013904223);
        (state >> 24) as u8
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn transform_twice_is_identity(
        password in arb_password(),
        height in 8usize..48,
        width in 8usize..48,
        seed in any::<u32>(),
    ) {
        let img = pixels(height, width, seed);
        let once = transform(img.view(), &password).unwrap();
        let twice = transform(once.view(), &password).unwrap();
        prop_assert_eq!(twice, img);
    }

    #[test]
    fn border_strip_is_untouched(
        password in arb_password(),
        height in 9usize..48,
        width in 9usize..48,
        seed in any::<u32>(),
    ) {
        let img = pixels(height, width, seed);
        let out = transform(img.view(), &password).unwrap();
        let (bh, bw) = ((height / BLOCK) * BLOCK, (width / BLOCK) * BLOCK);
        prop_assert_eq!(out.slice(s![bh.., .., ..]), img.slice(s![bh.., .., ..]));
        prop_assert_eq!(out.slice(s![.., bw.., ..]), img.slice(s![.., bw.., ..]));
    }

    #[test]
    fn swap_map_is_involutive_bijection(
        password in arb_password(),
        masu in 1usize..400,
    ) {
        let cpm = swap_map(&password, masu).unwrap();
        prop_assert_eq!(cpm.len(), masu);
        for (i, &j) in cpm.iter().enumerate() {
            prop_assert!(j < masu);
            prop_assert_eq!(cpm[j], i);
        }
    }
}
