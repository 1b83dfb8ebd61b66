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

use crate::error::MaskError;

/// Fixed substitution table of the key schedule. Must never change:
/// it is baked into every image scrambled so far.
const SUBSTITUTION: &[u8; 26] = b"PWSUIHJTFEVBMCADYLONRGKXQZ";

/// Builds the position array: a bijection from slot index onto
/// `1..=masu`, seeded from the password by ping-pong linear probing.
///
/// Character offsets are taken by raw code-point subtraction and folded
/// with a euclidean `mod 26`, so non-letter characters still produce a
/// deterministic offset. Tightening this would orphan existing images.
fn position_array(password: &str, masu: usize) -> Vec<usize> {
    let offsets: Vec<i64> = password.chars().map(|c| c as i64 - 'A' as i64).collect();
    let pass_len = offsets.len();
    let m = masu as i64;

    let mut cpa = vec![0usize; masu];
    let mut a: i64 = -1;
    let mut b: i64 = 1;
    for cnt in 0..masu {
        let sub = SUBSTITUTION[offsets[cnt % pass_len].rem_euclid(26) as usize];
        let step = (sub - b'A' + 1) as i64 + pass_len as i64 + (masu % pass_len) as i64 + cnt as i64;
        a = (a + step).rem_euclid(m);
        while cpa[a as usize] != 0 {
            a = (a + m + b).rem_euclid(m);
        }
        cpa[a as usize] = cnt + 1;
        b = -b;
    }
    cpa
}

/// Derives the involutive block swap map for `password` over a grid of
/// `masu` blocks.
///
/// The result satisfies `cpm[cpm[i]] == i` for every index; when `masu`
/// is odd the middle assignment maps to itself. It depends only on
/// `(password, masu)`, so callers batching many images of the same
/// dimensions may compute it once and reuse it.
///
/// The password is uppercased before use. An empty password or a zero
/// block count is rejected.
pub fn swap_map(password: &str, masu: usize) -> Result<Vec<usize>, MaskError> {
    let password = password.to_uppercase();
    if password.is_empty() {
        return Err(MaskError::EmptyPassword);
    }
    if masu == 0 {
        return Err(MaskError::EmptyGrid);
    }

    let cpa = position_array(&password, masu);

    let mut cpm = vec![0usize; masu];
    for cnt in 0..(masu / 2 + masu % 2) {
        let idx_a = cpa[cnt] - 1;
        let idx_b = cpa[masu - 1 - cnt] - 1;
        cpm[idx_a] = idx_b;
        cpm[idx_b] = idx_a;
    }
    Ok(cpm)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PASSWORDS: &[&str] = &["A", "Z", "SAMPLE", "QWERTYUIOPASDFGH", "AB1!x"];

    #[test]
    fn sample_two_block_fixture() {
        // Pinned reference values for a 16x8 image under "SAMPLE".
        assert_eq!(position_array("SAMPLE", 2), [1, 2]);
        assert_eq!(swap_map("SAMPLE", 2).unwrap(), [1, 0]);
    }

    #[test]
    fn trivial_grid() {
        for pass in PASSWORDS {
            assert_eq!(position_array(&pass.to_uppercase(), 1), [1]);
            assert_eq!(swap_map(pass, 1).unwrap(), [0]);
        }
    }

    #[test]
    fn position_array_is_bijection() {
        for pass in PASSWORDS {
            for masu in [1, 2, 3, 7, 16, 100, 257] {
                let mut cpa = position_array(&pass.to_uppercase(), masu);
                cpa.sort_unstable();
                let expected: Vec<usize> = (1..=masu).collect();
                assert_eq!(cpa, expected, "password {pass:?}, masu {masu}");
            }
        }
    }

    #[test]
    fn swap_map_is_involution() {
        for pass in PASSWORDS {
            for masu in [1, 2, 3, 7, 16, 100, 257] {
                let cpm = swap_map(pass, masu).unwrap();
                for i in 0..masu {
                    assert!(cpm[i] < masu);
                    assert_eq!(cpm[cpm[i]], i, "password {pass:?}, masu {masu}, i {i}");
                }
            }
        }
    }

    #[test]
    fn password_material_changes_map() {
        let a = swap_map("A", 4).unwrap();
        let b = swap_map("B", 4).unwrap();
        assert_eq!(a, [3, 2, 1, 0]);
        assert_eq!(b, [1, 0, 3, 2]);
        assert_ne!(a, b);
    }

    #[test]
    fn lowercase_is_normalized() {
        assert_eq!(
            swap_map("sample", 24).unwrap(),
            swap_map("SAMPLE", 24).unwrap()
        );
    }

    #[test]
    fn rejects_empty_password() {
        assert!(matches!(swap_map("", 16), Err(MaskError::EmptyPassword)));
    }

    #[test]
    fn rejects_empty_grid() {
        assert!(matches!(swap_map("SAMPLE", 0), Err(MaskError::EmptyGrid)));
    }
}
