//! Library for password-keyed, reversible visual scrambling of images.
//!
//! Given a password, [transform] relocates and conditionally transposes
//! the 8x8 pixel blocks of an image and recolors every pixel, such that:
//!
//! * No pixel is duplicated nor removed.
//! * The whole transform is an involution: applying it again with the
//!   same password restores the original exactly.
//! * Any partial-block border passes through untouched.
//!
//! This obscures an image against casual viewing while staying trivially
//! self-inverting for anyone who knows the password. It is a deterministic
//! permutation mask, not a cipher; do not rely on it for confidentiality.

// Copyright (C) 2023 Dheatly23
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Lesser General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Lesser General Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//

mod error;
mod permute;
mod scramble;

#[doc(inline)]
pub use crate::error::MaskError;
#[doc(inline)]
pub use crate::permute::swap_map;
#[doc(inline)]
pub use crate::scramble::{transform, transform_with_map, BLOCK};
