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

use thiserror::Error;

/// Errors produced by the scrambling core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MaskError {
    #[error("Password is empty after normalization")]
    EmptyPassword,

    #[error("Block grid is empty: need at least one 8x8 block")]
    EmptyGrid,

    #[error("Image {width}x{height} is smaller than one 8x8 block")]
    ImageTooSmall { width: usize, height: usize },
}
