// Copyright 2019 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

use super::consts::{BLOCK_SIZE_MAX, BLOCK_SIZE_MIN};
use std::convert::From;
use std::fmt::{Debug, Display, Formatter};

/// Type for interpreting `Block`, `Block2` and `Block1` option values.
///
/// The value packs `num << 4 | more << 3 | szx`, where the block size is `16 << szx`.
#[derive(Copy, Clone, Eq, Ord, Hash, PartialOrd, PartialEq)]
pub struct BlockInfo(pub u32);

impl BlockInfo {
    const MORE_FLAG: u32 = 0b1000;

    /// Maximum legal value for `num`.
    pub const NUM_MAX: u32 = ((1 << 20) - 1);

    const SZX_RESERVED: u8 = 0b0111;

    /// Maximum legal value for `szx`.
    pub const SZX_MAX: u8 = Self::SZX_RESERVED - 1;

    /// Constructs a new `BlockInfo` from the number, more flag, and size exponent.
    pub fn new(num: u32, m: bool, szx: u8) -> Option<BlockInfo> {
        if num > Self::NUM_MAX || szx > Self::SZX_MAX {
            None
        } else {
            Some(BlockInfo((num << 4) + ((m as u32) << 3) + szx as u32))
        }
    }

    /// Maps a requested block size to a size exponent.
    ///
    /// The size is clamped to `[16, 1024]` and then rounded down to a power of two. Returns
    /// the exponent along with the size it stands for.
    pub fn szx_for_size(size: u32) -> (u8, u32) {
        let clamped = size.max(BLOCK_SIZE_MIN).min(BLOCK_SIZE_MAX);
        let applied = 1u32 << (31 - clamped.leading_zeros());
        let szx = (applied.trailing_zeros() - BLOCK_SIZE_MIN.trailing_zeros()) as u8;
        (szx, applied)
    }

    /// Block number value.
    #[inline]
    pub fn num(&self) -> u32 {
        self.0 >> 4
    }

    /// More flag value. If set, there are more blocks to follow.
    #[inline]
    pub fn more_flag(&self) -> bool {
        (self.0 & Self::MORE_FLAG) == Self::MORE_FLAG
    }

    /// Block size exponent field value.
    #[inline]
    pub fn szx(&self) -> u8 {
        self.0 as u8 & 0b111
    }

    /// The length of this block, in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        1 << (self.szx() as usize + 4)
    }
}

impl From<u32> for BlockInfo {
    fn from(x: u32) -> Self {
        BlockInfo(x)
    }
}

impl Display for BlockInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(
            f,
            "{}{} ({} B/block)",
            self.num(),
            if self.more_flag() { "+" } else { "" },
            self.len()
        )
    }
}

impl Debug for BlockInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "BlockInfo(0x{:06X}: ", self.0)?;
        Display::fmt(self, f)?;
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields() {
        let block = BlockInfo::new(0, false, 6).unwrap();
        assert_eq!(false, block.more_flag());
        assert_eq!(6, block.szx());
        assert_eq!(0, block.num());
        assert_eq!(1024, block.len());
        assert_eq!(BlockInfo(6), block);
    }

    #[test]
    fn more_flag() {
        let block = BlockInfo::new(3, true, 2).unwrap();
        assert_eq!(true, block.more_flag());
        assert_eq!(3, block.num());
        assert_eq!(64, block.len());
        assert_eq!(0x3A, block.0);
        assert_eq!(false, BlockInfo::from(0x32).more_flag());
    }

    #[test]
    fn sizes() {
        assert_eq!((0, 16), BlockInfo::szx_for_size(16));
        assert_eq!((6, 1024), BlockInfo::szx_for_size(1024));
        assert_eq!((2, 64), BlockInfo::szx_for_size(100));
        assert_eq!((0, 16), BlockInfo::szx_for_size(5));
        assert_eq!((0, 16), BlockInfo::szx_for_size(0));
        assert_eq!((6, 1024), BlockInfo::szx_for_size(4096));
        assert_eq!((5, 512), BlockInfo::szx_for_size(1000));
    }

    #[test]
    fn display() {
        assert_eq!("3+ (64 B/block)", BlockInfo(0x3A).to_string());
        assert_eq!("0 (1024 B/block)", BlockInfo(6).to_string());
        assert_eq!("BlockInfo(0x00003A: 3+ (64 B/block))", format!("{:?}", BlockInfo(0x3A)));
    }

    #[test]
    fn out_of_range() {
        assert_eq!(None, BlockInfo::new(BlockInfo::NUM_MAX + 1, false, 0));
        assert_eq!(None, BlockInfo::new(0, false, 7));
        assert!(BlockInfo::new(BlockInfo::NUM_MAX, true, BlockInfo::SZX_MAX).is_some());
    }
}
