// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::iter::Map;

use bitvec::field::BitField;
use bitvec::prelude::*;
use funty::Integral;

/// Read each bit-slice of an iterator as an integer, so packed index fields can be
/// pulled out of a block with `bits.chunks_exact(n).unpack_le()`
pub trait Unpack: IntoIterator + Sized {
    fn unpack_le<V: Integral>(
        self,
    ) -> Map<<Self as IntoIterator>::IntoIter, fn(<Self as IntoIterator>::Item) -> V>;
}

impl<'a, T: BitStore, O: BitOrder, I> Unpack for I
where
    I: IntoIterator<Item = &'a BitSlice<T, O>>,
    BitSlice<T, O>: BitField,
{
    fn unpack_le<V: Integral>(
        self,
    ) -> Map<<Self as IntoIterator>::IntoIter, fn(<Self as IntoIterator>::Item) -> V> {
        self.into_iter().map(|b| b.load_le())
    }
}
