//! Fixed-capacity descriptor chain
//!
//! Descriptors are stored in an array and linked by explicit next indices.
//! The head is slot 0 and each pushed descriptor is linked after the
//! previous tail, so the in-memory chain is always a line; whatever the
//! hardware should see after the tail (a ring back to the head, or a
//! self-referencing terminal) lives only in the tail's next-pointer field.

use super::Descriptor;
use crate::driver::error::{ChainError, ChainResult};
use crate::internal::constants::DESCRIPTOR_SIZE;

/// What the tail descriptor's hardware next-pointer refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TailLink {
    /// Point back at the head, forming a ring
    Ring,
    /// Point at the tail itself, signalling no next descriptor
    SelfLoop,
}

/// Ordered chain of up to `N` descriptors
///
/// # Example
///
/// ```ignore
/// let mut chain: DescriptorChain<3> = DescriptorChain::new();
/// for i in 0..3 {
///     chain.push(Descriptor::segment(0x8000_0000 + i * 0x400, 1024)?)?;
/// }
/// chain.link_contiguous(0x2_0000, TailLink::SelfLoop)?;
/// chain.mark_frame()?;
/// ```
#[derive(Debug, Clone)]
pub struct DescriptorChain<const N: usize> {
    nodes: [Descriptor; N],
    links: [Option<usize>; N],
    len: usize,
}

impl<const N: usize> Default for DescriptorChain<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> DescriptorChain<N> {
    /// Create an empty chain
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: [Descriptor::new(); N],
            links: [None; N],
            len: 0,
        }
    }

    /// Maximum number of descriptors
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of descriptors in the chain
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True when the chain holds no descriptors
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index of the head descriptor
    #[inline]
    pub const fn head(&self) -> Option<usize> {
        if self.len == 0 { None } else { Some(0) }
    }

    /// Index of the tail descriptor
    #[inline]
    pub const fn tail(&self) -> Option<usize> {
        if self.len == 0 {
            None
        } else {
            Some(self.len - 1)
        }
    }

    /// Append a descriptor after the current tail, returning its index
    pub fn push(&mut self, descriptor: Descriptor) -> ChainResult<usize> {
        if self.len == N {
            return Err(ChainError::Full);
        }
        let index = self.len;
        self.nodes[index] = descriptor;
        self.links[index] = None;
        if let Some(prev) = index.checked_sub(1) {
            self.links[prev] = Some(index);
        }
        self.len += 1;
        Ok(index)
    }

    /// Remove every descriptor
    pub fn clear(&mut self) {
        self.links = [None; N];
        self.len = 0;
    }

    /// Descriptor at `index`
    pub fn get(&self, index: usize) -> Option<&Descriptor> {
        self.nodes[..self.len].get(index)
    }

    /// Mutable descriptor at `index`
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Descriptor> {
        self.nodes[..self.len].get_mut(index)
    }

    /// In-memory successor of `index`; `None` for the tail
    pub fn next_index(&self, index: usize) -> Option<usize> {
        if index < self.len {
            self.links[index]
        } else {
            None
        }
    }

    /// Walk the chain from the head along its next links
    pub fn iter(&self) -> ChainIter<'_, N> {
        ChainIter {
            chain: self,
            cursor: self.head(),
            remaining: self.len,
        }
    }

    /// Device-memory address of the tail when laid out contiguously at `base`
    pub const fn tail_address(&self, base: u64) -> Option<u64> {
        match self.tail() {
            Some(tail) => Some(base + (tail * DESCRIPTOR_SIZE) as u64),
            None => None,
        }
    }

    /// Lay the chain out contiguously at `base` and set every next-pointer
    ///
    /// Descriptor `i` in traversal order is placed at `base + i * 64`; each
    /// next-pointer refers to its successor and the tail's refers to the head
    /// or to itself according to `tail_link`.
    pub fn link_contiguous(&mut self, base: u64, tail_link: TailLink) -> ChainResult<()> {
        if self.is_empty() {
            return Err(ChainError::Empty);
        }
        if base % DESCRIPTOR_SIZE as u64 != 0 {
            return Err(ChainError::UnalignedAddress);
        }

        let mut cursor = self.head();
        let mut position = 0u64;
        while let Some(index) = cursor {
            let address = base + position * DESCRIPTOR_SIZE as u64;
            let next = match self.links[index] {
                Some(_) => address + DESCRIPTOR_SIZE as u64,
                None => match tail_link {
                    TailLink::Ring => base,
                    TailLink::SelfLoop => address,
                },
            };
            self.nodes[index].set_next_address(next);
            cursor = self.links[index];
            position += 1;
        }
        Ok(())
    }

    /// Set start-of-frame on the head and end-of-frame on the tail
    pub fn mark_frame(&mut self) -> ChainResult<()> {
        let (Some(head), Some(tail)) = (self.head(), self.tail()) else {
            return Err(ChainError::Empty);
        };
        self.nodes[head].set_sof(true);
        self.nodes[tail].set_eof(true);
        Ok(())
    }
}

/// Iterator over a chain in traversal order, yielding `(index, descriptor)`
pub struct ChainIter<'a, const N: usize> {
    chain: &'a DescriptorChain<N>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, const N: usize> Iterator for ChainIter<'a, N> {
    type Item = (usize, &'a Descriptor);

    fn next(&mut self) -> Option<Self::Item> {
        // Bounded by len so a corrupted link can never loop
        if self.remaining == 0 {
            return None;
        }
        let index = self.cursor?;
        self.remaining -= 1;
        self.cursor = self.chain.next_index(index);
        Some((index, &self.chain.nodes[index]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::vec::Vec;

    use super::*;

    fn three_segment_chain() -> DescriptorChain<4> {
        let mut chain = DescriptorChain::new();
        for i in 0..3u64 {
            chain
                .push(Descriptor::segment(0x8000_0000 + i * 0x400, 1024).unwrap())
                .unwrap();
        }
        chain
    }

    #[test]
    fn new_chain_is_empty() {
        let chain: DescriptorChain<8> = DescriptorChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.capacity(), 8);
        assert_eq!(chain.head(), None);
        assert_eq!(chain.tail(), None);
        assert_eq!(chain.iter().count(), 0);
        assert_eq!(chain.tail_address(0x2_0000), None);
    }

    #[test]
    fn push_links_after_tail() {
        let chain = three_segment_chain();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.head(), Some(0));
        assert_eq!(chain.tail(), Some(2));
        assert_eq!(chain.next_index(0), Some(1));
        assert_eq!(chain.next_index(1), Some(2));
        assert_eq!(chain.next_index(2), None);
        assert_eq!(chain.next_index(3), None);
    }

    #[test]
    fn push_rejects_when_full() {
        let mut chain: DescriptorChain<1> = DescriptorChain::new();
        assert_eq!(chain.push(Descriptor::new()), Ok(0));
        assert_eq!(chain.push(Descriptor::new()), Err(ChainError::Full));
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn iter_follows_links_in_order() {
        let chain = three_segment_chain();
        let buffers: Vec<u64> = chain.iter().map(|(_, d)| d.buffer_address()).collect();
        assert_eq!(buffers, [0x8000_0000, 0x8000_0400, 0x8000_0800]);
        let indices: Vec<usize> = chain.iter().map(|(i, _)| i).collect();
        assert_eq!(indices, [0, 1, 2]);
    }

    #[test]
    fn get_is_bounded_by_len() {
        let mut chain = three_segment_chain();
        assert!(chain.get(2).is_some());
        assert!(chain.get(3).is_none());
        chain.get_mut(1).unwrap().set_app(0, 7);
        assert_eq!(chain.get(1).unwrap().app(0), Some(7));
    }

    #[test]
    fn clear_empties_chain() {
        let mut chain = three_segment_chain();
        chain.clear();
        assert!(chain.is_empty());
        assert_eq!(chain.push(Descriptor::new()), Ok(0));
        assert_eq!(chain.next_index(0), None);
    }

    #[test]
    fn link_contiguous_self_loop() {
        let mut chain = three_segment_chain();
        chain.link_contiguous(0x2_0000, TailLink::SelfLoop).unwrap();
        let next: Vec<u64> = chain.iter().map(|(_, d)| d.next_address()).collect();
        assert_eq!(next, [0x2_0040, 0x2_0080, 0x2_0080]);
        assert_eq!(chain.tail_address(0x2_0000), Some(0x2_0080));
    }

    #[test]
    fn link_contiguous_ring() {
        let mut chain = three_segment_chain();
        chain.link_contiguous(0x2_0000, TailLink::Ring).unwrap();
        assert_eq!(chain.get(2).unwrap().next_address(), 0x2_0000);
    }

    #[test]
    fn link_contiguous_validates() {
        let mut empty: DescriptorChain<2> = DescriptorChain::new();
        assert_eq!(
            empty.link_contiguous(0x2_0000, TailLink::Ring),
            Err(ChainError::Empty)
        );
        let mut chain = three_segment_chain();
        assert_eq!(
            chain.link_contiguous(0x2_0010, TailLink::Ring),
            Err(ChainError::UnalignedAddress)
        );
    }

    #[test]
    fn mark_frame_sets_sof_and_eof() {
        let mut chain = three_segment_chain();
        chain.mark_frame().unwrap();
        assert!(chain.get(0).unwrap().is_sof());
        assert!(!chain.get(0).unwrap().is_eof());
        assert!(!chain.get(1).unwrap().is_sof());
        assert!(!chain.get(1).unwrap().is_eof());
        assert!(chain.get(2).unwrap().is_eof());

        let mut single: DescriptorChain<1> = DescriptorChain::new();
        single.push(Descriptor::new()).unwrap();
        single.mark_frame().unwrap();
        assert!(single.get(0).unwrap().is_sof() && single.get(0).unwrap().is_eof());

        let mut empty: DescriptorChain<1> = DescriptorChain::new();
        assert_eq!(empty.mark_frame(), Err(ChainError::Empty));
    }
}
