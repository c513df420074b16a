//! Packing of transposed Hilbert indices into a single integer.
//!
//! An interleaver for `(dimensions, bit_depth)` owns a routing table from
//! every output bit to its source word and bit. The table is built once and is
//! read-only afterwards, so one instance can be shared freely between threads.
//! [`InterleaverCache`] memoizes instances per key.

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, LazyLock, Mutex, PoisonError},
};

use arc_swap::ArcSwap;
use log::{debug, trace};
use num_bigint::BigUint;

use crate::ops::Axes;

/// Where one output bit comes from and where it lands.
#[derive(Clone, Copy, Debug)]
struct BitRoute {
    /// Index of the source word (dimension).
    from_word: usize,
    /// Bit offset within the source word.
    from_bit: u32,
    /// Destination byte in the packed output.
    to_byte: usize,
    /// Bit offset within the destination byte.
    to_bit: u32,
}

impl BitRoute {
    /// Read the routed bit from `words`. Missing words and out-of-range
    /// offsets read as zero.
    #[inline]
    fn read(&self, words: &[u32]) -> u8 {
        words
            .get(self.from_word)
            .and_then(|w| w.checked_shr(self.from_bit))
            .map_or(0, |w| (w & 1) as u8)
    }
}

/// Precomputed bit permutation between a transposed index and packed bytes.
#[derive(Debug)]
pub struct HilbertInterleaver {
    /// Number of words in the transposed form.
    dimensions: u32,
    /// Bits used from every word.
    bit_depth: u32,
    /// Whole bytes covered by the packed index.
    bytes_needed: usize,
    /// Routing table sorted by destination byte, then bit.
    routes: Box<[BitRoute]>,
}

impl HilbertInterleaver {
    /// Build the routing table for `dimensions` words of `bit_depth` bits.
    ///
    /// Zero dimensions or zero bits give an empty table; every index is then
    /// zero.
    pub fn new(dimensions: u32, bit_depth: u32) -> Self {
        let bits = dimensions as usize * bit_depth as usize;
        let mut routes = Vec::with_capacity(bits);
        for from_bit in 0..bit_depth {
            for from_word in (0..dimensions as usize).rev() {
                let target = routes.len();
                routes.push(BitRoute {
                    from_word,
                    from_bit,
                    to_byte: target >> 3,
                    to_bit: (target % 8) as u32,
                });
            }
        }
        routes.sort_by_key(|r| (r.to_byte, r.to_bit));
        Self {
            dimensions,
            bit_depth,
            bytes_needed: bits >> 3,
            routes: routes.into_boxed_slice(),
        }
    }

    /// Number of words in the transposed form.
    pub fn dimensions(&self) -> u32 {
        self.dimensions
    }

    /// Bits taken from every word.
    pub fn bit_depth(&self) -> u32 {
        self.bit_depth
    }

    /// Total bits in a packed index.
    pub fn bits(&self) -> usize {
        self.routes.len()
    }

    /// Whole bytes covered by a packed index.
    pub fn bytes_needed(&self) -> usize {
        self.bytes_needed
    }

    /// Pack `words` into little-endian bytes.
    ///
    /// The result holds `bytes_needed() + 1` bytes; the last one carries any
    /// leftover bits and is otherwise zero.
    pub fn interleave(&self, words: &[u32]) -> Vec<u8> {
        debug_assert_eq!(
            words.len(),
            self.dimensions as usize,
            "interleave expects one word per dimension"
        );
        let mut out = vec![0u8; self.bytes_needed + 1];
        let chunks = self.routes.chunks_exact(8);
        let rest = chunks.remainder();
        for (byte, r) in out.iter_mut().zip(chunks) {
            *byte = r[0].read(words)
                | r[1].read(words) << 1
                | r[2].read(words) << 2
                | r[3].read(words) << 3
                | r[4].read(words) << 4
                | r[5].read(words) << 5
                | r[6].read(words) << 6
                | r[7].read(words) << 7;
        }
        for r in rest {
            out[r.to_byte] |= r.read(words) << r.to_bit;
        }
        out
    }

    /// Reference packing: route every bit individually.
    pub fn interleave_unordered(&self, words: &[u32]) -> Vec<u8> {
        let mut out = vec![0u8; self.bytes_needed + 1];
        for r in &self.routes {
            out[r.to_byte] |= r.read(words) << r.to_bit;
        }
        out
    }

    /// Pack `words` into a Hilbert index.
    pub fn untranspose(&self, words: &[u32]) -> BigUint {
        BigUint::from_bytes_le(&self.interleave(words))
    }

    /// Unpack a Hilbert index into its transposed words. Bits of `index`
    /// beyond `bits()` are ignored.
    pub fn transpose(&self, index: &BigUint) -> Axes {
        let bytes = index.to_bytes_le();
        let mut words = Axes::from_elem(0, self.dimensions as usize);
        for r in &self.routes {
            let bit = bytes.get(r.to_byte).map_or(0, |b| u32::from(b >> r.to_bit) & 1);
            words[r.from_word] |= bit.checked_shl(r.from_bit).unwrap_or(0);
        }
        words
    }
}

impl fmt::Display for HilbertInterleaver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Interleaver for {} dimensions of {} bits each",
            self.dimensions, self.bit_depth
        )
    }
}

/// Interleavers by `(dimensions, bit_depth)`.
type Entries = HashMap<(u32, u32), Arc<HilbertInterleaver>>;

/// Get-or-add cache of interleavers keyed by `(dimensions, bit_depth)`.
///
/// Readers load the current snapshot without locking. Writers are serialized
/// and publish a new snapshot with the added entry. Concurrent first requests
/// for one key may each build a table, but exactly one is stored and returned
/// to every caller.
#[derive(Debug)]
pub struct InterleaverCache {
    /// Published snapshot of built interleavers.
    entries: ArcSwap<Entries>,
    /// Held while a new snapshot is assembled.
    writer: Mutex<()>,
}

impl Default for InterleaverCache {
    fn default() -> Self {
        Self::new()
    }
}

impl InterleaverCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: ArcSwap::from_pointee(Entries::new()),
            writer: Mutex::new(()),
        }
    }

    /// The process-wide cache used by the convenience constructors.
    pub fn global() -> &'static Self {
        /// Backing storage for [`InterleaverCache::global`].
        static GLOBAL: LazyLock<InterleaverCache> = LazyLock::new(InterleaverCache::new);
        &GLOBAL
    }

    /// Return the interleaver for `(dimensions, bit_depth)`, building it on
    /// first use.
    pub fn instance(&self, dimensions: u32, bit_depth: u32) -> Arc<HilbertInterleaver> {
        let key = (dimensions, bit_depth);
        if let Some(found) = self.entries.load().get(&key) {
            trace!("interleaver cache hit for {dimensions}x{bit_depth}");
            return Arc::clone(found);
        }

        let built = Arc::new(HilbertInterleaver::new(dimensions, bit_depth));
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let current = self.entries.load_full();
        if let Some(found) = current.get(&key) {
            return Arc::clone(found);
        }
        let mut next = Entries::clone(&current);
        next.insert(key, Arc::clone(&built));
        self.entries.store(Arc::new(next));
        debug!("built interleaver for {dimensions} dimensions of {bit_depth} bits");
        built
    }

    /// Number of cached interleavers.
    pub fn len(&self) -> usize {
        self.entries.load().len()
    }

    /// True when nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
