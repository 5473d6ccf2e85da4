// src/cache.rs
// Bounded least-recently-used cache for rendered symbol chunks

use crate::symbol::MorseSymbol;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

pub type ChunkKey = Vec<MorseSymbol>;

/// Maps chunk contents to their rendered samples. Once `capacity` entries are
/// stored, inserting a new key evicts the least recently used one.
#[derive(Debug)]
pub struct ChunkCache {
    // Samples plus the stamp of their last use.
    entries: HashMap<ChunkKey, (Rc<[f64]>, u64)>,
    // Stamp -> key; the first entry is the least recently used.
    recency: BTreeMap<u64, ChunkKey>,
    clock: u64,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl ChunkCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: HashMap::with_capacity(capacity),
            recency: BTreeMap::new(),
            clock: 0,
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    pub fn get(&mut self, key: &[MorseSymbol]) -> Option<Rc<[f64]>> {
        let stamp = self.next_stamp();
        match self.entries.get_mut(key) {
            Some((samples, last_used)) => {
                let samples = Rc::clone(samples);
                if let Some(k) = self.recency.remove(&*last_used) {
                    self.recency.insert(stamp, k);
                }
                *last_used = stamp;
                self.hits += 1;
                Some(samples)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, key: ChunkKey, samples: Rc<[f64]>) {
        let stamp = self.next_stamp();
        if let Some((_, previous)) = self.entries.insert(key.clone(), (samples, stamp)) {
            self.recency.remove(&previous);
        }
        self.recency.insert(stamp, key);

        while self.entries.len() > self.capacity {
            match self.recency.pop_first() {
                Some((_, evicted)) => {
                    self.entries.remove(&evicted);
                    log::trace!("ChunkCache evicted chunk of {} symbols", evicted.len());
                }
                None => break,
            }
        }
    }

    pub fn contains(&self, key: &[MorseSymbol]) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    fn next_stamp(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }
}
