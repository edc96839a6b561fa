//! Access to the guest's linear memory.
//!
//! Every guest pointer is a `u32` offset. All accesses are bounds-checked
//! against the current length of the memory; nothing here can read or write
//! outside of it.
//!
//! The embedder owns the decision of what backs the memory (see
//! [`GuestMemory`]). Because a guest may grow its memory at any time, which
//! can move the backing buffer, the [`MemoryAccessor`] re-validates its cached
//! view before each access and can be told explicitly via
//! [`MemoryAccessor::invalidate`].

use std::{fmt, marker::PhantomData};

use memfs_wasi_types::ValueType;
use thiserror::Error;
use tracing::trace;

/// Size of a WebAssembly page.
pub const WASM_PAGE_SIZE: usize = 0x10000;

#[derive(Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum MemoryAccessError {
    /// The access would read or write out of bounds.
    #[error("out of bounds")]
    HeapOutOfBounds,
    /// Address calculation overflow.
    #[error("address calculation overflow")]
    Overflow,
    /// String is not valid UTF-8.
    #[error("string is not valid utf-8")]
    NonUtf8String,
    /// No memory has been attached to the environment yet.
    #[error("no guest memory attached")]
    Unavailable,
}

/// A guest linear memory.
///
/// Implementations must bump [`generation`](GuestMemory::generation)
/// whenever the backing buffer is grown or reallocated.
pub trait GuestMemory: Send {
    fn generation(&self) -> u64;
    fn data(&self) -> &[u8];
    fn data_mut(&mut self) -> &mut [u8];

    /// Grows the memory by `delta` pages, returning the previous size in
    /// pages, or `None` if this memory cannot grow from the host side.
    fn grow(&mut self, delta: u32) -> Option<u32> {
        let _ = delta;
        None
    }
}

/// A linear memory backed by a `Vec<u8>`, grown a page at a time.
#[derive(Debug, Clone, Default)]
pub struct VecMemory {
    data: Vec<u8>,
    generation: u64,
}

impl VecMemory {
    pub fn new(pages: u32) -> Self {
        Self {
            data: vec![0; pages as usize * WASM_PAGE_SIZE],
            generation: 0,
        }
    }

    pub fn pages(&self) -> u32 {
        (self.data.len() / WASM_PAGE_SIZE) as u32
    }
}

impl GuestMemory for VecMemory {
    fn generation(&self) -> u64 {
        self.generation
    }

    fn data(&self) -> &[u8] {
        &self.data
    }

    fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    fn grow(&mut self, delta: u32) -> Option<u32> {
        let previous = self.pages();
        if delta > 0 {
            // a fresh allocation, the way an engine may move a grown memory
            let mut data = vec![0; self.data.len() + delta as usize * WASM_PAGE_SIZE];
            data[..self.data.len()].copy_from_slice(&self.data);
            self.data = data;
            self.generation += 1;
        }
        Some(previous)
    }
}

/// Caches the shape of the attached memory and hands out views over it.
#[derive(Default)]
pub struct MemoryAccessor {
    memory: Option<Box<dyn GuestMemory>>,
    /// `(generation, length)` of the memory as last observed.
    cached: Option<(u64, usize)>,
}

impl fmt::Debug for MemoryAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryAccessor")
            .field("attached", &self.memory.is_some())
            .field("cached", &self.cached)
            .finish()
    }
}

impl MemoryAccessor {
    pub fn new(memory: impl GuestMemory + 'static) -> Self {
        Self {
            memory: Some(Box::new(memory)),
            cached: None,
        }
    }

    pub fn attach(&mut self, memory: impl GuestMemory + 'static) {
        self.memory = Some(Box::new(memory));
        self.cached = None;
    }

    pub fn is_attached(&self) -> bool {
        self.memory.is_some()
    }

    /// Drops the cached view; the next access re-acquires it.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Length of the memory as of the last access, if still current.
    pub fn cached_len(&self) -> Option<usize> {
        self.cached.map(|(_, len)| len)
    }

    pub fn memory(&self) -> Option<&dyn GuestMemory> {
        self.memory.as_deref()
    }

    pub fn memory_mut(&mut self) -> Option<&mut (dyn GuestMemory + 'static)> {
        self.memory.as_deref_mut()
    }

    /// A view over the memory, re-acquired if the memory has changed shape
    /// since the last access.
    pub fn view(&mut self) -> Result<MemoryView<'_>, MemoryAccessError> {
        let memory = self
            .memory
            .as_deref_mut()
            .ok_or(MemoryAccessError::Unavailable)?;
        let generation = memory.generation();
        let data = memory.data_mut();
        if self.cached != Some((generation, data.len())) {
            trace!(generation, len = data.len(), "acquired guest memory view");
            self.cached = Some((generation, data.len()));
        }
        Ok(MemoryView { data })
    }
}

/// A bounds-checked window onto guest memory for the duration of one call.
pub struct MemoryView<'a> {
    data: &'a mut [u8],
}

impl<'a> MemoryView<'a> {
    pub fn new(data: &'a mut [u8]) -> Self {
        Self { data }
    }

    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn range(&self, offset: u32, len: u64) -> Result<std::ops::Range<usize>, MemoryAccessError> {
        let end = (offset as u64)
            .checked_add(len)
            .ok_or(MemoryAccessError::Overflow)?;
        if end > self.len() {
            return Err(MemoryAccessError::HeapOutOfBounds);
        }
        Ok(offset as usize..end as usize)
    }

    pub fn read_bytes(&self, offset: u32, len: u32) -> Result<&[u8], MemoryAccessError> {
        let range = self.range(offset, len as u64)?;
        Ok(&self.data[range])
    }

    pub fn slice_mut(&mut self, offset: u32, len: u32) -> Result<&mut [u8], MemoryAccessError> {
        let range = self.range(offset, len as u64)?;
        Ok(&mut self.data[range])
    }

    pub fn write_bytes(&mut self, offset: u32, bytes: &[u8]) -> Result<(), MemoryAccessError> {
        let range = self.range(offset, bytes.len() as u64)?;
        self.data[range].copy_from_slice(bytes);
        Ok(())
    }

    pub fn read_utf8(&self, offset: u32, len: u32) -> Result<String, MemoryAccessError> {
        let bytes = self.read_bytes(offset, len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| MemoryAccessError::NonUtf8String)
    }
}

/// A typed pointer into guest memory.
#[repr(transparent)]
pub struct WasmPtr<T> {
    offset: u32,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> Clone for WasmPtr<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for WasmPtr<T> {}

impl<T> PartialEq for WasmPtr<T> {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset
    }
}

impl<T> Eq for WasmPtr<T> {}

impl<T> fmt::Debug for WasmPtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WasmPtr({:#x})", self.offset)
    }
}

impl<T> WasmPtr<T> {
    pub fn new(offset: u32) -> Self {
        Self {
            offset,
            _phantom: PhantomData,
        }
    }

    pub fn offset(self) -> u32 {
        self.offset
    }

    pub fn is_null(self) -> bool {
        self.offset == 0
    }

    /// Reinterprets the pointer as pointing to a `U`.
    pub fn cast<U>(self) -> WasmPtr<U> {
        WasmPtr::new(self.offset)
    }
}

impl<T: ValueType> WasmPtr<T> {
    /// The pointer `count` elements further on.
    pub fn add(self, count: u32) -> Result<Self, MemoryAccessError> {
        let delta = count
            .checked_mul(T::SIZE as u32)
            .ok_or(MemoryAccessError::Overflow)?;
        let offset = self
            .offset
            .checked_add(delta)
            .ok_or(MemoryAccessError::Overflow)?;
        Ok(Self::new(offset))
    }

    pub fn read(self, memory: &MemoryView<'_>) -> Result<T, MemoryAccessError> {
        let bytes = memory.read_bytes(self.offset, T::SIZE as u32)?;
        Ok(T::read_from(bytes))
    }

    pub fn write(self, memory: &mut MemoryView<'_>, value: T) -> Result<(), MemoryAccessError> {
        let bytes = memory.slice_mut(self.offset, T::SIZE as u32)?;
        value.write_to(bytes);
        Ok(())
    }

    /// Reads `len` consecutive values.
    pub fn read_array(
        self,
        memory: &MemoryView<'_>,
        len: u32,
    ) -> Result<Vec<T>, MemoryAccessError> {
        let total = len
            .checked_mul(T::SIZE as u32)
            .ok_or(MemoryAccessError::Overflow)?;
        let bytes = memory.read_bytes(self.offset, total)?;
        Ok(bytes.chunks_exact(T::SIZE).map(T::read_from).collect())
    }
}
