//! Append-only opcode log backed by a flat float buffer.

use super::{Opcode, OpcodeType};
use crate::error::{MeshGenError, Result};

/// Append-only `f32` buffer holding opcode arguments.
///
/// Vectors and colors occupy consecutive slots; integers are stored
/// truncated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataStore {
    values: Vec<f32>,
}

impl DataStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no slot was written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns all slots.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Returns `len` slots starting at `offset`, if they exist.
    pub fn get(&self, offset: usize, len: usize) -> Option<&[f32]> {
        self.values.get(offset..offset.checked_add(len)?)
    }

    /// Appends slots and returns the offset of the first one.
    pub fn extend(&mut self, slots: &[f32]) -> usize {
        let offset = self.values.len();
        self.values.extend_from_slice(slots);
        offset
    }

    /// Drops every slot.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

/// One recorded instruction: its type and where its arguments start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeEntry {
    /// Opcode type.
    pub op_type: OpcodeType,
    /// Index of the first argument slot in the [`DataStore`].
    pub offset: usize,
}

/// Serializable history of mutating calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpcodeLog {
    data: DataStore,
    entries: Vec<OpcodeEntry>,
}

impl OpcodeLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded opcodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the recorded entries in order.
    #[inline]
    pub fn entries(&self) -> &[OpcodeEntry] {
        &self.entries
    }

    /// Returns the argument buffer.
    #[inline]
    pub fn data(&self) -> &DataStore {
        &self.data
    }

    /// Appends an opcode.
    pub fn record(&mut self, opcode: &Opcode) -> OpcodeEntry {
        let mut slots = Vec::with_capacity(opcode.op_type().spec().slot_count());
        opcode.encode(&mut slots);
        self.push_raw(opcode.op_type(), &slots)
    }

    /// Appends an entry whose slots were produced elsewhere, such as a
    /// script parser. The caller is responsible for the slot count.
    pub fn push_raw(&mut self, op_type: OpcodeType, slots: &[f32]) -> OpcodeEntry {
        let entry = OpcodeEntry {
            op_type,
            offset: self.data.extend(slots),
        };
        self.entries.push(entry);
        entry
    }

    /// Returns the argument slots of an entry, sized by the catalog.
    pub fn get_data(&self, entry: &OpcodeEntry) -> Result<&[f32]> {
        self.data
            .get(entry.offset, entry.op_type.spec().slot_count())
            .ok_or(MeshGenError::InvalidOpcode {
                type_id: entry.op_type.id(),
                offset: entry.offset,
            })
    }

    /// Decodes an entry back into an opcode.
    pub fn decode(&self, entry: &OpcodeEntry) -> Result<Opcode> {
        let slots = self.get_data(entry)?;
        Opcode::decode(entry.op_type, slots).ok_or(MeshGenError::InvalidOpcode {
            type_id: entry.op_type.id(),
            offset: entry.offset,
        })
    }

    /// Decodes the opcode at `index`.
    pub fn get(&self, index: usize) -> Option<Result<Opcode>> {
        self.entries.get(index).map(|entry| self.decode(entry))
    }

    /// Decodes every entry in order.
    pub fn iter(&self) -> impl Iterator<Item = Result<Opcode>> + '_ {
        self.entries.iter().map(move |entry| self.decode(entry))
    }

    /// Empties the log and its data.
    pub fn clear(&mut self) {
        self.data.clear();
        self.entries.clear();
    }
}
