// rename.rs - register renaming via a producer-tag alias table

use std::collections::HashMap;

/// Number of architectural registers visible to the renaming logic.
pub const NUM_ARCH_REGS: i32 = 128;

/// Whether a trace register id names a real architectural register.
/// Negative ids mean "no register"; ids past the register file are
/// tolerated and treated the same way.
pub fn is_architectural(reg: i32) -> bool {
    (0..NUM_ARCH_REGS).contains(&reg)
}

/// Register Alias Table mapping an architectural register to the tag of
/// its most recent in-flight producer. A register with no entry holds its
/// architecturally current value.
#[derive(Debug, Clone, Default)]
pub struct RegisterAliasTable {
    pub mapping: HashMap<i32, u64>,
}

impl RegisterAliasTable {
    pub fn new() -> Self {
        Self {
            mapping: HashMap::new(),
        }
    }

    /// Producer tag for a source register, or None when the value is
    /// architecturally current or the register id is out of range.
    pub fn producer(&self, reg: i32) -> Option<u64> {
        if is_architectural(reg) {
            self.mapping.get(&reg).copied()
        } else {
            None
        }
    }

    /// Install a new producer, overwriting any previous owner. Out-of-range
    /// destinations are ignored.
    pub fn install(&mut self, reg: i32, tag: u64) {
        if is_architectural(reg) {
            self.mapping.insert(reg, tag);
        }
    }

    /// Drop the mapping for a completing producer, but only if it still
    /// owns the register. A younger writer that overwrote the entry keeps
    /// its mapping.
    pub fn release(&mut self, reg: i32, tag: u64) {
        if let Some(&owner) = self.mapping.get(&reg) {
            if owner == tag {
                self.mapping.remove(&reg);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}
