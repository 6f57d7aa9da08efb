//! Fixed-capacity bump arena for expression nodes.
//!
//! The arena is a byte budget handed out sequentially: every allocation is
//! padded to its alignment and carved from the end of the used region, and
//! nothing is ever released individually. Nodes themselves live in an index
//! table, so children are referenced by [`ExprId`] rather than by pointer.
//! A parse resets the arena on entry, which makes the lifetime of every node
//! exactly one parse call.

use core::{alloc::Layout, fmt};

use crate::{Vec, parser::Expr};

/// Number of bytes one node takes out of the arena budget (before padding).
pub const NODE_SIZE: usize = core::mem::size_of::<Expr>();

/// A handle to an expression node stored in an [`Arena`].
///
/// Handles are 32-bit indices. They are only meaningful for the arena that
/// produced them, and only until that arena is reset.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprId(u32);

impl ExprId {
    /// Returns the raw index of this handle.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expr({})", self.0)
    }
}

/// The arena ran out of room for an allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("arena exhausted: requested {requested} bytes with {remaining} bytes remaining")]
pub struct ArenaExhausted {
    pub requested: usize,
    pub remaining: usize,
}

/// Bump allocator over a fixed byte budget.
///
/// Invariant: `used <= capacity`.
#[derive(Debug)]
pub struct Arena {
    capacity: usize,
    used: usize,
    nodes: Vec<Expr>,
}

impl Arena {
    /// Creates an arena that can hand out at most `capacity` bytes.
    ///
    /// Nothing is reserved up front; node storage grows as nodes are added.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            used: 0,
            nodes: Vec::new(),
        }
    }

    /// Reserves `size` bytes aligned to `align` and returns their offset.
    ///
    /// Returns `None` when the padded request does not fit in what is left.
    ///
    /// # Panics
    ///
    /// Panics if `align` is not a power of two.
    pub fn alloc_layout(&mut self, size: usize, align: usize) -> Option<usize> {
        assert!(
            align.is_power_of_two(),
            "arena alignment must be a power of two, got {align}"
        );

        let pad = self.used.wrapping_neg() & (align - 1);
        let end = self.used.checked_add(pad)?.checked_add(size)?;
        if end > self.capacity {
            return None;
        }

        let offset = self.used + pad;
        self.used = end;
        Some(offset)
    }

    /// Moves `expr` into the arena and returns its handle.
    pub fn alloc(&mut self, expr: Expr) -> Result<ExprId, ArenaExhausted> {
        let layout = Layout::new::<Expr>();
        let exhausted = ArenaExhausted {
            requested: layout.size(),
            remaining: self.remaining(),
        };

        let index = u32::try_from(self.nodes.len()).map_err(|_| exhausted)?;
        if self.alloc_layout(layout.size(), layout.align()).is_none() {
            return Err(exhausted);
        }

        tracing::trace!(index, used = self.used, "arena alloc {:?}", expr);
        self.nodes.push(expr);
        Ok(ExprId(index))
    }

    /// Gets the node behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if the handle was not produced by this arena since its last reset.
    #[must_use]
    pub fn get(&self, id: ExprId) -> &Expr {
        &self.nodes[id.0 as usize]
    }

    /// Discards every node and returns the whole budget.
    pub fn reset(&mut self) {
        self.used = 0;
        self.nodes.clear();
    }

    /// Returns the number of nodes in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the arena holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn used(&self) -> usize {
        self.used
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.capacity - self.used
    }
}
