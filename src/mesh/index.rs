//! Handle types for mesh elements.
//!
//! Elements live in dense vectors and are referred to by their position.
//! Removing an element shifts every later element down by one, so a handle
//! is only meaningful until the next removal of an element of the same kind.

use std::fmt::{self, Debug};

/// A vertex handle.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct VertexId(u32);

/// A half-edge handle.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct HalfEdgeId(u32);

/// A full edge handle (a pair of symmetric half-edges).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct EdgeId(u32);

/// A face handle. In a navmesh every face is a triangle.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct FaceId(u32);

macro_rules! impl_handle {
    ($name:ident, $display:literal) => {
        impl $name {
            /// Create a handle from a dense index.
            #[inline]
            pub fn new(index: usize) -> Self {
                debug_assert!(index < u32::MAX as usize, "index {} too large", index);
                Self(index as u32)
            }

            /// Get the dense index.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// Handle shifted down by `n`, used when compacting storage.
            #[inline]
            pub(crate) fn shifted_down(self, n: usize) -> Self {
                Self(self.0 - n as u32)
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", $display, self.0)
            }
        }

        impl From<usize> for $name {
            fn from(v: usize) -> Self {
                Self::new(v)
            }
        }
    };
}

impl_handle!(VertexId, "V");
impl_handle!(HalfEdgeId, "HE");
impl_handle!(EdgeId, "E");
impl_handle!(FaceId, "F");

impl HalfEdgeId {
    /// The full edge this half-edge belongs to, for pairwise storage.
    #[inline]
    pub fn edge(self) -> EdgeId {
        EdgeId(self.0 >> 1)
    }

    /// The twin half-edge, for pairwise storage.
    #[inline]
    pub(crate) fn paired(self) -> HalfEdgeId {
        HalfEdgeId(self.0 ^ 1)
    }
}

impl EdgeId {
    /// The two half-edges of this edge, for pairwise storage.
    #[inline]
    pub fn halfedges(self) -> [HalfEdgeId; 2] {
        [HalfEdgeId(self.0 << 1), HalfEdgeId((self.0 << 1) | 1)]
    }
}
