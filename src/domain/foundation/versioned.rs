//! Optimistic concurrency support for mutable aggregates.
//!
//! A store accepts an update only if the version it holds equals the
//! version the caller loaded, and then keeps the aggregate at the next
//! version. Two writers that loaded the same version cannot both win.

/// Aggregate that carries a store version.
pub trait Versioned: Clone {
    /// Version the aggregate was loaded at (0 for a never-stored one).
    fn version(&self) -> i64;

    /// Copy of the aggregate stamped with the following version.
    fn next_version(&self) -> Self;
}

/// Implements `Versioned` for an aggregate with a private `version: i64`.
macro_rules! impl_versioned {
    ($ty:ty) => {
        impl $crate::domain::foundation::Versioned for $ty {
            fn version(&self) -> i64 {
                self.version
            }

            fn next_version(&self) -> Self {
                let mut next = self.clone();
                next.version += 1;
                next
            }
        }
    };
}

pub(crate) use impl_versioned;
