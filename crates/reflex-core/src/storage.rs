//! Addresses of process-wide storage exposed by static fields and variables.
//!
//! A [`StaticAddress`] keeps the const/non-const distinction in its variant
//! instead of reinterpreting one pointer. Reads and writes are `unsafe`: the
//! database records where the storage lives, but concurrent access to the
//! storage itself is not synchronized and remains the caller's concern.

use std::ptr::NonNull;

use crate::{AccessError, TypeDesc};

/// Type-erased non-null address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawAddress(NonNull<u8>);

// SAFETY: the database only stores and hands out the address. Every
// dereference goes through an `unsafe` accessor whose contract puts
// synchronization on the caller.
unsafe impl Send for RawAddress {}
unsafe impl Sync for RawAddress {}

impl RawAddress {
    pub fn as_ptr(self) -> *mut u8 {
        self.0.as_ptr()
    }
}

/// Tagged address of static storage: writable or read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticAddress {
    Mutable(RawAddress),
    ReadOnly(RawAddress),
}

impl StaticAddress {
    /// Address of immutable static storage.
    pub fn read_only<T: 'static>(value: &'static T) -> Self {
        StaticAddress::ReadOnly(RawAddress(NonNull::from(value).cast()))
    }

    /// Address of writable static storage.
    ///
    /// Typically built from `&raw mut SOME_STATIC` or a leaked allocation.
    pub fn mutable<T>(ptr: NonNull<T>) -> Self {
        StaticAddress::Mutable(RawAddress(ptr.cast()))
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self, StaticAddress::ReadOnly(_))
    }

    /// Address for reading.
    pub fn as_ptr(&self) -> *const u8 {
        match self {
            StaticAddress::Mutable(raw) | StaticAddress::ReadOnly(raw) => raw.as_ptr(),
        }
    }

    /// Address for writing; `None` for read-only storage.
    pub fn as_mut_ptr(&self) -> Option<*mut u8> {
        match self {
            StaticAddress::Mutable(raw) => Some(raw.as_ptr()),
            StaticAddress::ReadOnly(_) => None,
        }
    }

    /// Shared reference to the value.
    ///
    /// # Safety
    ///
    /// The address must point to a live, initialized `T` (checked against
    /// `ty` when it carries a `TypeId`) and nothing may write to it while the
    /// reference is alive.
    pub unsafe fn get_ref<T: 'static>(&self, ty: &TypeDesc) -> Result<&'static T, AccessError> {
        ty.check::<T>()?;
        // SAFETY: upheld by the caller.
        Ok(unsafe { &*self.as_ptr().cast::<T>() })
    }

    /// Clone the value out.
    ///
    /// # Safety
    ///
    /// Same as [`StaticAddress::get_ref`].
    pub unsafe fn get<T: Clone + 'static>(&self, ty: &TypeDesc) -> Result<T, AccessError> {
        // SAFETY: upheld by the caller.
        unsafe { self.get_ref::<T>(ty) }.cloned()
    }

    /// Overwrite the value, dropping the previous one.
    ///
    /// `read_only` lets a descriptor flagged const refuse writes even through
    /// a mutable address.
    ///
    /// # Safety
    ///
    /// The address must point to a live, initialized `T` and no other access
    /// to it may happen concurrently.
    pub unsafe fn set<T: 'static>(
        &self,
        ty: &TypeDesc,
        name: &str,
        read_only: bool,
        value: T,
    ) -> Result<(), AccessError> {
        let ptr = match self.as_mut_ptr() {
            Some(ptr) if !read_only => ptr,
            _ => {
                return Err(AccessError::ReadOnly {
                    name: name.to_string(),
                });
            }
        };
        ty.check::<T>()?;
        // SAFETY: upheld by the caller.
        unsafe { *ptr.cast::<T>() = value };
        Ok(())
    }
}
