// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Non-elidable erasure of sensitive memory regions.
//!
//! An optimizing compiler may legally remove a zero-fill of a buffer it can
//! prove is never read again — which is exactly the common case when wiping
//! key material right before it goes out of scope. This crate pairs a bulk
//! zero store with a compiler-level barrier that presents the address as
//! observed, so dead-store elimination cannot remove the write.
//!
//! ## Scope of the guarantee
//!
//! The guarantee is compiler-level only. Nothing here protects against
//! copies the OS or hardware made before the call: swap, core dumps,
//! hibernation images, CPU registers, or cache remanence are all out of
//! scope. Callers must hold exclusive access to the region for the
//! duration of the call; there is no internal synchronization.
//!
//! On architectures where stable inline assembly is unavailable, the
//! barrier degrades to a volatile read plus a compiler fence. That path is
//! best-effort: it defeats every optimizer in practice but is not backed
//! by the same "memory clobbered" contract as the asm barrier.

#![cfg_attr(not(test), no_std)]

/// Overwrites `len` bytes starting at `ptr` with zero.
///
/// The zero store is followed by an optimization barrier, so the write
/// survives dead-store elimination even when the region is never read
/// afterwards. A `len` of zero is a no-op.
///
/// There is no error channel: an invalid region cannot be detected or
/// reported, only documented as caller error.
///
/// # Safety
///
/// `ptr` must be valid for writes of `len` bytes. The region must not be
/// accessed concurrently for the duration of the call.
#[inline(always)]
pub unsafe fn zeroize_ptr(ptr: *mut u8, len: usize) {
    if len == 0 {
        return;
    }

    unsafe {
        core::ptr::write_bytes(ptr, 0, len);
    }

    optimization_barrier(ptr);
}

/// Overwrites every byte of `slice` with zero, non-elidably.
///
/// Safe wrapper over [`zeroize_ptr`]: the slice is a borrowed mutable
/// view, so the region stays caller-owned and the validity precondition
/// holds by construction.
///
/// # Example
///
/// ```
/// use memwipe::{is_slice_zeroized, zeroize_slice};
///
/// let mut key = [0xFFu8; 32];
/// zeroize_slice(&mut key);
/// assert!(is_slice_zeroized(&key));
/// ```
#[inline(always)]
pub fn zeroize_slice(slice: &mut [u8]) {
    unsafe {
        zeroize_ptr(slice.as_mut_ptr(), slice.len());
    }
}

/// Forces the compiler to treat `ptr` as observed and memory as clobbered,
/// so the preceding zero store cannot be proven dead.
#[inline(always)]
fn optimization_barrier(ptr: *mut u8) {
    #[cfg(any(
        target_arch = "x86",
        target_arch = "x86_64",
        target_arch = "arm",
        target_arch = "aarch64",
        target_arch = "riscv32",
        target_arch = "riscv64",
        target_arch = "loongarch64",
    ))]
    unsafe {
        core::arch::asm!("/* {0} */", in(reg) ptr, options(nostack, preserves_flags));
    }

    #[cfg(not(any(
        target_arch = "x86",
        target_arch = "x86_64",
        target_arch = "arm",
        target_arch = "aarch64",
        target_arch = "riscv32",
        target_arch = "riscv64",
        target_arch = "loongarch64",
    )))]
    {
        // Degraded path, see crate docs: the volatile read keeps the store
        // observable and the fence keeps it ordered before later code.
        unsafe {
            core::ptr::read_volatile(ptr);
        }
        core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::SeqCst);
    }
}

/// Reports whether a region holds nothing but zero bytes.
///
/// This is the read-back check for a completed wipe; tests use it to
/// assert that no residue survived [`zeroize_slice`].
///
/// # Example
///
/// ```
/// use memwipe::is_slice_zeroized;
///
/// assert!(is_slice_zeroized(&[0u8; 10]));
/// assert!(!is_slice_zeroized(&[0u8, 1, 0, 0]));
/// ```
#[inline(always)]
pub fn is_slice_zeroized(slice: &[u8]) -> bool {
    slice.iter().all(|&b| b == 0)
}

/// Fills a byte slice with a repeating pattern byte.
///
/// Useful in tests for seeding buffers with a known non-zero sentinel
/// before wiping them.
///
/// # Example
///
/// ```
/// use memwipe::fill_bytes_with_pattern;
///
/// let mut buffer = [0u8; 8];
/// fill_bytes_with_pattern(&mut buffer, 0xAB);
/// assert!(buffer.iter().all(|&b| b == 0xAB));
/// ```
#[inline]
pub fn fill_bytes_with_pattern(slice: &mut [u8], pattern: u8) {
    for byte in slice.iter_mut() {
        *byte = pattern;
    }
}
