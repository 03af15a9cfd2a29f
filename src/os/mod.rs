// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

#[cfg(unix)]
use unix as imp;
#[cfg(windows)]
use windows as imp;

use crate::Result;
use std::{ffi, fmt, ptr::NonNull};

/// Non-owning handle to a module resident in this process.
///
/// Handles produced here name the main executable, which is never unloaded,
/// so they are never closed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Module(NonNull<ffi::c_void>);

// the handle is an address of an image that outlives every thread
unsafe impl Send for Module {}
unsafe impl Sync for Module {}

impl Module {
	/// Wraps a raw handle, returning `None` for null.
	#[inline]
	pub fn from_raw(handle: *mut ffi::c_void) -> Option<Self> {
		NonNull::new(handle).map(Self)
	}

	#[inline]
	pub const fn as_ptr(self) -> *mut ffi::c_void {
		self.0.as_ptr()
	}
}

impl fmt::Debug for Module {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Module({:p})", self.0)
	}
}

/// Looks up the handle of the running executable image.
///
/// On Windows this is `GetModuleHandleW(NULL)`, which does not touch the module's
/// reference count. On unix targets it is `dlopen(NULL)`.
#[inline]
pub fn this_image() -> Result<Module> {
	#[cfg(any(unix, windows))]
	{
		unsafe { imp::image_this() }
	}
	#[cfg(not(any(unix, windows)))]
	{
		Err(crate::Error::Unsupported)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn this_image_is_stable() {
		let first = this_image().unwrap();
		let second = this_image().unwrap();
		assert_eq!(first, second);
		assert!(!first.as_ptr().is_null());
	}

	#[test]
	fn from_raw_rejects_null() {
		assert!(Module::from_raw(std::ptr::null_mut()).is_none());
	}
}
