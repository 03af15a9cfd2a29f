// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
//! `repr(C)` mirrors of the records declared in `delayimp.h`.
//!
//! These compile on every target so the hook logic can be exercised anywhere,
//! but only a Windows loader ever hands them out.
#![allow(non_snake_case)]

use std::{ffi, fmt, mem, ptr};

/// Nullable `FARPROC`. A module handle is returned to the loader by reinterpreting it as one.
pub type FarProc = Option<unsafe extern "system" fn() -> isize>;

/// Signature of `__pfnDliNotifyHook2` and `__pfnDliFailureHook2`.
pub type PfnDliHook = Option<unsafe extern "system" fn(u32, *mut DelayLoadInfo) -> FarProc>;

/// Relative virtual address into the image that owns the delay import.
pub type Rva = u32;

/// Reason code passed as the first argument of a delay-load hook.
///
/// The loader is foreign code, so any `u32` is representable; codes that are not
/// listed here simply never match.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Event(pub u32);

impl Event {
	/// Fired once before any work for a delay import is done.
	pub const START_PROCESSING: Self = Self(0);
	/// Fired right before the library named in `szDll` is located and loaded.
	pub const PRE_LOAD_LIBRARY: Self = Self(1);
	/// Fired right before the imported procedure is resolved.
	pub const PRE_GET_PROC_ADDRESS: Self = Self(2);
	/// `LoadLibrary` failed.
	pub const FAIL_LOAD_LIBRARY: Self = Self(3);
	/// `GetProcAddress` failed.
	pub const FAIL_GET_PROC: Self = Self(4);
	/// Fired after processing, whether it succeeded or not.
	pub const END_PROCESSING: Self = Self(5);

	#[inline]
	pub const fn code(self) -> u32 {
		self.0
	}

	const fn name(self) -> Option<&'static str> {
		Some(match self.0 {
			0 => "START_PROCESSING",
			1 => "PRE_LOAD_LIBRARY",
			2 => "PRE_GET_PROC_ADDRESS",
			3 => "FAIL_LOAD_LIBRARY",
			4 => "FAIL_GET_PROC",
			5 => "END_PROCESSING",
			_ => return None,
		})
	}
}

impl fmt::Debug for Event {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.name() {
			Some(name) => f.write_str(name),
			None => write!(f, "Event({})", self.0),
		}
	}
}

impl From<u32> for Event {
	#[inline]
	fn from(code: u32) -> Self {
		Self(code)
	}
}

/// `ImgDelayDescr`: one entry of the image's delay import directory.
#[derive(Debug)]
#[repr(C)]
pub struct ImgDelayDescr {
	pub grAttrs: u32,
	pub rvaDLLName: Rva,
	pub rvaHmod: Rva,
	pub rvaIAT: Rva,
	pub rvaINT: Rva,
	pub rvaBoundIAT: Rva,
	pub rvaUnloadIAT: Rva,
	pub dwTimeStamp: u32,
}

// only the loader reads this
#[allow(dead_code)]
#[derive(Clone, Copy)]
#[repr(C)]
union ProcId {
	szProcName: *const ffi::c_char,
	dwOrdinal: u32,
}

/// `DelayLoadProc`: the procedure being imported.
#[repr(C)]
pub struct DelayLoadProc {
	fImportByName: i32,
	id: ProcId,
}

impl DelayLoadProc {
	/// Whether the procedure is imported by name rather than by ordinal.
	#[inline]
	pub fn by_name(&self) -> bool {
		self.fImportByName != 0
	}
}

impl fmt::Debug for DelayLoadProc {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DelayLoadProc")
			.field("fImportByName", &self.fImportByName)
			.finish_non_exhaustive()
	}
}

/// `DelayLoadInfo`: the load request descriptor handed to every hook invocation.
///
/// Fields are private so that the name pointer can only come from the loader
/// (through [`dispatch`](crate::hook::dispatch)) or from one of the constructors.
///
/// ```compile_fail
/// let info = delay_hook::DelayLoadInfo {
///     szDll: 0x10 as *const std::ffi::c_char,
///     ..delay_hook::DelayLoadInfo::new(c"node.exe")
/// };
/// ```
#[derive(Debug)]
#[repr(C)]
pub struct DelayLoadInfo {
	/// size of this structure
	cb: u32,
	pidd: *const ImgDelayDescr,
	/// points to the IAT slot being bound
	ppfn: *mut FarProc,
	/// name of the library being loaded
	szDll: *const ffi::c_char,
	dlp: DelayLoadProc,
	hmodCur: *mut ffi::c_void,
	pfnCur: FarProc,
	dwLastError: u32,
}

impl DelayLoadInfo {
	/// A pre-load request for `dll`, as the loader would describe it before
	/// anything has been bound.
	#[inline]
	pub fn new(dll: &'static ffi::CStr) -> Self {
		// SAFETY: a `'static` C string outlives the descriptor.
		unsafe { Self::from_raw_name(dll.as_ptr()) }
	}

	/// Like [`new`](Self::new), but from a raw name pointer.
	///
	/// # Safety
	/// `dll` must be null or point to a NUL-terminated string that stays valid
	/// and unmodified for as long as the returned descriptor is used.
	pub unsafe fn from_raw_name(dll: *const ffi::c_char) -> Self {
		Self {
			cb: mem::size_of::<Self>() as u32,
			pidd: ptr::null(),
			ppfn: ptr::null_mut(),
			szDll: dll,
			dlp: DelayLoadProc {
				fImportByName: 0,
				id: ProcId { dwOrdinal: 0 },
			},
			hmodCur: ptr::null_mut(),
			pfnCur: None,
			dwLastError: 0,
		}
	}

	/// The requested library name, or `None` if the loader passed no name.
	#[inline]
	pub fn dll_name(&self) -> Option<&ffi::CStr> {
		if self.szDll.is_null() {
			None
		} else {
			// SAFETY: `szDll` is only ever set by the loader or by a constructor
			// whose contract keeps it valid.
			Some(unsafe { ffi::CStr::from_ptr(self.szDll) })
		}
	}

	/// The delay import descriptor being processed.
	#[inline]
	pub fn descriptor(&self) -> *const ImgDelayDescr {
		self.pidd
	}

	/// The import address table slot the loader is about to bind.
	#[inline]
	pub fn iat_slot(&self) -> *mut FarProc {
		self.ppfn
	}

	#[inline]
	pub fn procedure(&self) -> &DelayLoadProc {
		&self.dlp
	}

	/// The module handle loaded so far, null before `LoadLibrary` ran.
	#[inline]
	pub fn current_module(&self) -> *mut ffi::c_void {
		self.hmodCur
	}

	#[inline]
	pub fn current_proc(&self) -> FarProc {
		self.pfnCur
	}

	/// `GetLastError` after a failed load, only meaningful for failure events.
	#[inline]
	pub fn last_error(&self) -> u32 {
		self.dwLastError
	}
}
