// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
//! Host-image redirection.
//!
//! Delay-load hooks run for every delay-imported library in a binary, so the
//! checks here reject unrelated events and names before any lookup is done.

use std::{ffi, mem, panic};

use crate::notify::{DelayLoadInfo, Event, FarProc};
use crate::os::{self, Module};

/// Compares library names the way `_stricmp` does in the default locale.
#[inline]
pub fn names_match(requested: &ffi::CStr, host: &ffi::CStr) -> bool {
	requested.to_bytes().eq_ignore_ascii_case(host.to_bytes())
}

/// Decides whether `requested` should resolve to the running image.
///
/// `lookup` is only consulted once `event` equals `trigger` and the requested
/// name matches `host`. A failed lookup declines, which lets the loader resolve
/// the name from disk.
pub fn redirect<F>(
	trigger: Event,
	event: Event,
	requested: &ffi::CStr,
	host: &ffi::CStr,
	lookup: F,
) -> Option<Module>
where
	F: FnOnce() -> Option<Module>,
{
	if event != trigger {
		return None;
	}
	if !names_match(requested, host) {
		return None;
	}
	let module = lookup();
	match module {
		Some(module) => log::trace!("redirecting `{}` to {module:?}", requested.to_string_lossy()),
		None => log::trace!("no image handle for `{}`", requested.to_string_lossy()),
	}
	module
}

/// Resolves the configured host binary to the running image on `PRE_LOAD_LIBRARY`.
#[inline]
pub fn resolve_host(event: Event, requested: &ffi::CStr) -> Option<Module> {
	redirect(Event::PRE_LOAD_LIBRARY, event, requested, crate::host_binary(), || {
		os::this_image().ok()
	})
}

/// Like [`resolve_host`], but answers `FAIL_LOAD_LIBRARY` instead.
#[inline]
pub fn resolve_host_on_failure(event: Event, requested: &ffi::CStr) -> Option<Module> {
	redirect(Event::FAIL_LOAD_LIBRARY, event, requested, crate::host_binary(), || {
		os::this_image().ok()
	})
}

/// Adapts a safe hook to the raw delay-load hook ABI.
///
/// A null `info` declines without calling `hook`. A panic in `hook` is logged
/// and declines, so unwinding never reaches the loader.
///
/// # Safety
/// `info` must be null or point to a `DelayLoadInfo` that stays valid for the
/// duration of the call, as the delay-load helper guarantees.
pub unsafe fn dispatch<F>(event: u32, info: *const DelayLoadInfo, hook: F) -> FarProc
where
	F: FnOnce(Event, &DelayLoadInfo) -> Option<Module>,
{
	let Some(info) = info.as_ref() else {
		return None;
	};
	let event = Event::from(event);
	match panic::catch_unwind(panic::AssertUnwindSafe(|| hook(event, info))) {
		Ok(module) => module.and_then(into_farproc),
		Err(_) => {
			log::error!("delay-load hook panicked during {event:?}");
			None
		}
	}
}

#[inline]
fn into_farproc(module: Module) -> FarProc {
	// SAFETY: `FarProc` is a nullable pointer; the loader treats it as an HMODULE
	// for library notifications and never calls it.
	unsafe { mem::transmute::<*mut ffi::c_void, FarProc>(module.as_ptr()) }
}

/// The hook registered by the `notify-hook` feature.
#[cfg_attr(feature = "notify-hook", crate::delay_hook)]
pub fn redirect_host(event: Event, info: &DelayLoadInfo) -> Option<Module> {
	resolve_host(event, info.dll_name()?)
}

/// The hook registered by the `failure-hook` feature.
#[cfg_attr(feature = "failure-hook", crate::delay_hook(kind = failure))]
pub fn redirect_host_on_failure(event: Event, info: &DelayLoadInfo) -> Option<Module> {
	resolve_host_on_failure(event, info.dll_name()?)
}
