// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
//! Delay-load notification hook for native addons loaded into a renamed host.
//!
//! Addons built against a host executable (`node.exe` by default) delay-import
//! it by file name. If the host has been renamed, the loader would go looking
//! for a file that does not exist. Linking this crate into the addon registers
//! a hook that answers the pre-load notification for the host's name with the
//! handle of the running process image instead.
//!
//! The hook is exported as `__pfnDliNotifyHook2` on Windows targets when the
//! `notify-hook` feature is enabled (the default). Other targets compile the
//! same logic but export nothing.
//!
//! The host name is baked in at build time from the `DELAY_HOOK_HOST_BINARY`
//! environment variable and can be replaced during module initialisation with
//! [`set_host_binary`].
//!
//! Custom hooks can be registered with the [`delay_hook`](macro@delay_hook) attribute.
//! The notify slot is taken by the built-in hook unless `notify-hook` is
//! disabled, so this one goes into the failure slot:
//!
//! ```no_run
//! use delay_hook::{delay_hook, DelayLoadInfo, Event, Module};
//!
//! #[delay_hook(kind = failure)]
//! fn retry_as_self(event: Event, info: &DelayLoadInfo) -> Option<Module> {
//!     delay_hook::resolve_host_on_failure(event, info.dll_name()?)
//! }
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::missing_safety_doc)]

// lets `#[delay_hook]` expand to `::delay_hook::...` inside this crate too.
extern crate self as delay_hook;

use std::{
	ffi,
	sync::atomic::{AtomicPtr, Ordering},
};

pub mod error;
pub mod hook;
pub mod notify;
pub mod os;

pub use delay_hook_macro::delay_hook;
pub use error::Error;
pub use hook::{dispatch, redirect, resolve_host, resolve_host_on_failure};
pub use notify::{DelayLoadInfo, Event, FarProc, PfnDliHook};
pub use os::{this_image, Module};

/// The result of a delay_hook function
pub type Result<T> = std::result::Result<T, Error>;

/// Host executable name baked in from `DELAY_HOOK_HOST_BINARY` at build time.
pub const DEFAULT_HOST_BINARY: &ffi::CStr =
	match ffi::CStr::from_bytes_with_nul(concat!(env!("DELAY_HOOK_HOST_BINARY"), "\0").as_bytes()) {
		Ok(name) => name,
		Err(_) => panic!("DELAY_HOOK_HOST_BINARY contains a NUL byte"),
	};

/// Null until [`set_host_binary`] is called.
static HOST_BINARY: AtomicPtr<ffi::c_char> = AtomicPtr::new(std::ptr::null_mut());

/// Replaces the host executable name the hook redirects.
///
/// This is meant to be called from module initialisation, before the first
/// delay-imported symbol of the host is used. The name is compared
/// case-insensitively and must be a bare file name such as `"electron.exe"`.
pub fn set_host_binary(name: &'static ffi::CStr) -> Result<()> {
	let bytes = name.to_bytes();
	if bytes.is_empty() {
		return Err(Error::EmptyHostName);
	}
	if bytes.iter().any(|b| matches!(b, b'/' | b'\\')) {
		return Err(Error::HostNameHasPath(name.to_string_lossy().into_owned()));
	}
	HOST_BINARY.store(name.as_ptr().cast_mut(), Ordering::Release);
	log::debug!("delay-load host binary set to `{}`", name.to_string_lossy());
	Ok(())
}

/// The host executable name currently redirected by the hook.
#[inline]
pub fn host_binary() -> &'static ffi::CStr {
	let ptr = HOST_BINARY.load(Ordering::Acquire);
	if ptr.is_null() {
		DEFAULT_HOST_BINARY
	} else {
		// SAFETY: only `&'static CStr` pointers are ever stored.
		unsafe { ffi::CStr::from_ptr(ptr) }
	}
}
