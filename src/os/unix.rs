// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
use super::Module;
use crate::{Error, Result};
use std::{ffi, io, ptr};

unsafe fn dylib_error() -> io::Error {
	let msg = libc::dlerror();
	if msg.is_null() {
		io::Error::new(io::ErrorKind::Other, "dlopen failed")
	} else {
		let e = ffi::CStr::from_ptr(msg).to_string_lossy().into_owned();
		io::Error::new(io::ErrorKind::Other, e)
	}
}

pub(crate) unsafe fn image_this() -> Result<Module> {
	let _ = libc::dlerror(); // clear existing errors
	// the main program is never unloaded, so the reference taken here is not released
	let handle = libc::dlopen(ptr::null(), libc::RTLD_NOW);
	match Module::from_raw(handle) {
		Some(module) => Ok(module),
		None => Err(Error::ImageLookup(dylib_error())),
	}
}
