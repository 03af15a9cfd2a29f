// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
use std::{io, ptr};

use super::Module;
use crate::{Error, Result};

mod c;

#[inline]
pub(crate) unsafe fn image_this() -> Result<Module> {
	// a null name is documented to mean the file used to create the calling process
	let handle = c::GetModuleHandleW(ptr::null());
	Module::from_raw(handle).ok_or_else(|| Error::ImageLookup(io::Error::last_os_error()))
}
