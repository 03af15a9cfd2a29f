//! Loads the addon named on the command line and exits with the value its
//! `addon_call` returns.

use std::os::windows::ffi::OsStrExt;
use std::{env, ffi, io, iter, mem, process};

#[no_mangle]
pub extern "C" fn host_answer() -> u32 {
	42
}

extern "system" {
	fn LoadLibraryW(lplibfilename: *const u16) -> *mut ffi::c_void;
	fn GetProcAddress(hmodule: *mut ffi::c_void, lpprocname: *const ffi::c_char) -> *const ffi::c_void;
}

fn main() {
	let Some(path) = env::args_os().nth(1) else {
		eprintln!("usage: renamed_host_app <addon.dll>");
		process::exit(2);
	};
	let wide: Vec<u16> = path.encode_wide().chain(iter::once(0)).collect();
	let addon = unsafe { LoadLibraryW(wide.as_ptr()) };
	if addon.is_null() {
		eprintln!("LoadLibraryW failed: {}", io::Error::last_os_error());
		process::exit(3);
	}
	let call = unsafe { GetProcAddress(addon, c"addon_call".as_ptr()) };
	if call.is_null() {
		eprintln!("addon_call not found: {}", io::Error::last_os_error());
		process::exit(4);
	}
	let call: extern "C" fn() -> u32 = unsafe { mem::transmute(call) };
	process::exit(call() as i32);
}
