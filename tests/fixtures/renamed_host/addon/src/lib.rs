//! An addon that imports from its host by the host's original file name.

// linked for `__pfnDliNotifyHook2`, which the delay-load helper reads
extern crate delay_hook;

#[link(name = "renamed_host_app.exe", kind = "raw-dylib", modifiers = "+verbatim")]
extern "C" {
	fn host_answer() -> u32;
}

#[no_mangle]
pub extern "C" fn addon_call() -> u32 {
	unsafe { host_answer() + 1 }
}
