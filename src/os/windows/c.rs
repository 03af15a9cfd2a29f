// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
#![allow(clippy::upper_case_acronyms)]

pub use std::os::windows::raw::HANDLE;

pub type HMODULE = HANDLE;
pub type PCWSTR = *const u16;

extern "system" {
	pub fn GetModuleHandleW(lpmodulename: PCWSTR) -> HMODULE;
}
