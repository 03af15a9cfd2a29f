// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
// The crate exports the failure hook itself when this feature is on.
#![cfg(not(feature = "failure-hook"))]

use delay_hook::*;

#[delay_hook(kind = failure)]
fn fallback_to_self(event: Event, info: &DelayLoadInfo) -> Option<Module> {
	if event != Event::FAIL_LOAD_LIBRARY {
		return None;
	}
	match info.dll_name()?.to_bytes() {
		b"renamed.exe" => this_image().ok(),
		_ => None,
	}
}

#[test]
fn test_annotated_fn_is_still_callable() {
	let info = DelayLoadInfo::new(c"renamed.exe");
	assert_eq!(fallback_to_self(Event::FAIL_LOAD_LIBRARY, &info), this_image().ok());
	assert_eq!(fallback_to_self(Event::PRE_LOAD_LIBRARY, &info), None);
	assert_eq!(fallback_to_self(Event::FAIL_LOAD_LIBRARY, &DelayLoadInfo::new(c"a.dll")), None);
}

#[cfg(windows)]
#[test]
fn test_failure_symbol_is_exported() {
	extern "C" {
		static __pfnDliFailureHook2: PfnDliHook;
	}
	let hook = unsafe { __pfnDliFailureHook2 }.expect("failure hook not registered");
	let mut info = DelayLoadInfo::new(c"renamed.exe");
	let resolved = unsafe { hook(Event::FAIL_LOAD_LIBRARY.code(), &mut info) };
	let image = this_image().unwrap();
	assert_eq!(resolved.map(|f| f as usize), Some(image.as_ptr() as usize));

	let declined = unsafe { hook(Event::PRE_LOAD_LIBRARY.code(), &mut info) };
	assert!(declined.is_none());
}
