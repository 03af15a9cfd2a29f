// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
//! Bakes the host executable name into the crate and links the delay-load
//! helper on MSVC targets.

use std::env;

const HOST_ENV: &str = "DELAY_HOOK_HOST_BINARY";
const DEFAULT_HOST: &str = "node.exe";

fn main() {
	println!("cargo:rerun-if-changed=build.rs");
	println!("cargo:rerun-if-env-changed={HOST_ENV}");

	let host = env::var(HOST_ENV).unwrap_or_else(|_| DEFAULT_HOST.to_owned());
	if host.is_empty() {
		panic!("{HOST_ENV} must not be empty");
	}
	if host.contains('\0') {
		panic!("{HOST_ENV} must not contain NUL bytes");
	}
	if host.contains(['/', '\\']) {
		panic!("{HOST_ENV} must be a bare file name, got `{host}`");
	}
	println!("cargo:rustc-env={HOST_ENV}={host}");

	// MinGW resolves delay imports through its own runtime.
	let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
	let target_env = env::var("CARGO_CFG_TARGET_ENV").unwrap_or_default();
	if target_os == "windows" && target_env == "msvc" {
		println!("cargo:rustc-link-lib=delayimp");
	}
}
