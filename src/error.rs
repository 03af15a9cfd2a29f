// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
use std::io;

/// Errors raised while configuring the hook or looking up the process image.
///
/// The hook itself never fails; it declines and lets the loader fall back.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("host binary name is empty")]
	EmptyHostName,
	#[error("host binary name `{0}` must be a file name, not a path")]
	HostNameHasPath(String),
	#[error("failed to look up the process image: {0}")]
	ImageLookup(#[source] io::Error),
	#[error("process image lookup is not supported on this target")]
	Unsupported,
}

impl Error {
	/// The OS error code behind a failed image lookup, if there is one.
	#[inline]
	pub fn raw_os_error(&self) -> Option<i32> {
		match self {
			Self::ImageLookup(err) => err.raw_os_error(),
			_ => None,
		}
	}
}
