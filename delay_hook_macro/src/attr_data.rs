// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
use proc_macro2::Span;
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{spanned::Spanned, *};

/// Which delay-load hook slot the function is installed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
	Notify,
	Failure,
}

impl HookKind {
	pub fn symbol(self) -> &'static str {
		match self {
			HookKind::Notify => "__pfnDliNotifyHook2",
			HookKind::Failure => "__pfnDliFailureHook2",
		}
	}
}

/// One `key = value` pair. Keys may be keywords so that `crate = ...` parses.
pub struct Arg {
	pub key: Ident,
	pub value: Path,
}

impl Parse for Arg {
	fn parse(input: ParseStream) -> Result<Self> {
		let key = Ident::parse_any(input)?;
		input.parse::<Token![=]>()?;
		let value = input.parse()?;
		Ok(Self { key, value })
	}
}

pub struct AttrData {
	pub kind: HookKind,
	pub krate: Path,
}

impl TryFrom<Punctuated<Arg, Token!(,)>> for AttrData {
	type Error = syn::Error;
	fn try_from(value: Punctuated<Arg, Token!(,)>) -> Result<Self> {
		let mut kind: Option<(HookKind, Span)> = None;
		let mut krate: Option<Path> = None;
		let mut errors = vec![];
		const EXPECTED_KW: &str = "Expected `kind`, or `crate`.";

		for arg in value.iter() {
			let span = arg.key.span().join(arg.value.span()).unwrap_or(arg.key.span());
			if arg.key == "kind" {
				// Branch for syntax: #[delay_hook(kind = notify)]
				let parsed = if arg.value.is_ident("notify") {
					Some(HookKind::Notify)
				} else if arg.value.is_ident("failure") {
					Some(HookKind::Failure)
				} else {
					errors.push(Error::new(
						arg.value.span(),
						"Expected `notify`, or `failure`.",
					));
					None
				};
				if let Some(parsed) = parsed {
					if kind.is_none() {
						kind = Some((parsed, span));
					} else {
						errors.push(Error::new(span, "kind is already defined"));
					}
				}
			} else if arg.key == "crate" {
				// Branch for syntax: #[delay_hook(crate = <path>)]
				if krate.is_none() {
					krate = Some(arg.value.clone());
				} else {
					errors.push(Error::new(span, "crate is already defined"));
				}
			} else {
				errors.push(Error::new(arg.key.span(), EXPECTED_KW));
			}
		}

		// if there are any errors this will immediately combine and return early.
		if let Some(mut main_err) = errors.pop() {
			for err in errors {
				main_err.combine(err);
			}
			return Err(main_err);
		}
		Ok(Self {
			kind: kind.map_or(HookKind::Notify, |(kind, _)| kind),
			krate: krate.unwrap_or_else(|| parse_quote!(::delay_hook)),
		})
	}
}
