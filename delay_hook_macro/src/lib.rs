// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
use quote::*;

use proc_macro::TokenStream as TokenStream1;
use proc_macro2::TokenStream as TokenStream2;
use syn::{parse::Parser, punctuated::Punctuated, Token};

mod attr_data;
mod diagnostic;
use attr_data::*;

/// Registers a function as a delay-load hook.
///
/// The function must have the shape `fn(Event, &DelayLoadInfo) -> Option<Module>`
/// and is kept as written. On windows targets the attribute also exports the
/// well-known hook pointer that the delay-load helper reads:
///
/// * `#[delay_hook]` or `#[delay_hook(kind = notify)]` exports `__pfnDliNotifyHook2`.
/// * `#[delay_hook(kind = failure)]` exports `__pfnDliFailureHook2`.
///
/// `crate = <path>` overrides the path to the runtime crate (`::delay_hook` by default).
#[proc_macro_attribute]
pub fn delay_hook(args: TokenStream1, input: TokenStream1) -> TokenStream1 {
    match expand(args.into(), input.into()) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.into_compile_error().into(),
    }
}

fn expand(args: TokenStream2, input: TokenStream2) -> syn::Result<TokenStream2> {
    let punct = Punctuated::<Arg, Token!(,)>::parse_terminated.parse2(args)?;
    let AttrData { kind, krate } = AttrData::try_from(punct)?;
    let item_fn = syn::parse2::<syn::ItemFn>(input)?;
    diagnostic::hook_fn_diag(&item_fn.sig)?;

    let fn_name = &item_fn.sig.ident;
    let symbol = format_ident!("{}", kind.symbol());

    // The export lives in an anonymous const so repeated expansions do not collide
    // on the thunk name; `no_mangle` still makes the static visible to the linker.
    Ok(quote! {
        #item_fn

        #[cfg(windows)]
        const _: () = {
            unsafe extern "system" fn thunk(
                event: u32,
                info: *mut #krate::notify::DelayLoadInfo,
            ) -> #krate::notify::FarProc {
                unsafe { #krate::hook::dispatch(event, info, #fn_name) }
            }

            #[used]
            #[unsafe(no_mangle)]
            #[allow(non_upper_case_globals)]
            static #symbol: #krate::notify::PfnDliHook = Some(
                thunk as unsafe extern "system" fn(
                    u32,
                    *mut #krate::notify::DelayLoadInfo,
                ) -> #krate::notify::FarProc,
            );
        };
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exports_notify_symbol_by_default() {
        let out = expand(
            quote!(),
            quote! {
                fn hook(event: Event, info: &DelayLoadInfo) -> Option<Module> { None }
            },
        )
        .unwrap()
        .to_string();
        assert!(out.contains("__pfnDliNotifyHook2"));
        assert!(out.contains("cfg (windows)"));
        assert!(out.contains(":: delay_hook :: hook :: dispatch"));
    }

    #[test]
    fn exports_failure_symbol_with_custom_crate() {
        let out = expand(
            quote!(kind = failure, crate = crate),
            quote! {
                pub fn hook(event: Event, info: &DelayLoadInfo) -> Option<Module> { None }
            },
        )
        .unwrap()
        .to_string();
        assert!(out.contains("__pfnDliFailureHook2"));
        assert!(!out.contains("__pfnDliNotifyHook2"));
        assert!(out.contains("crate :: hook :: dispatch"));
    }

    #[test]
    fn rejects_bad_signatures() {
        let bad = [
            quote!(async fn hook(e: Event, i: &DelayLoadInfo) -> Option<Module> { None }),
            quote!(unsafe fn hook(e: Event, i: &DelayLoadInfo) -> Option<Module> { None }),
            quote!(fn hook<T>(e: Event, i: &DelayLoadInfo) -> Option<Module> { None }),
            quote!(fn hook(e: Event) -> Option<Module> { None }),
            quote!(fn hook(e: Event, i: &DelayLoadInfo) {}),
        ];
        for input in bad {
            assert!(expand(quote!(), input).is_err());
        }
    }

    #[test]
    fn rejects_non_functions() {
        assert!(expand(quote!(), quote!(static HOOK: u32 = 0;)).is_err());
    }
}
