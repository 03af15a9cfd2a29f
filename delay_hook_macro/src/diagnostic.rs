// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
use syn::spanned::Spanned;

// Rejects signatures that cannot be wrapped by `dispatch`. The parameter and
// return types themselves are left to the compiler.
pub(crate) fn hook_fn_diag(sig: &syn::Signature) -> syn::Result<()> {
    let mut errors = vec![];
    if let Some(token) = &sig.asyncness {
        errors.push(syn::Error::new(token.span(), "delay-load hooks cannot be `async`"));
    }
    if let Some(token) = &sig.unsafety {
        errors.push(syn::Error::new(
            token.span(),
            "delay-load hooks must be safe functions",
        ));
    }
    if !sig.generics.params.is_empty() {
        errors.push(syn::Error::new(
            sig.generics.span(),
            "delay-load hooks cannot be generic",
        ));
    }
    if let Some(variadic) = &sig.variadic {
        errors.push(syn::Error::new(variadic.span(), "variadic hooks are unsupported"));
    }
    for arg in sig.inputs.iter() {
        if let syn::FnArg::Receiver(rec) = arg {
            errors.push(syn::Error::new(rec.span(), "`self` arguments are unsupported"));
        }
    }
    if sig.inputs.len() != 2 {
        errors.push(syn::Error::new(
            sig.inputs.span(),
            "expected `fn(Event, &DelayLoadInfo) -> Option<Module>`",
        ));
    }
    if let syn::ReturnType::Default = sig.output {
        errors.push(syn::Error::new(
            sig.ident.span(),
            "delay-load hooks must return `Option<Module>`",
        ));
    }

    match errors.pop() {
        Some(mut main_err) => {
            for err in errors {
                main_err.combine(err);
            }
            Err(main_err)
        }
        None => Ok(()),
    }
}
