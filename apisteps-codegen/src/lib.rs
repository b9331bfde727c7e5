use proc_macro::TokenStream;
use quote::{format_ident, quote, quote_spanned};
use syn::spanned::Spanned;

/// Turns `async fn name(state: &mut apisteps::State)` into a tokio test. The
/// function passed as the argument receives the `ApiConfiguration` before
/// the state is built; the state is reset after the scenario, also when it
/// panics.
#[proc_macro_attribute]
pub fn api_scenario(attrs: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as syn::ItemFn);
    let args = syn::parse_macro_input!(attrs as syn::AttributeArgs);

    let configuration_function = match args.first() {
        Some(syn::NestedMeta::Meta(syn::Meta::Path(function_path))) if args.len() == 1 => {
            function_path
        }
        Some(_) => {
            return quote! {
                compile_error!("The only argument should be a configuration function!");
            }
            .into();
        }
        None => {
            return quote! {
                compile_error!("A configuration function should be passed to the macro");
            }
            .into();
        }
    };

    if input.sig.asyncness.is_none() {
        return quote_spanned! {input.sig.fn_token.span()=>
            compile_error!("The scenario should be an async function!");
        }
        .into();
    }

    if input.sig.inputs.len() != 1 {
        return quote_spanned! {input.sig.inputs.span()=>
            compile_error!("The scenario should take the state as its only argument!");
        }
        .into();
    }

    let attributes = &input.attrs;
    let visibility = &input.vis;
    let name = &input.sig.ident;
    let return_type = &input.sig.output;
    let block = &input.block;

    let mut scenario_signature = input.sig.clone();
    scenario_signature.ident = format_ident!("__apisteps_scenario");

    let output = quote! {
        #[tokio::test]
        #(#attributes)*
        #visibility async fn #name() #return_type {
            #scenario_signature #block

            let mut __apisteps_configuration = apisteps::ApiConfiguration::new();
            #configuration_function(&mut __apisteps_configuration);
            let mut __apisteps_state = match apisteps::State::new(__apisteps_configuration) {
                Ok(state) => state,
                Err(e) => panic!("apisteps error: {}", e),
            };

            let __apisteps_result = apisteps::futures::FutureExt::catch_unwind(
                std::panic::AssertUnwindSafe(__apisteps_scenario(&mut __apisteps_state)),
            )
            .await;

            if let Err(e) = __apisteps_state.reset_state(false) {
                panic!("apisteps error: {}", e);
            }

            match __apisteps_result {
                Ok(result) => result,
                Err(e) => std::panic::resume_unwind(e),
            }
        }
    };

    TokenStream::from(output)
}
