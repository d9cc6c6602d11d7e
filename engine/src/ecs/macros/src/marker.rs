use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{DeriveInput, Ident, parse_macro_input, parse_quote};

pub fn derive_marker(input: TokenStream, trait_name: &str) -> TokenStream {
    let mut ast = parse_macro_input!(input as DeriveInput);
    let type_name = &ast.ident;
    let trait_ident = Ident::new(trait_name, Span::call_site());

    // Every marker trait requires 'static, so each type parameter must be as well.
    for param in ast.generics.type_params_mut() {
        param.bounds.push(parse_quote!('static));
    }
    let (impl_generics, type_generics, where_clause) = ast.generics.split_for_impl();

    TokenStream::from(quote! {
        impl #impl_generics ::rusty_ecs::ecs::#trait_ident for #type_name #type_generics #where_clause {
        }
    })
}
