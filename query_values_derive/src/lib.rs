//! `#[derive(Record)]` for `query_values`.
//!
//! The derive emits `Record::walk`: one walker call per field, in
//! declaration order, with the key each field is read from computed here at
//! compile time.

mod attrs;

use proc_macro::TokenStream;
use proc_macro2::TokenTree;
use quote::{ToTokens, quote};
use syn::{Data, DeriveInput, Fields, Ident, WherePredicate, parse_macro_input, parse_quote};

use attrs::{FieldKind, parse_container_attrs, parse_field_attrs};

#[proc_macro_derive(Record, attributes(query))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_record_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_record_impl(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let container = parse_container_attrs(&input.attrs)?;

    let data = match &input.data {
        Data::Struct(data) => data,
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Record can only be derived for structs",
            ));
        }
    };

    let type_params: Vec<&Ident> = input.generics.type_params().map(|p| &p.ident).collect();
    let mut steps = Vec::new();
    let mut bounds: Vec<WherePredicate> = Vec::new();
    match &data.fields {
        Fields::Named(named) => {
            for field in &named.named {
                let ident = &field.ident;
                let ty = &field.ty;
                let (step, bound): (_, WherePredicate) =
                    match parse_field_attrs(field, container.rename_all)? {
                        FieldKind::Skip => continue,
                        FieldKind::Flatten => (
                            quote! { walker.embed(&mut self.#ident)?; },
                            parse_quote! { #ty: ::query_values::Target },
                        ),
                        FieldKind::Keyed { key, text: false } => (
                            quote! { walker.field(#key, &mut self.#ident)?; },
                            parse_quote! { #ty: ::query_values::Field },
                        ),
                        FieldKind::Keyed { key, text: true } => (
                            quote! { walker.text(#key, &mut self.#ident)?; },
                            parse_quote! { #ty: ::query_values::__private::DeserializeOwned },
                        ),
                    };
                if mentions_type_param(ty.to_token_stream(), &type_params) {
                    bounds.push(bound);
                }
                steps.push(step);
            }
        }
        Fields::Unit => {}
        Fields::Unnamed(unnamed) => {
            return Err(syn::Error::new_spanned(
                unnamed,
                "Record fields need names to derive their keys",
            ));
        }
    }

    let mut generics = input.generics.clone();
    if !bounds.is_empty() {
        generics.make_where_clause().predicates.extend(bounds);
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let walker = if steps.is_empty() {
        quote! { _walker }
    } else {
        quote! { walker }
    };

    Ok(quote! {
        impl #impl_generics ::query_values::Record for #name #ty_generics #where_clause {
            fn walk(
                &mut self,
                #walker: &mut ::query_values::Walker<'_>,
            ) -> ::query_values::Result<()> {
                #(#steps)*
                ::core::result::Result::Ok(())
            }
        }
    })
}

/// Whether a field type names one of the record's type parameters, and so
/// needs a bound on the generated impl.
fn mentions_type_param(tokens: proc_macro2::TokenStream, params: &[&Ident]) -> bool {
    tokens.into_iter().any(|tree| match tree {
        TokenTree::Ident(ident) => params.iter().any(|param| **param == ident),
        TokenTree::Group(group) => mentions_type_param(group.stream(), params),
        _ => false,
    })
}
