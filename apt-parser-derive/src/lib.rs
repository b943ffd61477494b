extern crate proc_macro;
use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, DeriveInput};
use syn::{Type, TypePath};

fn is_option(ty: &syn::Type) -> bool {
    if let Type::Path(TypePath { path, .. }) = ty {
        if let Some(segment) = path.segments.last() {
            return segment.ident == "Option";
        }
    }
    false
}

// Generate the `FromRawDocument` builder for the annotated struct, i.e.:
//
// ```rust
// #[derive(FromRawDocument)]
// #[apt(kind = Control)]
// struct X {
//    #[apt(raw)]
//    document: RawDocument,
//    #[apt(field = "Package", required)]
//    package: String,
//    #[apt(field = "Essential", with = coerce::yes_no)]
//    essential: Option<bool>,
//    homepage: Option<String>,
// }
// ```
//
// will generate:
//
// ```rust
// impl apt_parser::FromRawDocument for X {
//     const KIND: apt_parser::RecordKind = apt_parser::RecordKind::Control;
//     const REQUIRED: &'static [&'static str] = &["Package"];
//
//     fn from_document_as(document: apt_parser::RawDocument, kind: apt_parser::RecordKind, options: &apt_parser::ParseOptions) -> Result<Self, apt_parser::Error> {
//         let fields = apt_parser::Fields::new(&document, kind, Self::REQUIRED, options)?;
//         let __package = fields.coerce("Package", apt_parser::coerce::required_string)?;
//         let __essential = fields.coerce("Essential", coerce::yes_no)?;
//         let __homepage = fields.coerce("homepage", apt_parser::coerce::string)?;
//         Ok(Self {
//             package: __package,
//             essential: __essential,
//             homepage: __homepage,
//             document,
//         })
//     }
// }
// ```
//
// Instead of `#[apt(raw)]`, a struct may embed another record with
// `#[apt(flatten)]`. The embedded record is built last, from the same
// document, under the outer record's kind.

struct FieldAttributes {
    field: Option<String>,
    with: Option<syn::ExprPath>,
    required: bool,
    raw: bool,
    flatten: bool,
}

fn extract_field_attributes(attrs: &[syn::Attribute]) -> Result<FieldAttributes, syn::Error> {
    let mut field = None;
    let mut with = None;
    let mut required = false;
    let mut raw = false;
    let mut flatten = false;

    for attr in attrs {
        if !attr.path().is_ident("apt") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("field") {
                let value = meta.value()?;
                let s: syn::LitStr = value.parse()?;
                field = Some(s.value());
                Ok(())
            } else if meta.path.is_ident("with") {
                let value = meta.value()?;
                let path: syn::ExprPath = value.parse()?;
                with = Some(path);
                Ok(())
            } else if meta.path.is_ident("required") {
                required = true;
                Ok(())
            } else if meta.path.is_ident("raw") {
                raw = true;
                Ok(())
            } else if meta.path.is_ident("flatten") {
                flatten = true;
                Ok(())
            } else {
                Err(meta.error("unsupported attribute, expected one of `field`, `with`, `required`, `raw` or `flatten`"))
            }
        })?;
    }

    if (raw || flatten) && (field.is_some() || with.is_some() || required || (raw && flatten)) {
        return Err(syn::Error::new(
            proc_macro2::Span::call_site(),
            "`raw` and `flatten` cannot be combined with other field attributes",
        ));
    }

    Ok(FieldAttributes {
        field,
        with,
        required,
        raw,
        flatten,
    })
}

fn extract_kind(input: &DeriveInput) -> Result<syn::Ident, syn::Error> {
    let mut kind = None;

    for attr in &input.attrs {
        if !attr.path().is_ident("apt") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("kind") {
                let value = meta.value()?;
                let ident: syn::Ident = value.parse()?;
                kind = Some(ident);
                Ok(())
            } else {
                Err(meta.error("unsupported attribute, expected `kind`"))
            }
        })?;
    }

    kind.ok_or_else(|| {
        syn::Error::new_spanned(&input.ident, "missing `#[apt(kind = ...)]` attribute")
    })
}

fn expand(input: &DeriveInput) -> Result<proc_macro2::TokenStream, syn::Error> {
    let name = &input.ident;
    let kind = extract_kind(input)?;

    let s = if let syn::Data::Struct(s) = &input.data {
        s
    } else {
        return Err(syn::Error::new_spanned(
            name,
            "FromRawDocument can only be derived for structs",
        ));
    };

    let mut raw_field = None;
    let mut flatten_field = None;
    let mut required = Vec::new();
    let mut bindings = Vec::new();
    let mut assignments = Vec::new();

    for f in s.fields.iter() {
        let ident = f.ident.as_ref().ok_or_else(|| {
            syn::Error::new_spanned(f, "FromRawDocument requires named fields")
        })?;
        let attrs = extract_field_attributes(&f.attrs)?;

        if attrs.raw {
            if raw_field.is_some() {
                return Err(syn::Error::new_spanned(
                    ident,
                    "only one field can be marked `#[apt(raw)]`",
                ));
            }
            raw_field = Some(ident.clone());
            continue;
        }

        if attrs.flatten {
            if flatten_field.is_some() {
                return Err(syn::Error::new_spanned(
                    ident,
                    "only one field can be marked `#[apt(flatten)]`",
                ));
            }
            flatten_field = Some((ident.clone(), f.ty.clone()));
            continue;
        }

        // Get key either from the #[apt(field = "Foo")] attribute, or derive it from the
        // field name
        let key = attrs.field.unwrap_or_else(|| ident.to_string());
        if attrs.required {
            required.push(key.clone());
        }

        let with = if let Some(with) = attrs.with {
            quote! { #with }
        } else if is_option(&f.ty) {
            quote! { apt_parser::coerce::string }
        } else {
            quote! { apt_parser::coerce::required_string }
        };

        let local = format_ident!("__{}", ident);
        bindings.push(quote! {
            let #local = fields.coerce(#key, #with)?;
        });
        assignments.push(quote! { #ident: #local });
    }

    // The document goes to exactly one place: the raw field or the embedded record
    let document_sink = match (raw_field, flatten_field) {
        (Some(raw), None) => quote! { #raw: document },
        (None, Some((ident, ty))) => {
            bindings.push(quote! {
                let __flattened = <#ty as apt_parser::FromRawDocument>::from_document_as(document, kind, options)?;
            });
            quote! { #ident: __flattened }
        }
        (Some(_), Some(_)) => {
            return Err(syn::Error::new_spanned(
                name,
                "`#[apt(raw)]` and `#[apt(flatten)]` cannot be used in the same struct",
            ))
        }
        (None, None) => {
            return Err(syn::Error::new_spanned(
                name,
                "FromRawDocument requires a `RawDocument` field marked `#[apt(raw)]` or an embedded record marked `#[apt(flatten)]`",
            ))
        }
    };

    Ok(quote! {
        impl apt_parser::FromRawDocument for #name {
            const KIND: apt_parser::RecordKind = apt_parser::RecordKind::#kind;
            const REQUIRED: &'static [&'static str] = &[#(#required),*];

            fn from_document_as(
                document: apt_parser::RawDocument,
                kind: apt_parser::RecordKind,
                options: &apt_parser::ParseOptions,
            ) -> ::core::result::Result<Self, apt_parser::Error> {
                let fields = apt_parser::Fields::new(&document, kind, Self::REQUIRED, options)?;
                #(#bindings)*
                Ok(Self {
                    #(#assignments,)*
                    #document_sink,
                })
            }
        }
    })
}

#[proc_macro_derive(FromRawDocument, attributes(apt))]
pub fn derive_from_raw_document(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
