use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{parse_macro_input, spanned::Spanned, ItemStruct, LitStr};

use crate::schema_extraction::{
    collect_doc_comments, collect_field_docs, ensure_named_struct, infer_description,
    infer_schema_name, parse_response_schema_args, serde_rename_all, ResponseSchemaArgs,
};

/// A struct annotated with `#[response_schema]`, with everything the
/// generated impl needs pulled out of its attributes.
struct AnnotatedStruct {
    item: ItemStruct,
    schema_name: LitStr,
    description: Option<LitStr>,
    field_docs: Vec<(String, String)>,
}

impl AnnotatedStruct {
    fn new(args: ResponseSchemaArgs, item: ItemStruct) -> syn::Result<Self> {
        ensure_named_struct(&item)?;
        if !item.generics.params.is_empty() {
            return Err(syn::Error::new(
                item.generics.span(),
                "`#[response_schema]` does not support generic structs",
            ));
        }

        let schema_name = infer_schema_name(&item, args.name.as_ref());
        let description =
            infer_description(args.description.as_ref(), collect_doc_comments(&item.attrs));
        // Schema properties carry serde's names, not the Rust idents.
        let field_docs = collect_field_docs(&item, serde_rename_all(&item.attrs).as_deref());

        Ok(Self {
            item,
            schema_name,
            description,
            field_docs,
        })
    }

    fn expand(&self) -> TokenStream2 {
        let item = &self.item;
        let ident = &item.ident;
        let schema_name = &self.schema_name;
        let rust_type = LitStr::new(&ident.to_string(), Span::call_site());
        let description = match &self.description {
            Some(text) => quote! { Some(#text) },
            None => quote! { None },
        };
        let fields = self.field_docs.iter().map(|(property, doc)| {
            let property = LitStr::new(property, Span::call_site());
            let doc = LitStr::new(doc, Span::call_site());
            quote! { (#property, #doc) }
        });

        quote! {
            #item

            impl trip_planner::schema::ResponseSchema for #ident {
                fn schema() -> &'static trip_planner::schema::SchemaHandle {
                    static SCHEMA: std::sync::OnceLock<trip_planner::schema::SchemaHandle> =
                        std::sync::OnceLock::new();
                    SCHEMA.get_or_init(|| {
                        trip_planner::schema::SchemaHandle::build::<Self>(
                            #schema_name,
                            #rust_type,
                            trip_planner::schema::SchemaDocs {
                                description: #description,
                                fields: &[#(#fields),*],
                            },
                        )
                    })
                }
            }
        }
    }
}

pub fn response_schema(attr: TokenStream, item: TokenStream) -> TokenStream {
    let item = parse_macro_input!(item as ItemStruct);

    parse_response_schema_args(attr)
        .and_then(|args| AnnotatedStruct::new(args, item))
        .map(|annotated| annotated.expand())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
