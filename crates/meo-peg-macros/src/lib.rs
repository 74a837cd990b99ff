use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, LitStr, parse_macro_input};

use meo_core::utils::to_snake_case;

/// Derive `AstNode` and `NodeType` for a struct of member slots.
///
/// Every named field is a member slot (`AstPtr`, `AstSel`, `AstList`,
/// `AstSelList`) except:
/// - the span field: named `span`, or marked `#[ast(span)]`
/// - fields marked `#[ast(skip)]`
///
/// The node name defaults to the snake_case type name and can be set with
/// `#[ast(name = "...")]` on the struct.
///
/// Slots are constructed in reverse declaration order (the top of the
/// construction stack holds the last matched child) and visited in
/// declaration order.
#[proc_macro_derive(AstNode, attributes(ast))]
pub fn derive_ast_node(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "AstNode cannot be derived for generic types",
        ));
    }

    let ident = &input.ident;
    let name = node_name(&input)?;

    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            ident,
            "AstNode can only be derived for structs",
        ));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new_spanned(
            ident,
            "AstNode requires a struct with named fields",
        ));
    };

    let mut span_field: Option<Ident> = None;
    let mut members: Vec<Ident> = Vec::new();

    for field in &fields.named {
        let Some(field_ident) = field.ident.clone() else {
            continue;
        };
        let role = field_role(field)?;
        match role {
            FieldRole::Skip => {}
            FieldRole::Span => {
                if span_field.is_some() {
                    return Err(syn::Error::new_spanned(field, "duplicate span field"));
                }
                span_field = Some(field_ident);
            }
            FieldRole::Member if field_ident == "span" && span_field.is_none() => {
                span_field = Some(field_ident);
            }
            FieldRole::Member => members.push(field_ident),
        }
    }

    let Some(span_field) = span_field else {
        return Err(syn::Error::new_spanned(
            ident,
            "AstNode requires a `span: Span` field or a field marked #[ast(span)]",
        ));
    };

    let leaf = members.is_empty();
    let construct_order = members.iter().rev();
    let visit_order = members.iter();

    Ok(quote! {
        impl ::meo_peg::ast::AstNode for #ident {
            fn name(&self) -> &'static str {
                #name
            }

            fn span(&self) -> ::meo_peg::Span {
                self.#span_field
            }

            fn set_span(&mut self, span: ::meo_peg::Span) {
                self.#span_field = span;
            }

            fn is_leaf(&self) -> bool {
                #leaf
            }

            #[allow(unused_variables)]
            fn construct(
                &mut self,
                stack: &mut ::meo_peg::ast::AstStack,
            ) -> ::std::result::Result<(), ::meo_peg::ast::ConstructError> {
                #( ::meo_peg::ast::AstMember::construct(&mut self.#construct_order, stack)?; )*
                ::std::result::Result::Ok(())
            }

            #[allow(unused_variables)]
            fn visit_children<'s>(
                &'s self,
                visitor: &mut dyn FnMut(&'s (dyn ::meo_peg::ast::AstNode + 'static)) -> bool,
            ) -> bool {
                #(
                    if ::meo_peg::ast::AstMember::visit(&self.#visit_order, visitor) {
                        return true;
                    }
                )*
                false
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }

            fn into_any(self: ::std::boxed::Box<Self>) -> ::std::boxed::Box<dyn ::std::any::Any> {
                self
            }
        }

        impl ::meo_peg::ast::NodeType for #ident {
            const NAME: &'static str = #name;
        }
    })
}

enum FieldRole {
    Member,
    Span,
    Skip,
}

fn field_role(field: &syn::Field) -> syn::Result<FieldRole> {
    let mut role = FieldRole::Member;
    for attr in &field.attrs {
        if !attr.path().is_ident("ast") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("span") {
                role = FieldRole::Span;
                Ok(())
            } else if meta.path.is_ident("skip") {
                role = FieldRole::Skip;
                Ok(())
            } else {
                Err(meta.error("expected `span` or `skip`"))
            }
        })?;
    }
    Ok(role)
}

fn node_name(input: &DeriveInput) -> syn::Result<LitStr> {
    let mut name: Option<LitStr> = None;
    for attr in &input.attrs {
        if !attr.path().is_ident("ast") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                name = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("expected `name = \"...\"`"))
            }
        })?;
    }

    Ok(name.unwrap_or_else(|| {
        LitStr::new(&to_snake_case(&input.ident.to_string()), input.ident.span())
    }))
}
