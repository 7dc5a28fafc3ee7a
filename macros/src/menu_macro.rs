//! menu! macro: parse element syntax and generate `MenuDescriptor` builder code.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::{Error, Ident, Lit, LitStr, Result, Token};

// ---------------------------------------------------------------------------
// AST types
// ---------------------------------------------------------------------------

/// Value of an attribute: `name="text"`, `name=true`, or a bare `name`.
#[derive(Clone)]
pub(crate) enum AttrValue {
    Str(LitStr),
    Flag(bool),
}

/// A parsed attribute.
#[derive(Clone)]
pub(crate) struct Attribute {
    pub name: Ident,
    pub value: AttrValue,
}

impl std::fmt::Debug for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match &self.value {
            AttrValue::Str(s) => s.value(),
            AttrValue::Flag(b) => b.to_string(),
        };
        f.debug_struct("Attribute")
            .field("name", &self.name.to_string())
            .field("value", &value)
            .finish()
    }
}

/// `<menu ...>` is a container, `<menuitem .../>` an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tag {
    Menu,
    MenuItem,
}

/// A parsed element: `<tag attrs... />` or `<tag attrs...> children </tag>`.
#[derive(Debug, Clone)]
pub(crate) struct Element {
    pub tag: Tag,
    pub span: Span,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Element>,
}

/// The top-level menu! input: exactly one root `<menu>`.
#[derive(Debug)]
struct MenuInput {
    root: Element,
}

// ---------------------------------------------------------------------------
// Attribute names
// ---------------------------------------------------------------------------

/// String attributes and the builder method each one becomes.
const STRING_ATTRS: &[(&str, &str)] = &[
    ("label", "with_label"),
    ("onclick", "with_on_click"),
    ("keys", "with_keys"),
    ("compo", "with_compo_id"),
    ("elem", "with_elem_id"),
];

/// Boolean attributes and their builder method.
const FLAG_ATTRS: &[(&str, &str)] = &[("separator", "with_separator"), ("disabled", "disabled")];

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

impl Parse for MenuInput {
    fn parse(input: ParseStream) -> Result<Self> {
        if input.is_empty() {
            return Err(Error::new(Span::call_site(), "menu! requires a root `<menu>` element"));
        }
        let root = parse_element(input)?;
        if root.tag != Tag::Menu {
            return Err(Error::new(root.span, "the root element must be `<menu>`"));
        }
        if !input.is_empty() {
            return Err(input.error("menu! takes exactly one root element"));
        }
        Ok(MenuInput { root })
    }
}

fn parse_tag(input: ParseStream) -> Result<(Tag, Ident)> {
    let ident: Ident = input.parse()?;
    let tag = match ident.to_string().as_str() {
        "menu" => Tag::Menu,
        "menuitem" => Tag::MenuItem,
        other => {
            return Err(Error::new(
                ident.span(),
                format!("unknown element `<{other}>`, expected `<menu>` or `<menuitem>`"),
            ))
        }
    };
    Ok((tag, ident))
}

fn parse_attribute(input: ParseStream) -> Result<Attribute> {
    let name: Ident = input.parse()?;
    if !input.peek(Token![=]) {
        return Ok(Attribute {
            name,
            value: AttrValue::Flag(true),
        });
    }
    input.parse::<Token![=]>()?;
    let value = match input.parse::<Lit>()? {
        Lit::Str(s) => AttrValue::Str(s),
        Lit::Bool(b) => AttrValue::Flag(b.value),
        other => return Err(Error::new(other.span(), "expected a string or `true`/`false`")),
    };
    Ok(Attribute { name, value })
}

/// Parse a single element from the token stream.
pub(crate) fn parse_element(input: ParseStream) -> Result<Element> {
    input.parse::<Token![<]>()?;
    let (tag, ident) = parse_tag(input)?;
    let span = ident.span();

    let mut attrs = Vec::new();
    loop {
        if input.peek(Token![/]) {
            input.parse::<Token![/]>()?;
            input.parse::<Token![>]>()?;
            return Ok(Element {
                tag,
                span,
                attrs,
                children: Vec::new(),
            });
        }
        if input.peek(Token![>]) {
            input.parse::<Token![>]>()?;
            break;
        }
        attrs.push(parse_attribute(input)?);
    }

    let mut children = Vec::new();
    loop {
        if input.peek(Token![<]) && input.peek2(Token![/]) {
            input.parse::<Token![<]>()?;
            input.parse::<Token![/]>()?;
            let closing: Ident = input.parse()?;
            if closing != ident {
                return Err(Error::new(
                    closing.span(),
                    format!("mismatched closing tag: expected `</{ident}>`, found `</{closing}>`"),
                ));
            }
            input.parse::<Token![>]>()?;
            break;
        }
        if input.peek(Token![<]) {
            children.push(parse_element(input)?);
        } else {
            return Err(input.error("expected `<` to start a child element or `</` to close the parent"));
        }
    }

    if tag == Tag::MenuItem && !children.is_empty() {
        return Err(Error::new(span, "`<menuitem>` cannot have children, use `<menu>` for a submenu"));
    }

    Ok(Element {
        tag,
        span,
        attrs,
        children,
    })
}

// ---------------------------------------------------------------------------
// Code generation
// ---------------------------------------------------------------------------

/// Check an element's attributes and return its ID literal.
fn check_element(elem: &Element) -> Result<LitStr> {
    let mut id = None;
    let mut separator = false;
    let mut has_content = false;

    for attr in &elem.attrs {
        let name = attr.name.to_string();
        match (name.as_str(), &attr.value) {
            ("id", AttrValue::Str(value)) => {
                if value.value().is_empty() {
                    return Err(Error::new(value.span(), "`id` cannot be empty"));
                }
                id = Some(value.clone());
            }
            ("separator", AttrValue::Flag(flag)) => separator = *flag,
            ("label" | "onclick", AttrValue::Str(_)) => has_content = true,
            (n, AttrValue::Str(_)) if STRING_ATTRS.iter().any(|(a, _)| *a == n) => {}
            (n, AttrValue::Flag(_)) if FLAG_ATTRS.iter().any(|(a, _)| *a == n) => {}
            (n, _) if n == "id" || STRING_ATTRS.iter().any(|(a, _)| *a == n) => {
                return Err(Error::new(attr.name.span(), format!("`{n}` takes a string value")));
            }
            (n, _) if FLAG_ATTRS.iter().any(|(a, _)| *a == n) => {
                return Err(Error::new(attr.name.span(), format!("`{n}` is a flag")));
            }
            (n, _) => {
                return Err(Error::new(attr.name.span(), format!("unknown attribute `{n}`")));
            }
        }
    }

    if separator && elem.tag == Tag::Menu {
        return Err(Error::new(elem.span, "a `<menu>` cannot be a separator"));
    }
    if separator && has_content {
        return Err(Error::new(elem.span, "a separator cannot have a label or onclick"));
    }
    id.ok_or_else(|| Error::new(elem.span, "missing required attribute `id`"))
}

/// Generate code for a single element.
fn generate_element(elem: &Element) -> Result<TokenStream> {
    let id = check_element(elem)?;
    let constructor = match elem.tag {
        Tag::Menu => quote! { ::gilt_menu::descriptor::MenuDescriptor::container(#id) },
        Tag::MenuItem => quote! { ::gilt_menu::descriptor::MenuDescriptor::item(#id) },
    };

    let mut builder_calls = Vec::new();
    for attr in &elem.attrs {
        let name = attr.name.to_string();
        let method = STRING_ATTRS
            .iter()
            .chain(FLAG_ATTRS)
            .find(|(a, _)| *a == name)
            .map(|(_, m)| Ident::new(m, attr.name.span()));
        let Some(method) = method else { continue };
        match &attr.value {
            AttrValue::Str(value) => builder_calls.push(quote! { .#method(#value) }),
            AttrValue::Flag(flag) => builder_calls.push(quote! { .#method(#flag) }),
        }
    }

    for child in &elem.children {
        let child_code = generate_element(child)?;
        builder_calls.push(quote! { .with_child(#child_code) });
    }

    Ok(quote! {
        #constructor #(#builder_calls)*
    })
}

/// Entry point: generate code for the whole menu! invocation.
pub(crate) fn menu_impl(input: TokenStream) -> Result<TokenStream> {
    let parsed: MenuInput = syn::parse2(input)?;
    generate_element(&parsed.root)
}

// ===========================================================================
// Tests
// ===========================================================================
