//! Proc macros for gilt-menu: `menu!` declarative descriptor trees.
//!
//! This crate is not meant to be used directly; enable the `macros` feature on `gilt-menu`.

use proc_macro::TokenStream;

mod menu_macro;

/// Element-syntax menu description macro.
///
/// Expands into a `gilt_menu::descriptor::MenuDescriptor` built with its
/// builder API, ready for `Engine::create` or `Engine::render_tree`.
///
/// # Syntax
///
/// - `<menu id=".."> ... </menu>`: a container (submenu when nested)
/// - `<menuitem id=".." />`: an item
///
/// # Attributes
///
/// - `id="value"` is required on every element
/// - `label`, `onclick`, `keys`, `compo`, `elem` take strings
/// - `separator` and `disabled` are flags: bare, or `=true` / `=false`
///
/// Separator rules are checked at compile time.
///
/// # Example
///
/// ```ignore
/// let desc = menu! {
///     <menu id="main">
///         <menu id="file" label="File">
///             <menuitem id="open" label="Open" onclick="doOpen" keys="cmdorctrl+o" />
///             <menuitem id="sep" separator />
///             <menuitem id="quit" label="Quit" onclick="doQuit" />
///         </menu>
///     </menu>
/// };
/// ```
#[proc_macro]
pub fn menu(input: TokenStream) -> TokenStream {
    menu_macro::menu_impl(input.into())
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
