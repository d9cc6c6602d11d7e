//! Derive macros for the marker traits of `rusty_ecs`.
//!
//! Each derive emits an empty impl of the matching trait. Paths are absolute
//! (`::rusty_ecs::ecs::...`), which resolves inside the engine crate through
//! `extern crate self as rusty_ecs;` and outside of it through the normal dependency.
mod marker;

use proc_macro::TokenStream;

#[proc_macro_derive(Component)]
pub fn derive_component(item: TokenStream) -> TokenStream {
    marker::derive_marker(item, "Component")
}

#[proc_macro_derive(Resource)]
pub fn derive_resource(item: TokenStream) -> TokenStream {
    marker::derive_marker(item, "Resource")
}

/// States must also be `Clone + PartialEq + Debug`; the derive only adds the marker impl.
#[proc_macro_derive(State)]
pub fn derive_state(item: TokenStream) -> TokenStream {
    marker::derive_marker(item, "State")
}
