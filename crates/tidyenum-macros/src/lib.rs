//! # tidyenum-macros
//!
//! `#[derive(LabelledEnum)]` for fieldless enums.
//!
//! This crate is independent of the other tidyenum crates because proc-macro
//! crates cannot depend on crates that use them. Generated code refers to
//! `::tidyenum_db` unless `#[labelled(crate = "...")]` names another path.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod labelled;

/// Implements `LabelledEnum` and `From<Self> for FieldValue`.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, LabelledEnum)]
/// #[labelled(name = "Status")]
/// enum Status {
///     #[labelled(value = 1, label = "Active")]
///     Active,
///     #[labelled(value = 2, label = "Done")]
///     Done,
/// }
/// ```
#[proc_macro_derive(LabelledEnum, attributes(labelled))]
pub fn derive_labelled_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    labelled::derive_labelled_enum_impl(input).into()
}
