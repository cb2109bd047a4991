use convert_case::{Case, Casing};

/// Convert a Rust type name (`UserAccount`) into a store kind (`user_account`).
///
/// Only the last path segment is used, so `crate::model::UserAccount` also
/// maps to `user_account`.
#[must_use]
pub fn kind_name(type_name: &str) -> String {
    let last = type_name.rsplit("::").next().unwrap_or(type_name);

    last.to_case(Case::Snake)
}

///
/// TESTS
///
