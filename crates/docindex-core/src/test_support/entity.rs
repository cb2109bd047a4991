use crate::key::Key;

///
/// Macro
///
/// Declares a test entity: the struct (plus `key` and `namespace`), its
/// field annotations and the capability traits the engine needs.
///

macro_rules! test_entity {
    (
        $(#[$meta:meta])*
        struct $entity:ident, kind: $kind:literal {
            $($field:ident : $ty:ty = $tag:literal),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq)]
        pub struct $entity {
            pub key: Option<$crate::key::Key>,
            pub namespace: String,
            $(pub $field: $ty,)*
        }

        impl $crate::traits::EntityKind for $entity {
            fn key(&self) -> Option<&$crate::key::Key> {
                self.key.as_ref()
            }

            fn namespace(&self) -> &str {
                &self.namespace
            }

            fn kind(&self) -> &str {
                $kind
            }
        }

        impl $crate::traits::EntitySchema for $entity {
            const FIELDS: &'static [$crate::model::field::FieldModel] = &[
                $($crate::model::field::FieldModel::new(stringify!($field), $tag),)*
            ];
        }

        impl $crate::traits::FieldValues for $entity {
            fn get_value(&self, field: &str) -> Option<$crate::value::Value> {
                match field {
                    $(stringify!($field) => Some($crate::value::Value::from(self.$field.clone())),)*
                    _ => None,
                }
            }
        }

        impl $crate::traits::PropertyLoadSaver for $entity {
            fn load(
                &mut self,
                properties: Vec<$crate::db::property::Property>,
            ) -> Result<(), $crate::error::InternalError> {
                for property in properties {
                    match property.name.as_str() {
                        $(stringify!($field) => {
                            self.$field =
                                $crate::test_support::FromValue::from_value(&property.value)?;
                        })*
                        _ => {}
                    }
                }

                Ok(())
            }

            fn save(
                &self,
            ) -> Result<Vec<$crate::db::property::Property>, $crate::error::InternalError> {
                Ok(vec![
                    $($crate::db::property::Property::new(stringify!($field), self.$field.clone()),)*
                ])
            }
        }

        impl $crate::traits::KeyLoader for $entity {
            fn load_key(
                &mut self,
                key: $crate::key::Key,
            ) -> Result<(), $crate::error::InternalError> {
                self.key = Some(key);
                Ok(())
            }
        }
    };
}

test_entity! {
    /// Single unique index on `email`.
    struct User, kind: "user" {
        first_name: String = "",
        last_name: String = "",
        email: String = r#"index:"email,unique""#,
    }
}

impl User {
    pub fn new(key: Key, first_name: &str, last_name: &str, email: &str) -> Self {
        Self {
            namespace: key.namespace.clone(),
            key: Some(key),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
        }
    }
}

test_entity! {
    /// `T{id, a, b(unique)}`.
    struct T, kind: "t" {
        id: i64 = "",
        a: i64 = "",
        b: i64 = r#"index:"b,unique""#,
    }
}

impl T {
    pub fn new(id: i64, a: i64, b: i64) -> Self {
        Self {
            key: Some(Key::id("t", id)),
            namespace: String::new(),
            id,
            a,
            b,
        }
    }
}

test_entity! {
    /// Composite unique index, a plain index, a malformed annotation and a
    /// unique marker outside any index.
    struct Account, kind: "account" {
        owner: String = r#"index:"owner_slug""#,
        region: String = r#"index:"region""#,
        slug: String = r#"index:"owner_slug,unique""#,
        note: String = "index:note",
        handle: Option<String> = r#"unique:"""#,
    }
}

impl Account {
    pub fn new(key: Key, owner: &str, slug: &str, region: &str) -> Self {
        Self {
            namespace: key.namespace.clone(),
            key: Some(key),
            owner: owner.to_string(),
            region: region.to_string(),
            slug: slug.to_string(),
            ..Self::default()
        }
    }
}

test_entity! {
    /// No usable index annotations.
    struct Note, kind: "note" {
        body: String = "",
        alias: String = r#"index:"""#,
    }
}
