#![allow(dead_code)]

use docindex::{InternalError, prelude::*};

///
/// User
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct User {
    pub key: Option<Key>,
    pub namespace: String,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(id: i64, name: &str, email: &str) -> Self {
        Self {
            key: Some(Key::id("user", id)),
            namespace: String::new(),
            name: name.to_string(),
            email: email.to_string(),
        }
    }
}

impl EntityKind for User {
    fn key(&self) -> Option<&Key> {
        self.key.as_ref()
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn kind(&self) -> &str {
        "user"
    }
}

impl EntitySchema for User {
    const FIELDS: &'static [FieldModel] = &[
        FieldModel::plain("name"),
        FieldModel::new("email", r#"index:"email,unique""#),
    ];
}

impl FieldValues for User {
    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "name" => Some(self.name.as_str().into()),
            "email" => Some(self.email.as_str().into()),
            _ => None,
        }
    }
}

impl PropertyLoadSaver for User {
    fn load(&mut self, properties: Vec<Property>) -> Result<(), InternalError> {
        for property in properties {
            let text = property.value.as_text().unwrap_or_default().to_string();
            match property.name.as_str() {
                "name" => self.name = text,
                "email" => self.email = text,
                _ => {}
            }
        }

        Ok(())
    }

    fn save(&self) -> Result<Vec<Property>, InternalError> {
        Ok(vec![
            Property::new("name", self.name.as_str()),
            Property::new("email", self.email.as_str()),
        ])
    }
}

impl KeyLoader for User {
    fn load_key(&mut self, key: Key) -> Result<(), InternalError> {
        self.key = Some(key);
        Ok(())
    }
}

///
/// T
/// `{id, a, b}` with `b` unique.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct T {
    pub id: i64,
    pub a: i64,
    pub b: i64,
    key: Option<Key>,
}

impl T {
    pub fn new(id: i64, a: i64, b: i64) -> Self {
        Self {
            id,
            a,
            b,
            key: Some(Key::id("t", id)),
        }
    }

    pub fn primary(&self) -> Key {
        Key::id("t", self.id)
    }
}

impl EntityKind for T {
    fn key(&self) -> Option<&Key> {
        self.key.as_ref()
    }

    fn namespace(&self) -> &str {
        ""
    }

    fn kind(&self) -> &str {
        "t"
    }
}

impl EntitySchema for T {
    const FIELDS: &'static [FieldModel] = &[
        FieldModel::plain("id"),
        FieldModel::plain("a"),
        FieldModel::new("b", r#"index:"b,unique""#),
    ];
}

impl FieldValues for T {
    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(self.id.into()),
            "a" => Some(self.a.into()),
            "b" => Some(self.b.into()),
            _ => None,
        }
    }
}

impl PropertyLoadSaver for T {
    fn load(&mut self, properties: Vec<Property>) -> Result<(), InternalError> {
        for property in properties {
            let n = property.value.as_int().unwrap_or_default();
            match property.name.as_str() {
                "id" => self.id = n,
                "a" => self.a = n,
                "b" => self.b = n,
                _ => {}
            }
        }
        self.key = Some(Key::id("t", self.id));

        Ok(())
    }

    fn save(&self) -> Result<Vec<Property>, InternalError> {
        Ok(vec![
            Property::new("id", self.id),
            Property::new("a", self.a),
            Property::new("b", self.b),
        ])
    }
}

/// Derived record key of `T.b == b`.
pub fn t_record(b: i64) -> Key {
    let tree = tree_for::<T>();
    let keys = tree
        .keys(&Key::id("t", 0), &T::new(0, 0, b))
        .expect("derive keys");

    keys[0].key.clone()
}

/// Insert a new entity and its index records in one transaction.
pub fn create<E>(store: &MemoryStore, entity: &E) -> Result<Key, InternalError>
where
    E: Entity + PropertyLoadSaver,
{
    let key = entity.key().cloned().expect("entity key");

    store.run_in_transaction(|tx| {
        can_insert(tx, entity)?;
        tx.mutate(vec![Mutation::insert(key.clone(), entity.save()?)])?;
        insert_indexer(key.clone(), entity).index(tx)?;
        Ok(key.clone())
    })
}

/// Replace a stored entity, moving changed index records.
pub fn replace<E>(store: &MemoryStore, entity: &E) -> Result<(), InternalError>
where
    E: Entity + Default + PropertyLoadSaver,
{
    let key = entity.key().cloned().expect("entity key");

    store.run_in_transaction(|tx| {
        check(tx, entity)?;
        update_indexer(key.clone(), entity).index(tx)?;
        tx.mutate(vec![Mutation::update(key.clone(), entity.save()?)])
            .map(|_| ())
    })
}

/// Remove a stored entity and its index records.
pub fn remove<E>(store: &MemoryStore, key: &Key) -> Result<(), InternalError>
where
    E: Entity + Default + PropertyLoadSaver,
{
    store.run_in_transaction(|tx| {
        delete_indexer::<E>(key.clone()).index(tx)?;
        tx.delete(key)
    })
}
