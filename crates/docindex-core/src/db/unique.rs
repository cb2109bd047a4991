//! Module: unique
//! Responsibility: write-time uniqueness checks for unique-marked fields and
//! primary keys, evaluated inside the caller's transaction.
//! Does not own: index records; a unique index also rejects duplicates on
//! insert through its derived key.

use crate::{
    PRIMARY_KEY,
    db::{
        query::{Filter, Query},
        schema::tree_for,
        store::Transaction,
    },
    error::{ConstraintKind, ErrorOrigin, InternalError},
    key::Key,
    obs::sink::{self, MetricsEvent},
    traits::Entity,
};

/// Fail when another entity of the same kind (and ancestor scope) shares
/// the value of any unique-marked field.
///
/// An entity whose key is still incomplete conflicts with every match.
pub fn check<T, E>(tx: &mut T, entity: &E) -> Result<(), InternalError>
where
    T: Transaction + ?Sized,
    E: Entity,
{
    let kind = entity.kind();
    let key = entity.key().ok_or_else(|| {
        InternalError::configuration(
            ErrorOrigin::Unique,
            format!("entity of kind '{kind}' has no key"),
        )
    })?;

    let mut queries = 0;
    let outcome = check_fields(tx, entity, key, &mut queries);

    sink::record(MetricsEvent::UniqueCheck { kind, queries });
    if let Err(err) = &outcome
        && err.constraint().is_some()
    {
        sink::record(MetricsEvent::UniqueViolation { kind });
    }

    outcome
}

fn check_fields<T, E>(
    tx: &mut T,
    entity: &E,
    key: &Key,
    queries: &mut u64,
) -> Result<(), InternalError>
where
    T: Transaction + ?Sized,
    E: Entity,
{
    let tree = tree_for::<E>();

    for &field in tree.unique_fields() {
        if field == PRIMARY_KEY {
            continue;
        }

        let value = entity.get_value(field).ok_or_else(|| {
            InternalError::index_invariant(format!(
                "unique field '{field}' of kind '{}' is not readable",
                entity.kind()
            ))
        })?;

        // own key plus one other is enough to decide
        let mut query = Query::new(entity.kind())
            .namespace(entity.namespace())
            .filter(Filter::eq(field, value))
            .keys_only()
            .limit(2);
        if let Some(parent) = key.parent() {
            query = query.ancestor(parent.clone());
        }

        *queries += 1;
        for found in tx.run_keys(&query)? {
            let found = found?;

            if key.is_incomplete() || found != *key {
                return Err(InternalError::constraint_violation(
                    ConstraintKind::Unique,
                    field,
                    entity.kind(),
                ));
            }
        }
    }

    Ok(())
}

/// Fail when the entity's complete key is already stored, then run
/// [`check`].
pub fn can_insert<T, E>(tx: &mut T, entity: &E) -> Result<(), InternalError>
where
    T: Transaction + ?Sized,
    E: Entity,
{
    if let Some(key) = entity.key()
        && key.is_complete()
    {
        match tx.get(key) {
            Ok(_) => {
                let kind = entity.kind();
                sink::record(MetricsEvent::PrimaryViolation { kind });

                return Err(InternalError::constraint_violation(
                    ConstraintKind::Primary,
                    PRIMARY_KEY,
                    kind,
                ));
            }
            Err(err) if err.is_not_found() => {}
            Err(err) => return Err(err),
        }
    }

    check(tx, entity)
}

///
/// TESTS
///
