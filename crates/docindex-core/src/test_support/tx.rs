use crate::{
    db::{
        property::Property,
        query::Query,
        store::{MemoryTransaction, Mutation, Transaction},
    },
    error::InternalError,
    key::Key,
};

///
/// RecordingTx
///
/// Transaction wrapper recording every submitted batch, with optional read
/// failure injection.
///

pub struct RecordingTx {
    inner: MemoryTransaction,
    pub batches: Vec<Vec<Mutation>>,
    pub reads: usize,
    pub queries: usize,
    fail_reads: bool,
}

impl RecordingTx {
    pub const fn new(inner: MemoryTransaction) -> Self {
        Self {
            inner,
            batches: Vec::new(),
            reads: 0,
            queries: 0,
            fail_reads: false,
        }
    }

    pub const fn failing_reads(inner: MemoryTransaction) -> Self {
        let mut tx = Self::new(inner);
        tx.fail_reads = true;
        tx
    }

    pub fn mutation_count(&self) -> usize {
        self.batches.iter().map(Vec::len).sum()
    }

    pub fn commit(self) -> Result<(), InternalError> {
        self.inner.commit()
    }
}

impl Transaction for RecordingTx {
    type Keys = <MemoryTransaction as Transaction>::Keys;

    fn get(&mut self, key: &Key) -> Result<Vec<Property>, InternalError> {
        self.reads += 1;
        if self.fail_reads {
            return Err(InternalError::store_internal("injected read failure"));
        }

        self.inner.get(key)
    }

    fn mutate(&mut self, mutations: Vec<Mutation>) -> Result<Vec<Key>, InternalError> {
        self.batches.push(mutations.clone());
        self.inner.mutate(mutations)
    }

    fn run_keys(&mut self, query: &Query) -> Result<Self::Keys, InternalError> {
        self.queries += 1;
        self.inner.run_keys(query)
    }
}
