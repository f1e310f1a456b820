//! The codec registry: a shared mapping from [`TypeKey`] to codec.
//!
//! A registry is seeded with the six scalar built-ins and extended by the
//! host with record codecs (and any custom codecs) at initialization time.
//! It is passed by reference into every encode/decode call, so codec
//! components carry no global state.
//!
//! Registration is expected to happen before concurrent encode/decode
//! traffic begins. The maps sit behind a reader-writer lock, so late
//! (re)registration is still safe: readers never observe a partially
//! updated entry. Encode/decode traffic takes read locks only, one lookup
//! at a time.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::codec::container::{MapCodec, SeqCodec};
use crate::codec::record::RecordCodec;
use crate::codec::scalar::{ByteCodec, DoubleCodec, FloatCodec, IntCodec, LongCodec, StrCodec};
use crate::codec::Codec;
use crate::derive_traits::VersionedRecord;
use crate::types::{RecordSchema, TypeKey};

pub struct Registry {
    codecs: RwLock<HashMap<TypeKey, Arc<dyn Codec>>>,
}

impl Registry {
    /// Create a registry seeded with the built-in scalar codecs.
    pub fn new() -> Self {
        let registry = Registry {
            codecs: RwLock::new(HashMap::new()),
        };
        registry.register(TypeKey::Byte, Arc::new(ByteCodec));
        registry.register(TypeKey::Int, Arc::new(IntCodec));
        registry.register(TypeKey::Long, Arc::new(LongCodec));
        registry.register(TypeKey::Float, Arc::new(FloatCodec));
        registry.register(TypeKey::Double, Arc::new(DoubleCodec));
        registry.register(TypeKey::Str, Arc::new(StrCodec));
        registry
    }

    /// Register a codec under a key, returning the previous codec if any.
    pub fn register(&self, key: TypeKey, codec: Arc<dyn Codec>) -> Option<Arc<dyn Codec>> {
        self.codecs.write().unwrap().insert(key, codec)
    }

    /// Remove the codec under a key, returning it if it was registered.
    pub fn remove(&self, key: &TypeKey) -> Option<Arc<dyn Codec>> {
        self.codecs.write().unwrap().remove(key)
    }

    /// Look up the codec registered under a key.
    pub fn retrieve(&self, key: &TypeKey) -> Option<Arc<dyn Codec>> {
        self.codecs.read().unwrap().get(key).cloned()
    }

    /// Resolve the codec for a key: registered codecs take precedence,
    /// unregistered container keys resolve to the generic container
    /// codecs. `None` means no codec can handle the key; callers report
    /// that as an unsupported type.
    pub fn codec_for(&self, key: &TypeKey) -> Option<Arc<dyn Codec>> {
        if let Some(codec) = self.retrieve(key) {
            return Some(codec);
        }
        match key {
            TypeKey::Seq(elem) => Some(Arc::new(SeqCodec::new((**elem).clone()))),
            TypeKey::Map(k, v) => Some(Arc::new(MapCodec::new((**k).clone(), (**v).clone()))),
            _ => None,
        }
    }

    /// Build and register the record codec for a derived record type.
    ///
    /// The schema is built here, once; the registered codec holds it for
    /// the registry's lifetime. Returns the previously registered codec
    /// for the type, if any.
    pub fn register_record<T: VersionedRecord>(&self) -> Option<Arc<dyn Codec>> {
        self.register_schema(T::schema())
    }

    /// Register a record codec for a hand-built schema.
    pub fn register_schema(&self, schema: RecordSchema) -> Option<Arc<dyn Codec>> {
        let key = TypeKey::Record(schema.name.clone());
        self.register(key, Arc::new(RecordCodec::new(schema)))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
