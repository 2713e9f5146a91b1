// src/integrations/firestore/mod.rs

pub mod client;

pub use client::{
    ArrayValue, Document, FieldValue, FirestoreClient, FirestoreConfig, StructuredQuery,
};
