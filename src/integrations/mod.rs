// src/integrations/mod.rs
//
// External Integrations Module

pub mod blobstore;
pub mod cloudinary;
pub mod firestore;

pub use blobstore::{BlobStore, BlobStoreConfig, RemoteBlobStore};
pub use firestore::{Document, FieldValue, FirestoreClient, FirestoreConfig, StructuredQuery};
