//! Concrete record types of the administration panel.
//!
//! Each module pairs a record with its draft. Drafts hold exactly the fields
//! the add/edit form shows; system-assigned fields (id, creation stamps)
//! live only on the record.

pub mod category;
pub mod client;
pub mod product;
pub mod supplier;
pub mod user;

pub use category::{Category, CategoryDraft};
pub use client::{Client, ClientDraft};
pub use product::{Product, ProductDraft};
pub use supplier::{Supplier, SupplierDraft};
pub use user::{User, UserDraft};
