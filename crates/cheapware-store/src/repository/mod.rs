//! # Repository Module
//!
//! In-memory repositories for the storefront.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP handler                                                           │
//! │       │                                                                 │
//! │       │  store.products().list(&query)                                  │
//! │       ▼                                                                 │
//! │  ProductRepository                                                      │
//! │  ├── list / get / featured / related / facets                           │
//! │  └── insert / update / delete                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Arc<RwLock<Vec<Product>>>  (one lock per collection)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Catalog CRUD and queries
//! - [`ReviewRepository`](review::ReviewRepository) - Reviews and votes

pub mod product;
pub mod review;
