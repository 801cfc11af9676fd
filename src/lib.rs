//! Typed route table generation for file-system routed page apps.
//!
//! Page files laid out like `apps/admin/src/app/brands/[id]/page.tsx` become
//! entries of a generated TypeScript module keyed by route id
//! (`brandsIdDetail`), with path parameters and search parameters typed from
//! the page source where it declares them.

pub mod cli;
pub mod config;
pub mod emit;
pub mod error;
pub mod logging;
pub mod regen;
pub mod routes;
pub mod signature;
pub mod watcher;

pub use config::Settings;
pub use emit::{JsonEmitter, TypeScriptEmitter};
pub use error::{RouteGenError, RouteGenResult};
pub use regen::{RegenOutcome, Regenerate, Regenerator};
pub use routes::{RouteCollection, RouteParamType, RouteRecord, collect_routes};
pub use signature::{PartialSignature, SignatureExtractor, extract_signature};
