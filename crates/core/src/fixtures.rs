//! Startup-time loading of the canned response documents.
//!
//! Every response this backend serves is a pre-authored JSON document. The
//! set is embedded in the binary (the `data/` directory at the workspace
//! root); an operator can point `fixtures.data_dir` at a directory to serve
//! edited copies instead. Loading happens once, before the listener binds;
//! a missing or unparsable document aborts startup.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("could not read fixture file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse fixture `{name}`: {source}")]
    Parse { name: String, source: serde_json::Error },
}

/// Immutable set of canned documents, loaded once and shared by handle.
#[derive(Clone, Debug)]
pub struct FixtureStore {
    shop_multi_property_search: Arc<Value>,
    shop_property_offers: Arc<Value>,
    shop_calendar_availability: Arc<Value>,
    shop_offer_detail: Arc<Value>,
    book_create_success: Arc<Value>,
    book_create_cc_guaranteed: Arc<Value>,
    book_cancellation: Arc<Value>,
}

impl FixtureStore {
    /// Loads the full document set, preferring `data_dir` over the embedded
    /// copies when given. Any failure is fatal to the caller.
    pub fn load(data_dir: Option<&Path>) -> Result<Self, FixtureError> {
        let store = Self {
            shop_multi_property_search: load_document(
                data_dir,
                "shop-multi-property-search.json",
                include_str!("../../../data/shop-multi-property-search.json"),
            )?,
            shop_property_offers: load_document(
                data_dir,
                "shop-property-offers.json",
                include_str!("../../../data/shop-property-offers.json"),
            )?,
            shop_calendar_availability: load_document(
                data_dir,
                "shop-calendar-availability.json",
                include_str!("../../../data/shop-calendar-availability.json"),
            )?,
            shop_offer_detail: load_document(
                data_dir,
                "shop-offer-detail.json",
                include_str!("../../../data/shop-offer-detail.json"),
            )?,
            book_create_success: load_document(
                data_dir,
                "book-create-reservation-success.json",
                include_str!("../../../data/book-create-reservation-success.json"),
            )?,
            book_create_cc_guaranteed: load_document(
                data_dir,
                "book-create-reservation-cc-guaranteed.json",
                include_str!("../../../data/book-create-reservation-cc-guaranteed.json"),
            )?,
            book_cancellation: load_document(
                data_dir,
                "book-cancel-reservation.json",
                include_str!("../../../data/book-cancel-reservation.json"),
            )?,
        };
        info!(document_count = store.document_count(), "canned documents loaded");
        Ok(store)
    }

    pub fn shop_multi_property_search(&self) -> Arc<Value> {
        Arc::clone(&self.shop_multi_property_search)
    }

    pub fn shop_property_offers(&self) -> Arc<Value> {
        Arc::clone(&self.shop_property_offers)
    }

    pub fn shop_calendar_availability(&self) -> Arc<Value> {
        Arc::clone(&self.shop_calendar_availability)
    }

    pub fn shop_offer_detail(&self) -> Arc<Value> {
        Arc::clone(&self.shop_offer_detail)
    }

    pub fn book_create_success(&self) -> Arc<Value> {
        Arc::clone(&self.book_create_success)
    }

    pub fn book_create_cc_guaranteed(&self) -> Arc<Value> {
        Arc::clone(&self.book_create_cc_guaranteed)
    }

    pub fn book_cancellation(&self) -> Arc<Value> {
        Arc::clone(&self.book_cancellation)
    }

    pub fn document_count(&self) -> usize {
        7
    }
}

fn load_document(
    data_dir: Option<&Path>,
    name: &str,
    embedded: &str,
) -> Result<Arc<Value>, FixtureError> {
    let raw = match data_dir {
        Some(dir) => {
            let path = dir.join(name);
            fs::read_to_string(&path).map_err(|source| FixtureError::ReadFile { path, source })?
        }
        None => embedded.to_owned(),
    };

    let document = serde_json::from_str(&raw)
        .map_err(|source| FixtureError::Parse { name: name.to_owned(), source })?;
    info!(fixture = name, "loaded canned document");
    Ok(Arc::new(document))
}
