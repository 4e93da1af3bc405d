//! Shop lookup: availability search, offers, calendar, and offer detail.
//!
//! Each operation returns its pre-loaded document unchanged. Request
//! parameters are part of the wire contract and are logged, but they never
//! filter the canned response.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::fixtures::FixtureStore;

#[derive(Clone, Debug)]
pub struct ShopCatalog {
    multi_property_search: Arc<Value>,
    property_offers: Arc<Value>,
    calendar_availability: Arc<Value>,
    offer_detail: Arc<Value>,
}

impl ShopCatalog {
    pub fn new(fixtures: &FixtureStore) -> Self {
        Self {
            multi_property_search: fixtures.shop_multi_property_search(),
            property_offers: fixtures.shop_property_offers(),
            calendar_availability: fixtures.shop_calendar_availability(),
            offer_detail: fixtures.shop_offer_detail(),
        }
    }

    pub fn search_properties(&self) -> Arc<Value> {
        debug!("returning multi-property search document");
        Arc::clone(&self.multi_property_search)
    }

    pub fn property_offers(&self, hotel_code: &str) -> Arc<Value> {
        debug!(hotel_code, "returning property offers document");
        Arc::clone(&self.property_offers)
    }

    pub fn calendar_availability(&self, hotel_code: &str) -> Arc<Value> {
        debug!(hotel_code, "returning calendar availability document");
        Arc::clone(&self.calendar_availability)
    }

    pub fn offer_detail(&self, hotel_code: &str, room_type: &str, rate_plan_code: &str) -> Arc<Value> {
        debug!(hotel_code, room_type, rate_plan_code, "returning offer detail document");
        Arc::clone(&self.offer_detail)
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures::FixtureStore;

    use super::ShopCatalog;

    #[test]
    fn lookups_return_the_same_document_regardless_of_parameters() {
        let fixtures = FixtureStore::load(None).expect("fixtures should load");
        let catalog = ShopCatalog::new(&fixtures);

        let offers_ny = catalog.property_offers("XSBOXD1");
        let offers_unknown = catalog.property_offers("NOSUCH");
        assert_eq!(*offers_ny, *offers_unknown);

        let detail = catalog.offer_detail("XSBOXD1", "A1K", "FLEX");
        assert_eq!(detail["offer"]["ratePlan"]["ratePlanCode"], "FLEX");

        let search = catalog.search_properties();
        assert_eq!(search["roomStays"].as_array().map(Vec::len), Some(4));
    }
}
