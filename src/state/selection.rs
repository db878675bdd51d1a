// Working-restaurant handoff
//
// Reservations, reviews and reports are all scoped to one restaurant. The
// restaurant screen deposits the chosen row here and the dependent screens
// read it back; leaving for any non-dependent screen clears it so stale
// context can never leak into a later visit.

use crate::api::models::Restaurant;

#[derive(Debug, Default)]
pub struct SelectionHandoff {
    selected: Option<Restaurant>,
}

impl SelectionHandoff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deposit a restaurant, replacing any previous selection
    pub fn select(&mut self, restaurant: Restaurant) {
        self.selected = Some(restaurant);
    }

    pub fn get(&self) -> Option<&Restaurant> {
        self.selected.as_ref()
    }

    pub fn id(&self) -> Option<u64> {
        self.selected.as_ref().map(|r| r.restaurant_id)
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restaurant(id: u64, name: &str) -> Restaurant {
        Restaurant {
            restaurant_id: id,
            name: name.to_string(),
            description: String::new(),
            phone: String::new(),
            food_type: String::new(),
            total_seats: 0,
            parking_available: false,
            city: String::new(),
            district: String::new(),
            neighborhood: String::new(),
            road_addr: String::new(),
            jibun_addr: String::new(),
            detail_addr: String::new(),
        }
    }

    #[test]
    fn test_starts_empty() {
        let handoff = SelectionHandoff::new();
        assert!(handoff.get().is_none());
        assert_eq!(handoff.id(), None);
    }

    #[test]
    fn test_select_overwrites_previous() {
        let mut handoff = SelectionHandoff::new();
        handoff.select(restaurant(1, "A"));
        handoff.select(restaurant(2, "B"));

        let held = handoff.get().unwrap();
        assert_eq!(held.restaurant_id, 2);
        assert_eq!(held.name, "B");
    }

    #[test]
    fn test_clear_empties_the_slot() {
        let mut handoff = SelectionHandoff::new();
        handoff.select(restaurant(1, "A"));
        handoff.clear();
        assert!(handoff.get().is_none());
    }
}
