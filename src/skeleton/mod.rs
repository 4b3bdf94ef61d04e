//! Placeholder cards for the loading view
//!
//! The loading skeleton cycles through plausible-looking cards drawn from
//! real data when it is available and from built-in samples otherwise.

use crate::places::{fallback_places, PlaceRecord};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// One shuffled placeholder card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkeletonCard {
    pub name: String,
    pub city: String,
    pub hours: String,
    pub rating: f64,
    /// Number shown in the "Found N coffee places" header
    pub count: u32,
}

impl SkeletonCard {
    fn from_place<R: Rng + ?Sized>(place: &PlaceRecord, rng: &mut R) -> Self {
        Self {
            name: place.name.clone(),
            city: place.city.clone().unwrap_or_else(|| "Unknown".to_string()),
            hours: place
                .open_hours
                .as_ref()
                .map(|h| h.display())
                .unwrap_or_else(|| "Hours not available".to_string()),
            rating: (place.rating * 10.0).round() / 10.0,
            count: rng.gen_range(2..=9),
        }
    }
}

/// Records to draw placeholder cards from
pub struct SkeletonPool {
    places: RwLock<Arc<Vec<PlaceRecord>>>,
}

impl Default for SkeletonPool {
    fn default() -> Self {
        Self::new()
    }
}

impl SkeletonPool {
    /// Pool seeded with the built-in sample places
    pub fn new() -> Self {
        Self {
            places: RwLock::new(Arc::new(fallback_places())),
        }
    }

    /// Replace the pool; empty batches are ignored
    pub fn replace(&self, places: Vec<PlaceRecord>) {
        if places.is_empty() {
            return;
        }
        debug!("Skeleton pool now holds {} places", places.len());
        *self.places.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(places);
    }

    pub fn len(&self) -> usize {
        self.places
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Draw a random card
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<SkeletonCard> {
        let places = self
            .places
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        places
            .choose(rng)
            .map(|place| SkeletonCard::from_place(place, rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_starts_with_fallback_samples() {
        let pool = SkeletonPool::new();
        assert_eq!(pool.len(), 10);

        let mut rng = StdRng::seed_from_u64(7);
        let card = pool.sample(&mut rng).unwrap();
        assert!((2..=9).contains(&card.count));
        assert!(!card.name.is_empty());
    }

    #[test]
    fn test_card_placeholders_for_missing_data() {
        let pool = SkeletonPool::new();
        pool.replace(vec![PlaceRecord::new("1", "Mystery Beans", 4.26)]);

        let mut rng = StdRng::seed_from_u64(1);
        let card = pool.sample(&mut rng).unwrap();
        assert_eq!(card.city, "Unknown");
        assert_eq!(card.hours, "Hours not available");
        assert_eq!(card.rating, 4.3);
    }

    #[test]
    fn test_empty_batch_keeps_pool() {
        let pool = SkeletonPool::new();
        pool.replace(vec![]);
        assert_eq!(pool.len(), 10);
    }

    #[test]
    fn test_hours_formatting() {
        let place = PlaceRecord::new("1", "x", 4.0).with_hours("07:30", "17:30");
        let mut rng = StdRng::seed_from_u64(3);
        let card = SkeletonCard::from_place(&place, &mut rng);
        assert_eq!(card.hours, "07:30 - 17:30");
    }
}
