//! Built-in place data used when the API is unreachable

use super::models::PlaceRecord;

/// Sample places for loading placeholders
pub fn fallback_places() -> Vec<PlaceRecord> {
    vec![
        PlaceRecord::new("1", "Coffee Company", 4.3)
            .with_city("Amsterdam")
            .with_hours("08:00", "18:00")
            .with_tags(["wifi", "cozy"]),
        PlaceRecord::new("2", "Café de Reiger", 4.5)
            .with_city("Amsterdam")
            .with_hours("09:00", "19:00")
            .with_tags(["wifi", "cozy", "outdoor"]),
        PlaceRecord::new("3", "The Coffee Room", 4.7)
            .with_city("Rotterdam")
            .with_hours("07:30", "17:30")
            .with_tags(["wifi", "pet-friendly"]),
        PlaceRecord::new("4", "Espresso Bar", 4.2)
            .with_city("Rotterdam")
            .with_hours("08:00", "18:00")
            .with_tags(["wifi"]),
        PlaceRecord::new("5", "Java Coffee House", 4.6)
            .with_city("Utrecht")
            .with_hours("08:30", "19:00")
            .with_tags(["wifi", "cozy", "quiet"]),
        PlaceRecord::new("6", "Café de Koffieboon", 4.4)
            .with_city("Amsterdam")
            .with_hours("07:00", "20:00")
            .with_tags(["wifi", "outdoor", "cozy"]),
        PlaceRecord::new("7", "Morning Brew", 4.8)
            .with_city("The Hague")
            .with_hours("06:30", "16:30")
            .with_tags(["wifi", "pet-friendly", "cozy"]),
        PlaceRecord::new("8", "Bean There", 4.1)
            .with_city("Eindhoven")
            .with_hours("09:00", "18:00")
            .with_tags(["wifi"]),
        PlaceRecord::new("9", "Café Central", 4.3)
            .with_city("Groningen")
            .with_hours("08:00", "17:00")
            .with_tags(["cozy", "quiet"]),
        PlaceRecord::new("10", "The Roastery", 4.9)
            .with_city("Amsterdam")
            .with_hours("07:00", "19:00")
            .with_tags(["wifi", "cozy", "outdoor", "pet-friendly"]),
    ]
}
