//! Destination records shown on the globe

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use uuid::Uuid;

use crate::spatial::GeoCoordinate;

/// Rough cost bracket of a destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceRange {
    Budget,
    Mid,
    Premium,
    Luxury,
}

impl PriceRange {
    pub const ALL: [PriceRange; 4] = [
        PriceRange::Budget,
        PriceRange::Mid,
        PriceRange::Premium,
        PriceRange::Luxury,
    ];

    /// Dollar-sign label, `$` to `$$$$`
    pub fn symbol(&self) -> &'static str {
        match self {
            PriceRange::Budget => "$",
            PriceRange::Mid => "$$",
            PriceRange::Premium => "$$$",
            PriceRange::Luxury => "$$$$",
        }
    }
}

/// A travel destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub id: Uuid,
    pub name: String,
    pub country: String,
    pub tagline: String,
    pub description: String,
    pub image_name: String,
    pub coordinate: GeoCoordinate,
    pub price_range: PriceRange,
    pub tags: Vec<String>,
}

impl Destination {
    /// New destination with a fresh random id and no copy or tags
    pub fn new(
        name: impl Into<String>,
        country: impl Into<String>,
        coordinate: GeoCoordinate,
        price_range: PriceRange,
    ) -> Self {
        let name = name.into();
        Self {
            id: Uuid::new_v4(),
            image_name: name.to_lowercase(),
            name,
            country: country.into(),
            tagline: String::new(),
            description: String::new(),
            coordinate,
            price_range,
            tags: Vec::new(),
        }
    }

    pub fn with_tagline(mut self, tagline: impl Into<String>) -> Self {
        self.tagline = tagline.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Built-in catalogue. Ids are fixed so they survive restarts.
    pub fn samples() -> &'static [Destination] {
        static SAMPLES: OnceLock<Vec<Destination>> = OnceLock::new();
        SAMPLES.get_or_init(|| {
            vec![
                sample(1, "Kyoto", "Japan", (35.0116, 135.7681), PriceRange::Mid)
                    .with_tagline("Ancient temples, modern calm")
                    .with_description(
                        "Traditional temples, bamboo groves, and zen gardens set against a \
                         backdrop of mountains.",
                    )
                    .with_tags(["culture", "temples", "nature"]),
                sample(2, "Santorini", "Greece", (36.3932, 25.4615), PriceRange::Premium)
                    .with_tagline("White walls, blue domes")
                    .with_description(
                        "Caldera views and whitewashed villages perched on volcanic cliffs.",
                    )
                    .with_tags(["beach", "romantic", "photography"]),
                sample(3, "Marrakech", "Morocco", (31.6295, -7.9811), PriceRange::Budget)
                    .with_tagline("Colors, spices, chaos")
                    .with_description(
                        "Souks, ornate riads, and the Atlas Mountains on the horizon.",
                    )
                    .with_tags(["culture", "food", "adventure"]),
                sample(4, "Reykjavik", "Iceland", (64.1466, -21.9426), PriceRange::Premium)
                    .with_tagline("Fire and ice")
                    .with_description("Gateway to glaciers, geysers, and the northern lights.")
                    .with_tags(["nature", "adventure", "photography"]),
                sample(5, "Lisbon", "Portugal", (38.7223, -9.1393), PriceRange::Budget)
                    .with_tagline("Tiles, trams, pastéis")
                    .with_description(
                        "Hilly streets, azulejo facades, and a food scene full of character.",
                    )
                    .with_tags(["food", "culture", "nightlife"]),
            ]
        })
    }
}

/// Catalogue entry with a stable id
fn sample(
    n: u128,
    name: &str,
    country: &str,
    (latitude, longitude): (f64, f64),
    price_range: PriceRange,
) -> Destination {
    Destination::new(name, country, GeoCoordinate::new(latitude, longitude), price_range)
        .with_id(Uuid::from_u128(0x6b1d_41f0_2c7e_4b8a_9f31_0a5e_7c11_0000 + n))
}
