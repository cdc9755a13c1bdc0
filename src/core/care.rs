//! Static plant-care library.

use chrono::{Datelike, NaiveDate};

pub struct CareCategory {
    pub title: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

pub struct PopularPlant {
    pub name: &'static str,
    pub difficulty: &'static str,
}

pub struct CareTip {
    pub title: &'static str,
    pub body: &'static str,
}

pub const CATEGORIES: &[CareCategory] = &[
    CareCategory {
        title: "Watering Guide",
        icon: "💧",
        description: "Learn how to water your plants effectively.",
    },
    CareCategory {
        title: "Light Requirements",
        icon: "☀️",
        description: "Understand the sunlight needs of different plants.",
    },
    CareCategory {
        title: "Fertilizing Tips",
        icon: "🍃",
        description: "Discover the best fertilizers for your plants.",
    },
    CareCategory {
        title: "Pest Control",
        icon: "🐛",
        description: "Protect your plants from common pests and diseases.",
    },
];

pub const POPULAR_PLANTS: &[PopularPlant] = &[
    PopularPlant {
        name: "Monstera",
        difficulty: "Medium",
    },
    PopularPlant {
        name: "Snake Plant",
        difficulty: "Easy",
    },
    PopularPlant {
        name: "Fiddle Leaf Fig",
        difficulty: "Difficult",
    },
];

const TIPS: &[CareTip] = &[
    CareTip {
        title: "Check before you water",
        body: "Push a finger into the soil: water only when the top inch is dry.",
    },
    CareTip {
        title: "Rotate your pots",
        body: "Turn plants a quarter turn each week so they grow evenly toward the light.",
    },
    CareTip {
        title: "Dust the leaves",
        body: "Wipe large leaves with a damp cloth so they can absorb more light.",
    },
    CareTip {
        title: "Feed in the growing season",
        body: "Fertilize monthly in spring and summer, and pause during winter dormancy.",
    },
    CareTip {
        title: "Mind the drainage",
        body: "Always use pots with drainage holes and empty saucers after watering.",
    },
];

/// One tip per calendar day, cycling through the list.
pub fn tip_of_the_day(date: NaiveDate) -> &'static CareTip {
    &TIPS[date.ordinal0() as usize % TIPS.len()]
}
