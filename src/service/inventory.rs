//! Demo inventory and the default manufacturer list

use crate::core::site::{Listing, Manufacturer};

struct DemoVehicle {
    year: u16,
    make: &'static str,
    model: &'static str,
    trim: &'static str,
    price: f64,
    mileage: u64,
    condition: &'static str,
}

const DEMO_VEHICLES: &[DemoVehicle] = &[
    DemoVehicle { year: 2024, make: "Ford", model: "F-150", trim: "XLT", price: 52995.0, mileage: 12, condition: "new" },
    DemoVehicle { year: 2024, make: "Toyota", model: "RAV4", trim: "XLE Premium", price: 36450.0, mileage: 8, condition: "new" },
    DemoVehicle { year: 2023, make: "Honda", model: "Civic", trim: "Sport", price: 24990.0, mileage: 9870, condition: "used" },
    DemoVehicle { year: 2022, make: "Chevrolet", model: "Silverado 1500", trim: "LT", price: 41200.0, mileage: 28450, condition: "used" },
    DemoVehicle { year: 2024, make: "Hyundai", model: "Tucson", trim: "SEL", price: 31875.0, mileage: 15, condition: "new" },
    DemoVehicle { year: 2021, make: "Jeep", model: "Wrangler", trim: "Sahara", price: 38900.0, mileage: 34120, condition: "certified" },
    DemoVehicle { year: 2023, make: "Subaru", model: "Outback", trim: "Limited", price: 33750.0, mileage: 11200, condition: "certified" },
    DemoVehicle { year: 2024, make: "Kia", model: "Telluride", trim: "EX", price: 44190.0, mileage: 5, condition: "new" },
];

/// A fixed set of listings for previews and onboarding.
pub fn demo_inventory() -> Vec<Listing> {
    DEMO_VEHICLES
        .iter()
        .enumerate()
        .map(|(i, v)| Listing {
            id: format!("demo-{}", i + 1),
            year: v.year,
            make: v.make.into(),
            model: v.model.into(),
            trim: Some(v.trim.into()),
            price: Some(v.price),
            mileage: Some(v.mileage),
            vin: None,
            stock_number: Some(format!("D{:04}", i + 1)),
            image_url: None,
            condition: Some(v.condition.into()),
        })
        .collect()
}

/// Manufacturers a new site starts with.
pub fn default_manufacturers() -> Vec<Manufacturer> {
    [
        ("ford", "Ford", "https://www.ford.com"),
        ("toyota", "Toyota", "https://www.toyota.com"),
        ("honda", "Honda", "https://automobiles.honda.com"),
        ("chevrolet", "Chevrolet", "https://www.chevrolet.com"),
        ("hyundai", "Hyundai", "https://www.hyundaiusa.com"),
        ("kia", "Kia", "https://www.kia.com"),
    ]
    .into_iter()
    .map(|(id, name, website)| Manufacturer {
        id: id.into(),
        name: name.into(),
        logo_url: None,
        website_url: Some(website.into()),
    })
    .collect()
}
