// core/src/seed.rs

//! The fixed development catalog loaded by the seed operation.

use rand::Rng;

use crate::models::NewProduct;

/// (name, description, price, category)
const SAMPLE_CATALOG: &[(&str, &str, f64, &str)] = &[
  ("Smartphone X", "Latest smartphone with amazing camera quality", 999.99, "Electronics"),
  ("Laptop Pro", "Powerful laptop for professionals", 1499.99, "Electronics"),
  ("Wireless Headphones", "Noise cancelling wireless headphones", 199.99, "Audio"),
  ("Smart Watch", "Track your fitness and stay connected", 249.99, "Wearables"),
  ("Coffee Maker", "Automatic coffee maker with built-in grinder", 129.99, "Kitchen"),
  ("Wireless Earbuds", "True wireless earbuds with great sound quality", 89.99, "Audio"),
  ("Smart TV", "4K Ultra HD Smart TV with voice control", 799.99, "Electronics"),
  ("Wireless Mouse", "Ergonomic wireless mouse for comfortable usage", 29.99, "Computer Accessories"),
  ("Bluetooth Speaker", "Portable Bluetooth speaker with deep bass", 79.99, "Audio"),
  ("Digital Camera", "Professional digital camera with 4K video", 599.99, "Photography"),
];

pub const SEED_MESSAGE: &str = "Sample products added successfully";

/// Views are drawn from `0..1000`, likes from `0..500`.
pub fn sample_products<R: Rng + ?Sized>(rng: &mut R) -> Vec<NewProduct> {
  SAMPLE_CATALOG
    .iter()
    .map(|&(name, description, price, category)| {
      NewProduct::new(name, description, price, category).with_counters(rng.gen_range(0..1000), rng.gen_range(0..500))
    })
    .collect()
}

pub fn sample_catalog_size() -> usize {
  SAMPLE_CATALOG.len()
}
