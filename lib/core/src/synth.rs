//! Synthetic catalog generation
//!
//! Produces demo catalogs with plausible names, scores and traits. Pass a
//! seeded RNG for reproducible output.

use crate::{Category, Product, ProductId, TraitSet};
use rand::seq::IndexedRandom;
use rand::Rng;

pub const PERSONALITY_TRAITS: [&str; 12] = [
    "Tech-savvy",
    "Curious",
    "Active",
    "Creative",
    "Organized",
    "Adventurous",
    "Social",
    "Detail-oriented",
    "Relaxed",
    "Ambitious",
    "Caring",
    "Analytical",
];

const MIN_SCORE: f64 = 0.5;
const MAX_SCORE: f64 = 0.95;

fn name_prefixes(category: Category) -> &'static [&'static str] {
    match category {
        Category::Electronics => &["Smart", "Wireless", "Gaming", "Portable"],
        Category::Fiction => &["Mystery", "Fantasy", "Sci-Fi", "Romance"],
        Category::Sports => &["Running", "Yoga", "Soccer", "Cycling"],
        Category::Clothing => &["Casual", "Formal", "Sportswear", "Winter"],
        Category::Home => &["Kitchen", "Decor", "Furniture", "Garden"],
        Category::Beauty => &["Skincare", "Makeup", "Haircare", "Perfume"],
        Category::Toys => &["Educational", "Action", "Building", "Dolls"],
    }
}

/// Generate `count` products with ids `1..=count`
pub fn generate_catalog<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Product> {
    (1..=count as u64).map(|id| generate_product(id, rng)).collect()
}

fn generate_product<R: Rng + ?Sized>(id: u64, rng: &mut R) -> Product {
    let category = *Category::ALL.choose(rng).unwrap_or(&Category::Electronics);
    let prefix = name_prefixes(category).choose(rng).copied().unwrap_or("Item");
    let suffix: String = (0..3).map(|_| rng.random_range(b'A'..=b'Z') as char).collect();

    let raw_score = rng.random_range(MIN_SCORE..=MAX_SCORE);
    let interest_score = (raw_score * 100.0).round() / 100.0;

    let trait_count = rng.random_range(2..=4);
    let traits: TraitSet = PERSONALITY_TRAITS
        .choose_multiple(rng, trait_count)
        .copied()
        .collect();

    Product {
        id: ProductId(id),
        name: format!("{prefix} {suffix}"),
        category,
        interest_score,
        traits,
        image_path: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_products_are_valid() {
        let mut rng = StdRng::seed_from_u64(42);
        let products = generate_catalog(200, &mut rng);
        assert_eq!(products.len(), 200);

        for (i, product) in products.iter().enumerate() {
            assert_eq!(product.id, ProductId(i as u64 + 1));
            assert!(product.validate().is_ok());
            assert!(product.interest_score >= MIN_SCORE && product.interest_score <= MAX_SCORE);
            assert!((2..=4).contains(&product.traits.len()));
            assert!(name_prefixes(product.category)
                .iter()
                .any(|p| product.name.starts_with(p)));
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = generate_catalog(20, &mut StdRng::seed_from_u64(7));
        let b = generate_catalog(20, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }
}
