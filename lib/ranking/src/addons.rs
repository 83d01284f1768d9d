use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// A complementary item suggested alongside a product
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddOn {
    pub name: String,
    pub image: String,
}

/// Product name to add-on names, plus add-on name to image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddOnTable {
    #[serde(rename = "add_ons", default)]
    by_product: AHashMap<String, Vec<String>>,
    #[serde(rename = "add_on_images", default)]
    images: AHashMap<String, String>,
    #[serde(rename = "add_on_placeholder_image")]
    placeholder: String,
}

impl AddOnTable {
    pub fn new(
        by_product: AHashMap<String, Vec<String>>,
        images: AHashMap<String, String>,
        placeholder: impl Into<String>,
    ) -> Self {
        Self {
            by_product,
            images,
            placeholder: placeholder.into(),
        }
    }

    /// Add-ons configured for `product_name`, in configured order.
    ///
    /// Product names match exactly. Unknown products have no add-ons; add-ons
    /// without a configured image get the shared placeholder.
    pub fn lookup(&self, product_name: &str) -> Vec<AddOn> {
        let Some(names) = self.by_product.get(product_name) else {
            return Vec::new();
        };

        names
            .iter()
            .map(|name| AddOn {
                name: name.clone(),
                image: self.image_for(name).to_string(),
            })
            .collect()
    }

    pub fn image_for(&self, add_on: &str) -> &str {
        self.images
            .get(add_on)
            .map(String::as_str)
            .unwrap_or(&self.placeholder)
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }
}
