//! The fixed sample set inserted by the seed operation.

use crate::validation::NewProduct;

const DUPATTA_IMAGE: &str = "https://images.unsplash.com/photo-1685976045770-0562879cff98?ixid=M3w3OTkxMTl8MHwxfHNlYXJjaHwxfHxCbG9jay1QcmludGVkJTIwRHVwYXR0YXxlbnwwfDB8fHwxNzYzNTU5NTY1fDA&ixlib=rb-4.1.0&w=1600&auto=format&fit=crop&q=80";

/// Returns the sample products, in insertion order.
pub fn sample_products() -> Vec<NewProduct> {
    vec![
        NewProduct::new("Block-Printed Dupatta", 1599.0, "Textiles")
            .with_location("Jaipur, Rajasthan")
            .with_image(DUPATTA_IMAGE),
        NewProduct::new("Terracotta Vase", 1299.0, "Ceramics")
            .with_location("Kutch, Gujarat")
            .with_image("https://images.unsplash.com/photo-1523419409543-a3215c7beed5?q=80&w=1200&auto=format&fit=crop"),
        NewProduct::new("Bamboo Basket", 899.0, "Home")
            .with_location("Assam")
            .with_image("https://images.unsplash.com/photo-1519710164239-da123dc03ef4?q=80&w=1200&auto=format&fit=crop"),
        NewProduct::new("Warli Art Canvas", 2199.0, "Art")
            .with_location("Maharashtra")
            .with_image("https://images.unsplash.com/photo-1580136579312-94651dfd596d?q=80&w=1200&auto=format&fit=crop"),
        NewProduct::new("Blue Pottery Bowl", 749.0, "Ceramics")
            .with_location("Jaipur, Rajasthan")
            .with_image("https://images.unsplash.com/photo-1616046229478-9901c5536a45?q=80&w=1200&auto=format&fit=crop"),
        // Shares its photo with the dupatta
        NewProduct::new("Phulkari Shawl", 1899.0, "Textiles")
            .with_location("Punjab")
            .with_image(DUPATTA_IMAGE),
    ]
}
