//! Built-in catalog used when neither a share link nor saved state is present.

use fimenu_core::{Money, ProductId};

use crate::product::Product;

struct Seed {
    id: &'static str,
    icon: &'static str,
    title: &'static str,
    subtitle: &'static str,
    description: &'static str,
    price: u64,
    link: &'static str,
}

const PFS: &str = "Porsche Financial Services";
const PORSCHE_URL: &str = "https://www.porsche.com/";

const SEEDS: [Seed; 8] = [
    Seed {
        id: "multi_coverage",
        icon: "📋",
        title: "Porsche Multi-Coverage",
        subtitle: PFS,
        description: "Platinum Coverage: Tire & Wheel, Ding & Dent, Windshield, Key Replacement. Comprehensive protection for your vehicle.",
        price: 5344,
        link: PORSCHE_URL,
    },
    Seed {
        id: "lease_end",
        icon: "🔒",
        title: "Lease-End Protection",
        subtitle: "Porsche Protection Plan",
        description: "Help minimize unexpected lease-end charges with coverage designed for common excess wear items.",
        price: 1994,
        link: PORSCHE_URL,
    },
    Seed {
        id: "term_coverage",
        icon: "🛡️",
        title: "Term Coverage Plus",
        subtitle: PFS,
        description: "Optional coverage for extra peace of mind and predictable ownership costs.",
        price: 3878,
        link: PORSCHE_URL,
    },
    Seed {
        id: "xpel",
        icon: "⚡",
        title: "XPEL Surface Protection",
        subtitle: "Ultimate Paint Protection",
        description: "Protects your vehicle's finish and resale value with premium film and surface protection options.",
        price: 2495,
        link: "https://www.xpel.com/",
    },
    Seed {
        id: "surface",
        icon: "✨",
        title: "Surface Protection",
        subtitle: "Cilajet Ultimate",
        description: "Protects paint surfaces from sun, weather, oxidation, and loss of gloss.",
        price: 1995,
        link: "https://www.cilajet.com/",
    },
    Seed {
        id: "vehicle_service",
        icon: "🔧",
        title: "Vehicle Service Protection",
        subtitle: PFS,
        description: "Nationwide service at authorized dealers plus roadside assistance and trip interruption coverage.",
        price: 3805,
        link: PORSCHE_URL,
    },
    Seed {
        id: "dent",
        icon: "☂️",
        title: "Dent Protection",
        subtitle: PFS,
        description: "Repairs dents and dings from everyday use without harming the factory finish.",
        price: 630,
        link: PORSCHE_URL,
    },
    Seed {
        id: "tire_wheel",
        icon: "⚙️",
        title: "Tire & Wheel Protection",
        subtitle: PFS,
        description: "Repair or replacement protection for tires and wheels damaged by common road hazards.",
        price: 1850,
        link: PORSCHE_URL,
    },
];

/// The default product line-up.
pub fn default_products() -> Vec<Product> {
    SEEDS
        .iter()
        .map(|s| Product {
            id: ProductId::new(s.id),
            icon: s.icon.to_string(),
            title: s.title.to_string(),
            subtitle: s.subtitle.to_string(),
            description: s.description.to_string(),
            price: Money::from(s.price),
            link: Some(s.link.to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn defaults_have_unique_ids_and_safe_links() {
        let products = default_products();
        assert_eq!(products.len(), 8);
        let ids: HashSet<_> = products.iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids.len(), products.len());
        assert!(products.iter().all(|p| p.safe_link().is_some()));
    }
}
