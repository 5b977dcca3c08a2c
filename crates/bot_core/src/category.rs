//! The fixed category catalog for listings.

/// A selectable item category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub label: &'static str,
}

/// The registered category set. Category step callbacks are validated
/// against these ids.
pub const CATEGORIES: &[Category] = &[
    Category {
        id: "keys",
        label: "Ключи",
    },
    Category {
        id: "phone",
        label: "Телефон",
    },
    Category {
        id: "wallet",
        label: "Кошелёк",
    },
    Category {
        id: "document",
        label: "Документы",
    },
    Category {
        id: "pet",
        label: "Питомец",
    },
    Category {
        id: "bag",
        label: "Сумка",
    },
];

pub fn category_by_id(id: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|category| category.id == id)
}

/// Human-readable label for a category id, falling back to the raw id.
pub fn category_label(id: &str) -> &str {
    category_by_id(id).map(|category| category.label).unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_category_lookup() {
        assert_eq!(category_by_id("pet").map(|c| c.label), Some("Питомец"));
        assert!(category_by_id("spaceship").is_none());
    }

    #[test]
    fn test_label_falls_back_to_id() {
        assert_eq!(category_label("keys"), "Ключи");
        assert_eq!(category_label("unknown"), "unknown");
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        for (i, category) in CATEGORIES.iter().enumerate() {
            assert!(
                CATEGORIES[i + 1..].iter().all(|other| other.id != category.id),
                "duplicate category id {}",
                category.id
            );
        }
    }
}
