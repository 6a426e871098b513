//! The sales record and the fixed sample rows seeded on every run.

use std::fmt;

/// Product category. The sample data only ever uses these three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Electronics,
    Furniture,
    OfficeSupplies,
}

impl Category {
    pub const ALL: [Self; 3] = [Self::Electronics, Self::Furniture, Self::OfficeSupplies];

    /// Text stored in the `category` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Electronics => "Electronics",
            Self::Furniture => "Furniture",
            Self::OfficeSupplies => "Office Supplies",
        }
    }

    #[must_use]
    pub fn from_column(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == text)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One sale, as inserted. The surrogate `id` is assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaleRecord {
    pub product: &'static str,
    pub category: Category,
    pub quantity: u32,
    pub price: f64,
    /// ISO `YYYY-MM-DD`.
    pub sale_date: &'static str,
    pub customer_id: i64,
    pub sales_rep: &'static str,
}

impl SaleRecord {
    #[must_use]
    pub fn revenue(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }
}

const fn sale(
    product: &'static str,
    category: Category,
    quantity: u32,
    price: f64,
    sale_date: &'static str,
    customer_id: i64,
    sales_rep: &'static str,
) -> SaleRecord {
    SaleRecord {
        product,
        category,
        quantity,
        price,
        sale_date,
        customer_id,
        sales_rep,
    }
}

use Category::{Electronics, Furniture, OfficeSupplies};

pub const SAMPLE_SALES: [SaleRecord; 20] = [
    sale("Laptop", Electronics, 5, 999.99, "2024-01-15", 101, "John Smith"),
    sale("Mouse", Electronics, 25, 29.99, "2024-01-15", 102, "John Smith"),
    sale("Keyboard", Electronics, 15, 79.99, "2024-01-16", 103, "Sarah Johnson"),
    sale("Monitor", Electronics, 8, 299.99, "2024-01-16", 104, "John Smith"),
    sale("Desk Chair", Furniture, 12, 199.99, "2024-01-17", 105, "Mike Wilson"),
    sale("Office Desk", Furniture, 6, 449.99, "2024-01-17", 106, "Sarah Johnson"),
    sale("Bookshelf", Furniture, 4, 129.99, "2024-01-18", 107, "Mike Wilson"),
    sale("Printer", Electronics, 3, 189.99, "2024-01-18", 108, "John Smith"),
    sale("Paper", OfficeSupplies, 50, 12.99, "2024-01-19", 109, "Sarah Johnson"),
    sale("Pens", OfficeSupplies, 100, 2.99, "2024-01-19", 110, "Mike Wilson"),
    sale("Notebook", OfficeSupplies, 75, 5.99, "2024-01-20", 111, "John Smith"),
    sale("Smartphone", Electronics, 7, 699.99, "2024-01-20", 112, "Sarah Johnson"),
    sale("Tablet", Electronics, 4, 399.99, "2024-01-21", 113, "Mike Wilson"),
    sale("Headphones", Electronics, 20, 89.99, "2024-01-21", 114, "John Smith"),
    sale("Coffee Table", Furniture, 3, 299.99, "2024-01-22", 115, "Sarah Johnson"),
    sale("Lamp", Furniture, 8, 79.99, "2024-01-22", 116, "Mike Wilson"),
    sale("Calculator", OfficeSupplies, 30, 19.99, "2024-01-23", 117, "John Smith"),
    sale("Stapler", OfficeSupplies, 25, 24.99, "2024-01-23", 118, "Sarah Johnson"),
    sale("Webcam", Electronics, 10, 129.99, "2024-01-24", 119, "Mike Wilson"),
    sale("Speaker", Electronics, 15, 149.99, "2024-01-24", 120, "John Smith"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_column_text() {
        for category in Category::ALL {
            assert_eq!(Category::from_column(category.as_str()), Some(category));
        }
        assert_eq!(Category::from_column("Groceries"), None);
    }

    #[test]
    fn sample_quantities_are_positive() {
        assert!(SAMPLE_SALES.iter().all(|r| r.quantity > 0));
    }

    #[test]
    fn sample_customers_are_distinct() {
        let mut ids: Vec<i64> = SAMPLE_SALES.iter().map(|r| r.customer_id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), SAMPLE_SALES.len());
    }

    #[test]
    fn laptop_revenue() {
        let laptop = SAMPLE_SALES.iter().find(|r| r.product == "Laptop").unwrap();
        assert!((laptop.revenue() - 4999.95).abs() < 1e-9);
    }
}
