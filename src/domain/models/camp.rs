use uuid::Uuid;

use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub struct Camp {
    id: Uuid,
    name: String,
    organizer: String,
    location: String,
    date: String,
    price: f64,
    participant_count: i32,
    description: String,
}

impl Camp {
    /// The participant counter always starts at zero; callers never supply it.
    pub fn new(
        id: Uuid,
        name: String,
        organizer: String,
        location: String,
        date: String,
        price: f64,
        description: String,
    ) -> Result<Self, DomainError> {
        if name.is_empty() {
            return Err(DomainError::EmptyName);
        }
        if price < 0.0 {
            return Err(DomainError::NegativePrice);
        }
        Ok(Self {
            id,
            name,
            organizer,
            location,
            date,
            price,
            participant_count: 0,
            description,
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn reconstruct(
        id: Uuid,
        name: String,
        organizer: String,
        location: String,
        date: String,
        price: f64,
        participant_count: i32,
        description: String,
    ) -> Self {
        Self {
            id,
            name,
            organizer,
            location,
            date,
            price,
            participant_count,
            description,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn organizer(&self) -> &str {
        &self.organizer
    }
    pub fn location(&self) -> &str {
        &self.location
    }
    pub fn date(&self) -> &str {
        &self.date
    }
    pub fn price(&self) -> f64 {
        self.price
    }
    pub fn participant_count(&self) -> i32 {
        self.participant_count
    }
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Case-insensitive substring match across the searchable fields,
    /// OR-combined. The SQL search mirrors this contract.
    pub fn matches(&self, filter: &str) -> bool {
        let needle = filter.to_lowercase();
        [
            self.name.as_str(),
            self.organizer.as_str(),
            self.location.as_str(),
            self.date.as_str(),
            self.description.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Price in the payment processor's minor units (cents).
    pub fn price_minor_units(&self) -> i64 {
        (self.price * 100.0).round() as i64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampSort {
    PriceAsc,
    PriceDesc,
    NameAsc,
}

impl CampSort {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "price-asc" => Some(Self::PriceAsc),
            "price-desc" => Some(Self::PriceDesc),
            "name-asc" => Some(Self::NameAsc),
            _ => None,
        }
    }
}

pub const DEFAULT_PAGE_SIZE: u64 = 6;

/// One-based page request; sizes default to [`DEFAULT_PAGE_SIZE`].
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    page: u64,
    size: u64,
}

impl PageRequest {
    pub fn new(page: u64, size: Option<u64>) -> Self {
        Self {
            page: page.max(1),
            size: size.filter(|s| *s > 0).unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }

    /// Zero-based index for the store's paginator.
    pub fn index(&self) -> u64 {
        self.page - 1
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

/// A page of search results together with the total matching count.
#[derive(Debug, Clone)]
pub struct CampPage {
    pub camps: Vec<Camp>,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn health_camp() -> Camp {
        Camp::new(
            Uuid::new_v4(),
            "Health Camp".to_string(),
            "Wellness Org".to_string(),
            "Dhaka".to_string(),
            "2026-09-01".to_string(),
            50.0,
            "Free checkups".to_string(),
        )
        .unwrap()
    }

    #[rstest]
    #[case("health")]
    #[case("CAMP")]
    #[case("alth ca")]
    #[case("dhaka")]
    #[case("checkups")]
    fn matches_is_case_insensitive_substring(#[case] filter: &str) {
        assert!(health_camp().matches(filter));
    }

    #[test]
    fn matches_rejects_unrelated_text() {
        assert!(!health_camp().matches("yoga retreat"));
    }

    #[test]
    fn negative_price_is_rejected() {
        let result = Camp::new(
            Uuid::new_v4(),
            "X".to_string(),
            String::new(),
            String::new(),
            String::new(),
            -1.0,
            String::new(),
        );
        assert!(matches!(result, Err(DomainError::NegativePrice)));
    }

    #[test]
    fn price_converts_to_minor_units() {
        assert_eq!(health_camp().price_minor_units(), 5000);
    }

    #[test]
    fn page_request_clamps_and_defaults() {
        let page = PageRequest::new(0, None);
        assert_eq!(page.index(), 0);
        assert_eq!(page.size(), DEFAULT_PAGE_SIZE);
        let page = PageRequest::new(3, Some(10));
        assert_eq!(page.index(), 2);
        assert_eq!(page.size(), 10);
    }
}
