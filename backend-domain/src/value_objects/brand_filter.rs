// Brand filter value object

/// Case-insensitive exclusion list for catch-all brand buckets
/// ("otras"/"other"). A display filter: excluded brands still count
/// toward every player, daily and summary total.
#[derive(Debug, Clone, Default)]
pub struct BrandFilter {
    excluded: Vec<String>,
}

impl BrandFilter {
    pub fn new(excluded: &[String]) -> Self {
        Self {
            excluded: excluded
                .iter()
                .map(|brand| brand.trim().to_lowercase())
                .filter(|brand| !brand.is_empty())
                .collect(),
        }
    }

    pub fn is_excluded(&self, brand: &str) -> bool {
        let brand = brand.trim().to_lowercase();
        self.excluded.iter().any(|excluded| *excluded == brand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> BrandFilter {
        BrandFilter::new(&["otras".to_string(), "Other".to_string()])
    }

    #[test]
    fn excludes_case_insensitively() {
        assert!(filter().is_excluded("Otras"));
        assert!(filter().is_excluded("OTHER"));
        assert!(!filter().is_excluded("Cristal"));
    }

    #[test]
    fn empty_filter_excludes_nothing() {
        let filter = BrandFilter::new(&[]);
        assert!(!filter.is_excluded("otras"));
    }
}
