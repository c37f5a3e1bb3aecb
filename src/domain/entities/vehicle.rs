//! Vehicle description and lookup key derivation.

/// Normalized key used to index the image cache.
///
/// Built from the vehicle's descriptive fields in fixed order (brand, model,
/// year, color), case-folded and whitespace-collapsed so that equivalent
/// descriptions always map to the same cache slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey(String);

impl LookupKey {
    /// Creates a key from a raw query string, applying normalization.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let normalized = raw
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        Self(normalized)
    }

    /// Returns the inner normalized string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the key carries no descriptive information.
    /// An empty key must never be looked up.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for LookupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Descriptive fields of a vehicle as entered in the workshop registry.
///
/// All fields are optional; a descriptor with no populated field is not
/// resolvable and produces an empty [`LookupKey`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleDescriptor {
    brand: Option<String>,
    model: Option<String>,
    year: Option<String>,
    color: Option<String>,
}

impl VehicleDescriptor {
    /// Creates an empty descriptor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the brand.
    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Sets the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the model year.
    #[must_use]
    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    /// Sets the color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Builds the display-form query string: non-empty fields joined by a
    /// single space, original casing preserved. This is the string sent to
    /// the lookup service and shown in diagnostics.
    #[must_use]
    pub fn display_name(&self) -> String {
        [&self.brand, &self.model, &self.year, &self.color]
            .into_iter()
            .filter_map(|f| f.as_deref())
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Derives the normalized cache key for this vehicle.
    ///
    /// Deterministic: two descriptors whose fields differ only in case or
    /// surrounding whitespace produce the same key.
    #[must_use]
    pub fn lookup_key(&self) -> LookupKey {
        LookupKey::new(&self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Honda", "CB 600F", "2020"; "plain fields")]
    #[test_case("HONDA", "cb 600f", "2020"; "mixed case")]
    #[test_case("  Honda ", "CB  600F", " 2020 "; "stray whitespace")]
    fn equivalent_descriptors_share_a_key(brand: &str, model: &str, year: &str) {
        let vehicle = VehicleDescriptor::new()
            .with_brand(brand)
            .with_model(model)
            .with_year(year);
        assert_eq!(vehicle.lookup_key().as_str(), "honda cb 600f 2020");
    }

    #[test]
    fn key_uses_fixed_field_order() {
        let vehicle = VehicleDescriptor::new()
            .with_color("vermelha")
            .with_year("2016")
            .with_model("R3")
            .with_brand("Yamaha");
        assert_eq!(vehicle.lookup_key().as_str(), "yamaha r3 2016 vermelha");
    }

    #[test]
    fn empty_fields_are_omitted() {
        let vehicle = VehicleDescriptor::new()
            .with_brand("Fiat")
            .with_model("   ")
            .with_year("1998");
        assert_eq!(vehicle.display_name(), "Fiat 1998");
        assert_eq!(vehicle.lookup_key().as_str(), "fiat 1998");
    }

    #[test]
    fn blank_descriptor_yields_empty_key() {
        let vehicle = VehicleDescriptor::new();
        assert!(vehicle.lookup_key().is_empty());
        assert!(vehicle.display_name().is_empty());
    }

    #[test]
    fn display_name_preserves_original_casing() {
        let vehicle = VehicleDescriptor::new()
            .with_brand("Honda")
            .with_model("CB 600F");
        assert_eq!(vehicle.display_name(), "Honda CB 600F");
        assert_eq!(vehicle.lookup_key().as_str(), "honda cb 600f");
    }

    #[test]
    fn key_determinism() {
        let a = VehicleDescriptor::new().with_brand("VW").with_model("Gol");
        let b = VehicleDescriptor::new().with_brand("vw").with_model("GOL");
        assert_eq!(a.lookup_key(), b.lookup_key());
    }
}
