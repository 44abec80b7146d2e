/// Arrow schema definitions for the tables handed to reporting sinks.
pub mod tables {
    use arrow::datatypes::{DataType, Field, Schema};

    use crate::diagnostics::Attribute;

    /// A column of a listing table.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ListingColumn {
        Title,
        CaptureDate,
        PriceText,
        Model,
        Processor,
        ScreenSize,
        Storage,
        Ram,
        Warranty,
        Price,
        Link,
        LinkKey,
    }

    impl ListingColumn {
        pub fn name(&self) -> &'static str {
            match self {
                Self::Title => "title",
                Self::CaptureDate => "capture_date",
                Self::PriceText => "price_text",
                Self::Model => "model",
                Self::Processor => "processor",
                Self::ScreenSize => "screen_size",
                Self::Storage => "storage",
                Self::Ram => "ram",
                Self::Warranty => "warranty",
                Self::Price => "price",
                Self::Link => "link",
                Self::LinkKey => "link_key",
            }
        }

        pub fn field(&self) -> Field {
            match self {
                Self::Title
                | Self::PriceText
                | Self::Model
                | Self::Storage
                | Self::Ram
                | Self::Warranty => Field::new(self.name(), DataType::Utf8, false),
                // Null when the attribute does not apply to the listing.
                Self::Processor | Self::ScreenSize => Field::new(self.name(), DataType::Utf8, true),
                Self::CaptureDate => Field::new(self.name(), DataType::Date32, true),
                // Null when the price text could not be parsed.
                Self::Price => Field::new(self.name(), DataType::UInt64, true),
                Self::Link | Self::LinkKey => Field::new(self.name(), DataType::Utf8, true),
            }
        }
    }

    use ListingColumn::*;

    /// Every column, in export order.
    pub const ALL_COLUMNS: &[ListingColumn] = &[
        Title, CaptureDate, PriceText, Model, Processor, ScreenSize, Storage, Ram, Warranty,
        Price, Link, LinkKey,
    ];

    /// Cleaned listings: everything except the raw link.
    pub const CLEAN_COLUMNS: &[ListingColumn] = &[
        Title, CaptureDate, PriceText, Model, Processor, ScreenSize, Storage, Ram, Warranty,
        Price, LinkKey,
    ];

    /// Full verification dump of every deduplicated listing.
    pub const VERIFICATION_COLUMNS: &[ListingColumn] =
        &[Model, Processor, ScreenSize, Storage, Ram, Title];

    /// Columns of the review table for one attribute.
    pub fn review_columns(attribute: Attribute) -> &'static [ListingColumn] {
        match attribute {
            Attribute::Processor => &[Model, ScreenSize, Processor, Title],
            Attribute::Storage => &[Model, ScreenSize, Storage, Title],
            Attribute::Ram => &[Model, ScreenSize, Ram, Title],
            Attribute::Model => &[Model, ScreenSize, Ram, Storage, Title],
            Attribute::ScreenSize => &[Model, Processor, ScreenSize, Storage, Ram, Title],
        }
    }

    /// Schema for a listing table with the given columns.
    pub fn listing_schema(columns: &[ListingColumn]) -> Schema {
        Schema::new(columns.iter().map(ListingColumn::field).collect::<Vec<_>>())
    }

    /// Schema for the price summary table.
    pub fn summary_schema() -> Schema {
        Schema::new(vec![
            Field::new("model", DataType::Utf8, false),
            Field::new("processor", DataType::Utf8, true),
            Field::new("screen_size", DataType::Utf8, true),
            Field::new("ram", DataType::Utf8, false),
            Field::new("storage", DataType::Utf8, false),
            Field::new("warranty", DataType::Utf8, false),
            Field::new("count", DataType::UInt64, false),
            Field::new("min_price", DataType::UInt64, false),
            Field::new("max_price", DataType::UInt64, false),
            Field::new("avg_price", DataType::Float64, false),
        ])
    }

    /// Schema for the per-processor price breakdown.
    pub fn processor_breakdown_schema() -> Schema {
        Schema::new(vec![
            Field::new("processor", DataType::Utf8, true),
            Field::new("count", DataType::UInt64, false),
            Field::new("avg_price", DataType::Float64, false),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::tables;
    use crate::diagnostics::Attribute;

    #[test]
    fn summary_schema_has_expected_fields() {
        let schema = tables::summary_schema();
        assert_eq!(schema.fields().len(), 10);
        assert!(schema.field_with_name("avg_price").is_ok());
        assert!(schema.field_with_name("warranty").is_ok());
    }

    #[test]
    fn clean_schema_drops_link() {
        let schema = tables::listing_schema(tables::CLEAN_COLUMNS);
        assert!(schema.field_with_name("link").is_err());
        assert!(schema.field_with_name("link_key").is_ok());
        assert!(schema.field_with_name("price").unwrap().is_nullable());
    }

    #[test]
    fn review_tables_end_with_title() {
        for attribute in Attribute::ALL {
            let cols = tables::review_columns(attribute);
            assert_eq!(cols.last(), Some(&tables::ListingColumn::Title));
            assert!(cols.iter().any(|c| c.name() == attribute.as_str()));
        }
    }
}
