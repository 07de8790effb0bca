//! Merging of aggregated document lines

use std::collections::HashMap;

use crate::model::AttributeValue;
use crate::model::ProductId;
use crate::resolve::Contribution;

/// Lines owed to products during one projection walk.
///
/// Contributions accumulate until the walk reaches a node of the receiving
/// product; that node consumes them, later nodes of the same product do not
/// see them again.
#[derive(Debug, Default)]
pub(crate) struct PendingLines {
    lines: HashMap<ProductId, String>,
}

impl PendingLines {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends contributed lines below any already owed to the same product.
    pub(crate) fn add(&mut self, contributions: Vec<Contribution>) {
        for contribution in contributions {
            let merged = merge_lines(self.lines.remove(&contribution.product), contribution.text);
            self.lines.insert(contribution.product, merged);
        }
    }

    /// Prepends the lines owed to `product` to its own value.
    pub(crate) fn take_into(&mut self, product: ProductId, value: AttributeValue) -> AttributeValue {
        let Some(owed) = self.lines.remove(&product) else {
            return value;
        };
        match value.to_text() {
            Some(own) if !own.is_empty() => AttributeValue::Text(merge_lines(Some(owed), own)),
            _ => AttributeValue::Text(owed),
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.lines.len()
    }
}

fn merge_lines(first: Option<String>, second: String) -> String {
    match first {
        Some(first) if !first.is_empty() => format!("{first}\n{second}"),
        _ => second,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_accumulate_in_order() {
        let mut pending = PendingLines::new();
        pending.add(vec![Contribution::new(ProductId(2), "Part of A")]);
        pending.add(vec![Contribution::new(ProductId(2), "Part of B")]);

        let value = pending.take_into(ProductId(2), AttributeValue::from("own"));
        assert_eq!(value, AttributeValue::from("Part of A\nPart of B\nown"));
        assert_eq!(pending.len(), 0);
    }

    #[test]
    fn test_owed_lines_fill_empty_cell() {
        let mut pending = PendingLines::new();
        pending.add(vec![Contribution::new(ProductId(5), "Part of RC-1")]);
        assert_eq!(
            pending.take_into(ProductId(5), AttributeValue::None),
            AttributeValue::from("Part of RC-1")
        );
        assert_eq!(
            pending.take_into(ProductId(5), AttributeValue::None),
            AttributeValue::None
        );
    }
}
