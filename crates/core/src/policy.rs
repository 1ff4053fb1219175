//! Per-customer layout and quantity policies.

use std::collections::HashMap;

/// The high-volume account whose labels carry the PO up top and whose
/// quantities come from its pick lines.
pub const HIGH_VOLUME_CUSTOMER: &str = "20815";

/// Which shipping-label layout a customer gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutPolicy {
    /// Route and stop largest, at the top. Empty invoice/PO/pick lines are omitted.
    Standard,
    /// Purchase order largest, at the top. Every slot is always printed.
    PoProminent,
}

/// How a customer's label count is determined when no override is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuantityPolicy {
    /// Use the label-count hint carried by the record.
    HintBased,
    /// Compute from the customer's pick lines, per invoice.
    PickDerived,
}

/// Layout and quantity policy for one customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CustomerPolicy {
    /// Label layout.
    pub layout: LayoutPolicy,
    /// Quantity rule.
    pub quantity: QuantityPolicy,
}

impl CustomerPolicy {
    /// Standard layout, hint-based quantity.
    pub const STANDARD: Self = Self {
        layout: LayoutPolicy::Standard,
        quantity: QuantityPolicy::HintBased,
    };

    /// PO-prominent layout, pick-derived quantity.
    pub const HIGH_VOLUME: Self = Self {
        layout: LayoutPolicy::PoProminent,
        quantity: QuantityPolicy::PickDerived,
    };
}

/// Maps customer identifiers to policies, with a fallback for everyone else.
#[derive(Debug, Clone)]
pub struct PolicyTable {
    fallback: CustomerPolicy,
    by_customer: HashMap<String, CustomerPolicy>,
}

impl PolicyTable {
    /// An empty table where every customer gets `fallback`.
    pub fn new(fallback: CustomerPolicy) -> Self {
        Self {
            fallback,
            by_customer: HashMap::new(),
        }
    }

    /// Assign `policy` to `customer_no`.
    pub fn with_customer(mut self, customer_no: impl Into<String>, policy: CustomerPolicy) -> Self {
        self.by_customer
            .insert(customer_no.into().trim().to_string(), policy);
        self
    }

    /// Look up the policy for a customer identifier (trimmed before lookup).
    pub fn policy_for(&self, customer_no: &str) -> CustomerPolicy {
        self.by_customer
            .get(customer_no.trim())
            .copied()
            .unwrap_or(self.fallback)
    }

    /// Customers whose quantity comes from `policy`, in no particular order.
    pub fn customers_with(&self, policy: QuantityPolicy) -> impl Iterator<Item = &str> {
        self.by_customer
            .iter()
            .filter(move |(_, p)| p.quantity == policy)
            .map(|(id, _)| id.as_str())
    }
}

impl Default for PolicyTable {
    /// The production table: the high-volume account is special, everyone
    /// else is standard.
    fn default() -> Self {
        PolicyTable::new(CustomerPolicy::STANDARD)
            .with_customer(HIGH_VOLUME_CUSTOMER, CustomerPolicy::HIGH_VOLUME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table() {
        let table = PolicyTable::default();
        assert_eq!(table.policy_for("20815"), CustomerPolicy::HIGH_VOLUME);
        assert_eq!(table.policy_for(" 20815 "), CustomerPolicy::HIGH_VOLUME);
        assert_eq!(table.policy_for("10001"), CustomerPolicy::STANDARD);
        assert_eq!(table.policy_for(""), CustomerPolicy::STANDARD);
    }

    #[test]
    fn customers_with_pick_derived() {
        let table = PolicyTable::default().with_customer(
            "30001",
            CustomerPolicy {
                layout: LayoutPolicy::Standard,
                quantity: QuantityPolicy::PickDerived,
            },
        );
        let mut ids: Vec<&str> = table.customers_with(QuantityPolicy::PickDerived).collect();
        ids.sort_unstable();
        assert_eq!(ids, ["20815", "30001"]);
    }
}
