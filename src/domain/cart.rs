use serde::{Deserialize, Serialize};

/// Menu categories whose purchase earns stamps and whose line items a pending
/// reward can zero out.
pub const ELIGIBLE_CATEGORIES: [&str; 4] = ["Coffee", "Tea", "Hot Drink", "Iced"];

/// Upper bound on free-text order notes.
pub const MAX_NOTES_LEN: usize = 500;

pub fn is_eligible(category: Option<&str>) -> bool {
    category.is_some_and(|c| ELIGIBLE_CATEGORIES.contains(&c))
}

/// Parse a display price label into a unit price.
///
/// Menu labels can be composite ("£3.5 / £4.2" for two sizes); the first
/// numeric token wins. This matches what the menu layer has always shown and
/// charged, so it is kept as-is rather than corrected. A label with no
/// numeric token prices at zero.
pub fn parse_price_label(label: &str) -> f64 {
    let start = match label.find(|c: char| c.is_ascii_digit()) {
        Some(idx) => idx,
        None => return 0.0,
    };
    let token: String = label[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    token.parse().unwrap_or(0.0)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub price_label: String,
    pub quantity: u32,
    pub category: Option<String>,
    #[serde(default)]
    pub reward_applied: bool,
}

impl CartItem {
    pub fn unit_price(&self) -> f64 {
        parse_price_label(&self.price_label)
    }
}

/// One session's cart. Single-owner, never shared between sessions, and not
/// persisted server-side: checkout receives a snapshot of it.
#[derive(Debug, Clone, Default)]
pub struct CartSession {
    items: Vec<CartItem>,
    notes: String,
    reward_applied: bool,
    next_line: u64,
}

impl CartSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a session from a client-held snapshot, e.g. the body of a
    /// checkout request. The reward flag is recovered from the line items.
    pub fn hydrate(items: Vec<CartItem>, notes: String) -> Self {
        let reward_applied = items.iter().any(|item| item.reward_applied);
        Self {
            next_line: items.len() as u64,
            items,
            notes,
            reward_applied,
        }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn set_notes(&mut self, notes: String) {
        self.notes = notes;
    }

    pub fn reward_applied(&self) -> bool {
        self.reward_applied
    }

    /// Total unit count across all lines.
    pub fn count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Units of reward-eligible lines.
    pub fn eligible_units(&self) -> u32 {
        self.items
            .iter()
            .filter(|item| is_eligible(item.category.as_deref()))
            .map(|item| item.quantity)
            .sum()
    }

    pub fn total(&self) -> f64 {
        self.items
            .iter()
            .map(|item| item.unit_price() * item.quantity as f64)
            .sum()
    }

    /// Add one unit. Merges into an existing line when name and price label
    /// both match, otherwise appends a new line with quantity one.
    pub fn add_item(&mut self, name: &str, price_label: &str, category: Option<&str>) {
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|item| item.name == name && item.price_label == price_label)
        {
            existing.quantity += 1;
            return;
        }

        self.next_line += 1;
        self.items.push(CartItem {
            id: format!("{}-{}-{}", name, price_label, self.next_line),
            name: name.to_string(),
            price_label: price_label.to_string(),
            quantity: 1,
            category: category.map(str::to_string),
            reward_applied: false,
        });
    }

    /// Set a line's quantity; zero removes the line.
    pub fn set_quantity(&mut self, id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove_item(id);
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.quantity = quantity;
        }
    }

    pub fn remove_item(&mut self, id: &str) {
        self.items.retain(|item| item.id != id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.notes.clear();
        self.reward_applied = false;
    }

    /// Apply the user's pending reward to the first eligible line item,
    /// zeroing its price. Idempotent: a cart applies at most one reward in
    /// its lifetime, and an empty or already-discounted cart is a no-op.
    /// Returns whether a line was discounted.
    ///
    /// The caller is responsible for checking that the ledger actually holds
    /// a pending reward; the session only tracks the application.
    pub fn apply_reward(&mut self) -> bool {
        if self.reward_applied || self.items.is_empty() {
            return false;
        }

        let Some(item) = self
            .items
            .iter_mut()
            .find(|item| is_eligible(item.category.as_deref()))
        else {
            return false;
        };

        item.price_label = "£0.00".to_string();
        item.reward_applied = true;
        self.reward_applied = true;
        true
    }
}
