//! Inventory item records.

use serde::{Deserialize, Serialize};

/// A stack of identical items in the player's inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Display name of the item.
    pub name: String,
    /// How many the player carries.
    pub quantity: u32,
}

impl Item {
    /// Create a single item.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: 1,
        }
    }

    /// Create a stack of items.
    pub fn stack(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.quantity > 1 {
            write!(f, "{} x{}", self.name, self.quantity)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Item::new("Whetstone").to_string(), "Whetstone");
        assert_eq!(Item::stack("Dried fish", 4).to_string(), "Dried fish x4");
    }
}
