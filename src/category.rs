use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of spending categories the classifier predicts.
///
/// Variant order matches the model's classification head: the logit at
/// index `i` scores `Category::ALL[i]`. Reordering variants without
/// retraining the model breaks every prediction, so the mapping is kept
/// explicit and checked by tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Income,
    #[serde(rename = "EMI")]
    Emi,
    Grocery,
    Entertainment,
    Transportation,
    Bills,
    Shopping,
    Miscellaneous,
}

impl Category {
    /// All categories in model output order.
    pub const ALL: [Category; 8] = [
        Category::Income,
        Category::Emi,
        Category::Grocery,
        Category::Entertainment,
        Category::Transportation,
        Category::Bills,
        Category::Shopping,
        Category::Miscellaneous,
    ];

    /// Number of categories. Must equal the width of the model's output.
    pub const COUNT: usize = Self::ALL.len();

    /// Maps a model output index to its category.
    pub fn from_index(index: usize) -> Option<Category> {
        Self::ALL.get(index).copied()
    }

    /// The model output index for this category.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The label as returned over the wire.
    pub fn label(self) -> &'static str {
        match self {
            Category::Income => "Income",
            Category::Emi => "EMI",
            Category::Grocery => "Grocery",
            Category::Entertainment => "Entertainment",
            Category::Transportation => "Transportation",
            Category::Bills => "Bills",
            Category::Shopping => "Shopping",
            Category::Miscellaneous => "Miscellaneous",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
