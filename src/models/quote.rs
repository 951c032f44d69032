//! Quote model

use serde::{Deserialize, Serialize};

/// A quote and its author
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Quote {
    pub text: String,
    pub author: String,
}
