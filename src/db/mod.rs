//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    /// Biometric profiles with derived targets (keyed by user id)
    pub const PROFILES: &str = "profiles";
    pub const FOOD_ITEMS: &str = "food_items";
    pub const RECIPES: &str = "recipes";
    /// Logged meals (flat daily records)
    pub const MEALS: &str = "meals";
    pub const WEIGHT_ENTRIES: &str = "weight_entries";
}
