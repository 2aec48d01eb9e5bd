// SPDX-License-Identifier: MIT
// Copyright 2026 Macro-Tracker Developers

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users and profiles (account + biometrics with derived targets)
//! - Food items (per-100g nutrient profiles, keyed by name)
//! - Recipes (embedded ingredient lists)
//! - Meal log entries and weight entries (daily tracking)

use crate::db::collections;
use crate::error::AppError;
use crate::models::{FoodItem, MealEntry, Recipe, User, UserProfile, WeightEntry};
use futures_util::{stream, StreamExt};

const MAX_CONCURRENT_DB_OPS: usize = 50;
// Firestore limits batch/transaction writes to 500 operations.
// We use a safe limit of 400 to allow headroom.
const BATCH_SIZE: usize = 400;

/// Opaque cursor for newest-first weight entry pagination.
///
/// Entries are one-per-day, so the day key is a sufficient sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightQueryCursor {
    /// Day key ("YYYY-MM-DD") of the last entry on the previous page
    pub day: String,
}

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated
        // connection to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    /// Document ID for a user-scoped, name-keyed food item.
    ///
    /// Food items are referenced by name from recipe ingredients, so the
    /// name (URL-encoded) is part of the document ID.
    fn food_doc_id(user_id: &str, name: &str) -> String {
        format!("{}_{}", user_id, urlencoding::encode(name))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user account by id.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update a user account.
    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.user_id)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Profile Operations ──────────────────────────────────────

    /// Get a user's biometric profile.
    pub async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::PROFILES)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Store a user's biometric profile (with server-derived targets).
    pub async fn set_profile(&self, profile: &UserProfile) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::PROFILES)
            .document_id(&profile.user_id)
            .object(profile)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Food Item Operations ────────────────────────────────────

    /// List all food items owned by a user, sorted by name.
    pub async fn list_food_items(&self, user_id: &str) -> Result<Vec<FoodItem>, AppError> {
        let user_id = user_id.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::FOOD_ITEMS)
            .filter(move |q| q.field("user_id").eq(user_id.clone()))
            .order_by([("name", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a food item by its name.
    pub async fn get_food_item(
        &self,
        user_id: &str,
        name: &str,
    ) -> Result<Option<FoodItem>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::FOOD_ITEMS)
            .obj()
            .one(&Self::food_doc_id(user_id, name))
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update a food item.
    pub async fn upsert_food_item(&self, item: &FoodItem) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::FOOD_ITEMS)
            .document_id(Self::food_doc_id(&item.user_id, &item.name))
            .object(item)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete a food item by name.
    pub async fn delete_food_item(&self, user_id: &str, name: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::FOOD_ITEMS)
            .document_id(Self::food_doc_id(user_id, name))
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Recipe Operations ───────────────────────────────────────

    /// Get a recipe by id. Ownership is checked by the caller.
    pub async fn get_recipe(&self, recipe_id: &str) -> Result<Option<Recipe>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::RECIPES)
            .obj()
            .one(recipe_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List all recipes owned by a user, newest first.
    pub async fn list_recipes(&self, user_id: &str) -> Result<Vec<Recipe>, AppError> {
        let user_id = user_id.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::RECIPES)
            .filter(move |q| q.field("user_id").eq(user_id.clone()))
            .order_by([(
                "created_at",
                firestore::FirestoreQueryDirection::Descending,
            )])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update a recipe.
    pub async fn set_recipe(&self, recipe: &Recipe) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::RECIPES)
            .document_id(&recipe.recipe_id)
            .object(recipe)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete a recipe by id.
    pub async fn delete_recipe(&self, recipe_id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::RECIPES)
            .document_id(recipe_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Meal Log Operations ─────────────────────────────────────

    /// Get a logged meal by id. Ownership is checked by the caller.
    pub async fn get_meal(&self, meal_id: &str) -> Result<Option<MealEntry>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::MEALS)
            .obj()
            .one(meal_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get all meals a user logged on one day, in logged order.
    pub async fn get_meals_for_day(
        &self,
        user_id: &str,
        day: &str,
    ) -> Result<Vec<MealEntry>, AppError> {
        let user_id = user_id.to_string();
        let day = day.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::MEALS)
            .filter(move |q| {
                q.for_all([
                    q.field("user_id").eq(user_id.clone()),
                    q.field("day").eq(day.clone()),
                ])
            })
            .order_by([("logged_at", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Store a logged meal.
    pub async fn set_meal(&self, meal: &MealEntry) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::MEALS)
            .document_id(&meal.meal_id)
            .object(meal)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete a logged meal by id.
    pub async fn delete_meal(&self, meal_id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::MEALS)
            .document_id(meal_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Weight Entry Operations ─────────────────────────────────

    /// Get the most recent weight entry for a user, if any.
    pub async fn latest_weight_entry(
        &self,
        user_id: &str,
    ) -> Result<Option<WeightEntry>, AppError> {
        let user_id = user_id.to_string();
        let entries: Vec<WeightEntry> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::WEIGHT_ENTRIES)
            .filter(move |q| q.field("user_id").eq(user_id.clone()))
            .order_by([("day", firestore::FirestoreQueryDirection::Descending)])
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(entries.into_iter().next())
    }

    /// Get weight entries newest first, with optional cursor pagination.
    pub async fn get_weight_entries(
        &self,
        user_id: &str,
        cursor: Option<WeightQueryCursor>,
        limit: u32,
    ) -> Result<Vec<WeightEntry>, AppError> {
        let user_id = user_id.to_string();
        let query = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::WEIGHT_ENTRIES);

        let query = if let Some(cursor) = cursor {
            query.filter(move |q| {
                q.for_all([
                    q.field("user_id").eq(user_id.clone()),
                    q.field("day").less_than(cursor.day.clone()),
                ])
            })
        } else {
            query.filter(move |q| q.field("user_id").eq(user_id.clone()))
        };

        query
            .order_by([("day", firestore::FirestoreQueryDirection::Descending)])
            .limit(limit)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Append a weight entry.
    pub async fn set_weight_entry(&self, entry: &WeightEntry) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::WEIGHT_ENTRIES)
            .document_id(&entry.entry_id)
            .object(entry)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Clear a user's entire weight history.
    ///
    /// Returns the number of entries deleted.
    pub async fn clear_weight_entries(&self, user_id: &str) -> Result<usize, AppError> {
        let uid = user_id.to_string();
        let entries: Vec<WeightEntry> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::WEIGHT_ENTRIES)
            .filter(move |q| q.field("user_id").eq(uid.clone()))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let count = entries.len();
        self.batch_delete(&entries, collections::WEIGHT_ENTRIES, |e: &WeightEntry| {
            e.entry_id.clone()
        })
        .await?;

        tracing::debug!(user_id, count, "Cleared weight history");
        Ok(count)
    }

    // ─── Helper Methods ────────────────────────────────────────────

    /// Helper to batch delete documents using transactions.
    async fn batch_delete<T, F>(
        &self,
        items: &[T],
        collection: &str,
        id_extractor: F,
    ) -> Result<(), AppError>
    where
        F: Fn(&T) -> String,
    {
        let client = self.get_client()?;

        for chunk in items.chunks(BATCH_SIZE) {
            let mut transaction = client
                .begin_transaction()
                .await
                .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

            for item in chunk {
                let doc_id = id_extractor(item);
                client
                    .fluent()
                    .delete()
                    .from(collection)
                    .document_id(&doc_id)
                    .add_to_transaction(&mut transaction)
                    .map_err(|e| {
                        AppError::Database(format!(
                            "Failed to add deletion to transaction for {}: {}",
                            collection, e
                        ))
                    })?;
            }

            transaction.commit().await.map_err(|e| {
                AppError::Database(format!("Failed to commit batch deletion: {}", e))
            })?;
        }

        Ok(())
    }

    /// Delete every document in a collection owned by `user_id` using
    /// concurrent single-document deletes with a concurrency limit.
    async fn delete_owned_docs(
        &self,
        collection: &'static str,
        doc_ids: Vec<String>,
    ) -> Result<usize, AppError> {
        let client = self.get_client()?;
        let count = doc_ids.len();

        stream::iter(doc_ids)
            .map(|doc_id| async move {
                client
                    .fluent()
                    .delete()
                    .from(collection)
                    .document_id(&doc_id)
                    .execute()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok::<_, AppError>(())
            })
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<(), AppError>>>()
            .await
            .into_iter()
            .collect::<Result<Vec<()>, AppError>>()?;

        Ok(count)
    }

    // ─── User Data Deletion (GDPR) ─────────────────────────────────

    /// Delete ALL data for a user (GDPR compliance).
    ///
    /// Deletes from all collections:
    /// - `meals` and `weight_entries` (query by user_id)
    /// - `recipes` and `food_items` (query by user_id)
    /// - `profiles/{user_id}` and `users/{user_id}`
    ///
    /// Returns the number of documents deleted.
    pub async fn delete_user_data(&self, user_id: &str) -> Result<usize, AppError> {
        let mut deleted_count = 0;

        let uid = user_id.to_string();
        let meals: Vec<MealEntry> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::MEALS)
            .filter(move |q| q.field("user_id").eq(uid.clone()))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        deleted_count += self
            .delete_owned_docs(
                collections::MEALS,
                meals.into_iter().map(|m| m.meal_id).collect(),
            )
            .await?;

        deleted_count += self.clear_weight_entries(user_id).await?;

        let recipes = self.list_recipes(user_id).await?;
        deleted_count += self
            .delete_owned_docs(
                collections::RECIPES,
                recipes.into_iter().map(|r| r.recipe_id).collect(),
            )
            .await?;

        let foods = self.list_food_items(user_id).await?;
        deleted_count += self
            .delete_owned_docs(
                collections::FOOD_ITEMS,
                foods
                    .into_iter()
                    .map(|f| Self::food_doc_id(user_id, &f.name))
                    .collect(),
            )
            .await?;

        // Profile and account documents
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::PROFILES)
            .document_id(user_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        deleted_count += 1;

        self.get_client()?
            .fluent()
            .delete()
            .from(collections::USERS)
            .document_id(user_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        deleted_count += 1;

        tracing::info!(user_id, deleted_count, "User data deletion complete");

        Ok(deleted_count)
    }
}
