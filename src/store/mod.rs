// SPDX-License-Identifier: MIT

//! Record storage abstraction.
//!
//! One trait, one method per operation, injected as `Arc<dyn Storage>` so
//! tests can supply isolated instances and a durable backend can replace
//! the in-memory one without touching callers.

pub mod memory;

pub use memory::MemStorage;

use async_trait::async_trait;

use crate::models::{
    Generation, GenerationPatch, NewGeneration, NewProject, NewSubscription, NewUser, Project,
    ProjectPatch, Subscription, SubscriptionPatch, User, UserPatch,
};

/// Storage operations for the four entity kinds.
///
/// Creation never fails for well-typed input and applies the documented
/// per-field defaults. Getters return `None` for a missing id rather than
/// an error. Updates merge the patch field-by-field and re-stamp
/// `updated_at` (generations carry no update timestamp). Listings come back
/// in insertion order.
///
/// The store does not enforce email/username uniqueness on create; that
/// check lives in the register handler, as in the original design.
#[async_trait]
pub trait Storage: Send + Sync {
    // Users
    async fn create_user(&self, input: NewUser) -> User;
    async fn get_user(&self, id: &str) -> Option<User>;
    async fn get_user_by_email(&self, email: &str) -> Option<User>;
    async fn get_user_by_username(&self, username: &str) -> Option<User>;
    async fn update_user(&self, id: &str, patch: UserPatch) -> Option<User>;

    // Projects
    async fn create_project(&self, input: NewProject) -> Project;
    async fn get_project(&self, id: &str) -> Option<Project>;
    async fn list_projects_by_user(&self, user_id: &str) -> Vec<Project>;
    async fn update_project(&self, id: &str, patch: ProjectPatch) -> Option<Project>;
    async fn delete_project(&self, id: &str) -> bool;

    // Generations
    async fn create_generation(&self, input: NewGeneration) -> Generation;
    async fn get_generation(&self, id: &str) -> Option<Generation>;
    async fn list_generations_by_project(&self, project_id: &str) -> Vec<Generation>;
    async fn update_generation(&self, id: &str, patch: GenerationPatch) -> Option<Generation>;

    // Subscriptions
    async fn create_subscription(&self, input: NewSubscription) -> Subscription;
    async fn get_subscription_by_user(&self, user_id: &str) -> Option<Subscription>;
    async fn update_subscription(&self, id: &str, patch: SubscriptionPatch)
        -> Option<Subscription>;
}
