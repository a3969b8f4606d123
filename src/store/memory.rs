// SPDX-License-Identifier: MIT

//! In-memory [`Storage`] implementation.
//!
//! One concurrent map per entity kind. Records live for the process
//! lifetime only; a durable backend would keep the same trait contracts.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use crate::models::{
    Generation, GenerationPatch, GenerationStatus, Language, NewGeneration, NewProject,
    NewSubscription, NewUser, Project, ProjectPatch, ProjectStatus, Provider, Subscription,
    SubscriptionPatch, SubscriptionStatus, SubscriptionTier, User, UserPatch, UserTheme,
};
use crate::store::Storage;

/// Credits granted to a new account.
const DEFAULT_CREDITS: i64 = 100;

/// Map entry carrying the record plus its insertion sequence number, so
/// listings can be returned in insertion order.
struct Stored<T> {
    seq: u64,
    record: T,
}

/// In-memory store backed by one `DashMap` per entity kind.
pub struct MemStorage {
    users: DashMap<String, Stored<User>>,
    projects: DashMap<String, Stored<Project>>,
    generations: DashMap<String, Stored<Generation>>,
    subscriptions: DashMap<String, Stored<Subscription>>,
    seq: AtomicU64,
}

impl MemStorage {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            projects: DashMap::new(),
            generations: DashMap::new(),
            subscriptions: DashMap::new(),
            seq: AtomicU64::new(0),
        }
    }

    fn new_id() -> String {
        Uuid::new_v4().to_string()
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemStorage {
    // ─── Users ───────────────────────────────────────────────────────────

    async fn create_user(&self, input: NewUser) -> User {
        let now = Utc::now();
        let user = User {
            id: Self::new_id(),
            username: input.username,
            email: input.email,
            password: input.password,
            display_name: input.display_name,
            photo_url: input.photo_url,
            provider: input.provider.unwrap_or(Provider::Email),
            language: input.language.unwrap_or(Language::En),
            theme: input.theme.unwrap_or(UserTheme::Light),
            credits: input.credits.unwrap_or(DEFAULT_CREDITS),
            subscription: input.subscription.unwrap_or(SubscriptionTier::Free),
            created_at: now,
            updated_at: now,
        };
        self.users.insert(
            user.id.clone(),
            Stored {
                seq: self.next_seq(),
                record: user.clone(),
            },
        );
        user
    }

    async fn get_user(&self, id: &str) -> Option<User> {
        self.users.get(id).map(|e| e.record.clone())
    }

    async fn get_user_by_email(&self, email: &str) -> Option<User> {
        self.users
            .iter()
            .find(|e| e.record.email == email)
            .map(|e| e.record.clone())
    }

    async fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.users
            .iter()
            .find(|e| e.record.username == username)
            .map(|e| e.record.clone())
    }

    async fn update_user(&self, id: &str, patch: UserPatch) -> Option<User> {
        let mut entry = self.users.get_mut(id)?;
        let user = &mut entry.record;
        if let Some(username) = patch.username {
            user.username = username;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(display_name) = patch.display_name {
            user.display_name = Some(display_name);
        }
        if let Some(photo_url) = patch.photo_url {
            user.photo_url = Some(photo_url);
        }
        if let Some(language) = patch.language {
            user.language = language;
        }
        if let Some(theme) = patch.theme {
            user.theme = theme;
        }
        if let Some(credits) = patch.credits {
            user.credits = credits;
        }
        if let Some(subscription) = patch.subscription {
            user.subscription = subscription;
        }
        user.updated_at = Utc::now();
        Some(user.clone())
    }

    // ─── Projects ────────────────────────────────────────────────────────

    async fn create_project(&self, input: NewProject) -> Project {
        let now = Utc::now();
        let project = Project {
            id: Self::new_id(),
            user_id: input.user_id,
            name: input.name,
            description: input.description,
            theme: input.theme.unwrap_or_else(|| "modern".to_string()),
            language: input.language.unwrap_or(Language::En),
            status: ProjectStatus::Draft,
            generated_code: None,
            assets: input.assets,
            settings: input.settings,
            created_at: now,
            updated_at: now,
        };
        self.projects.insert(
            project.id.clone(),
            Stored {
                seq: self.next_seq(),
                record: project.clone(),
            },
        );
        project
    }

    async fn get_project(&self, id: &str) -> Option<Project> {
        self.projects.get(id).map(|e| e.record.clone())
    }

    async fn list_projects_by_user(&self, user_id: &str) -> Vec<Project> {
        let mut matches: Vec<(u64, Project)> = self
            .projects
            .iter()
            .filter(|e| e.record.user_id == user_id)
            .map(|e| (e.seq, e.record.clone()))
            .collect();
        matches.sort_by_key(|(seq, _)| *seq);
        matches.into_iter().map(|(_, p)| p).collect()
    }

    async fn update_project(&self, id: &str, patch: ProjectPatch) -> Option<Project> {
        let mut entry = self.projects.get_mut(id)?;
        let project = &mut entry.record;
        if let Some(name) = patch.name {
            project.name = name;
        }
        if let Some(description) = patch.description {
            project.description = description;
        }
        if let Some(theme) = patch.theme {
            project.theme = theme;
        }
        if let Some(language) = patch.language {
            project.language = language;
        }
        if let Some(status) = patch.status {
            project.status = status;
        }
        if let Some(generated_code) = patch.generated_code {
            project.generated_code = Some(generated_code);
        }
        if let Some(assets) = patch.assets {
            project.assets = Some(assets);
        }
        if let Some(settings) = patch.settings {
            project.settings = Some(settings);
        }
        project.updated_at = Utc::now();
        Some(project.clone())
    }

    async fn delete_project(&self, id: &str) -> bool {
        self.projects.remove(id).is_some()
    }

    // ─── Generations ─────────────────────────────────────────────────────

    async fn create_generation(&self, input: NewGeneration) -> Generation {
        let generation = Generation {
            id: Self::new_id(),
            project_id: input.project_id,
            user_id: input.user_id,
            prompt: input.prompt,
            generated_code: None,
            credits_used: 0,
            status: GenerationStatus::Pending,
            error_message: None,
            created_at: Utc::now(),
        };
        self.generations.insert(
            generation.id.clone(),
            Stored {
                seq: self.next_seq(),
                record: generation.clone(),
            },
        );
        generation
    }

    async fn get_generation(&self, id: &str) -> Option<Generation> {
        self.generations.get(id).map(|e| e.record.clone())
    }

    async fn list_generations_by_project(&self, project_id: &str) -> Vec<Generation> {
        let mut matches: Vec<(u64, Generation)> = self
            .generations
            .iter()
            .filter(|e| e.record.project_id == project_id)
            .map(|e| (e.seq, e.record.clone()))
            .collect();
        matches.sort_by_key(|(seq, _)| *seq);
        matches.into_iter().map(|(_, g)| g).collect()
    }

    async fn update_generation(&self, id: &str, patch: GenerationPatch) -> Option<Generation> {
        let mut entry = self.generations.get_mut(id)?;
        let generation = &mut entry.record;
        if let Some(generated_code) = patch.generated_code {
            generation.generated_code = Some(generated_code);
        }
        if let Some(credits_used) = patch.credits_used {
            generation.credits_used = credits_used;
        }
        if let Some(status) = patch.status {
            generation.status = status;
        }
        if let Some(error_message) = patch.error_message {
            generation.error_message = Some(error_message);
        }
        Some(generation.clone())
    }

    // ─── Subscriptions ───────────────────────────────────────────────────

    async fn create_subscription(&self, input: NewSubscription) -> Subscription {
        let now = Utc::now();
        let subscription = Subscription {
            id: Self::new_id(),
            user_id: input.user_id,
            plan: input.plan,
            status: input.status.unwrap_or(SubscriptionStatus::Active),
            credits_remaining: input.credits_remaining.unwrap_or(0),
            paypal_subscription_id: input.paypal_subscription_id,
            expires_at: input.expires_at,
            created_at: now,
            updated_at: now,
        };
        self.subscriptions.insert(
            subscription.id.clone(),
            Stored {
                seq: self.next_seq(),
                record: subscription.clone(),
            },
        );
        subscription
    }

    async fn get_subscription_by_user(&self, user_id: &str) -> Option<Subscription> {
        self.subscriptions
            .iter()
            .find(|e| e.record.user_id == user_id)
            .map(|e| e.record.clone())
    }

    async fn update_subscription(
        &self,
        id: &str,
        patch: SubscriptionPatch,
    ) -> Option<Subscription> {
        let mut entry = self.subscriptions.get_mut(id)?;
        let subscription = &mut entry.record;
        if let Some(plan) = patch.plan {
            subscription.plan = plan;
        }
        if let Some(status) = patch.status {
            subscription.status = status;
        }
        if let Some(credits_remaining) = patch.credits_remaining {
            subscription.credits_remaining = credits_remaining;
        }
        if let Some(paypal_subscription_id) = patch.paypal_subscription_id {
            subscription.paypal_subscription_id = Some(paypal_subscription_id);
        }
        if let Some(expires_at) = patch.expires_at {
            subscription.expires_at = Some(expires_at);
        }
        subscription.updated_at = Utc::now();
        Some(subscription.clone())
    }
}
