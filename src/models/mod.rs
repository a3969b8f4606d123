// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod bundle;
pub mod generation;
pub mod project;
pub mod subscription;
pub mod user;

pub use bundle::FlutterBundle;
pub use generation::{Generation, GenerationPatch, GenerationStatus, NewGeneration};
pub use project::{NewProject, Project, ProjectPatch, ProjectStatus};
pub use subscription::{
    NewSubscription, Subscription, SubscriptionPatch, SubscriptionStatus,
};
pub use user::{Language, NewUser, Provider, SubscriptionTier, User, UserPatch, UserTheme};
