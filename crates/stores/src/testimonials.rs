//! Testimonial store: operator-curated landing-page quotes.
//!
//! Full CRUD through a closed edit enum, with the same confirmation gate on
//! delete as the catalog. Unlike reviews, testimonials are display content
//! only: they start from the seed set on every boot and are never persisted.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::catalog::Confirmation;
use crate::models::Testimonial;
use crate::seed;

/// One editable field of a testimonial.
#[derive(Debug, Clone, PartialEq)]
pub enum TestimonialEdit {
    SetName(String),
    SetRole(String),
    SetAvatarUrl(String),
    SetQuote(String),
    SetRating(i64),
}

/// Store owning the testimonials collection.
#[derive(Debug, Clone)]
pub struct TestimonialStore {
    entries: Arc<RwLock<Vec<Testimonial>>>,
}

impl Default for TestimonialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TestimonialStore {
    /// Start from the seed set.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(seed::default_testimonials())),
        }
    }

    /// Current testimonials, insertion order.
    pub async fn list(&self) -> Vec<Testimonial> {
        self.entries.read().await.clone()
    }

    /// Append a placeholder testimonial for the operator to edit in place.
    pub async fn add(&self) -> Testimonial {
        let testimonial = Testimonial {
            id: format!("testimonial_{}", uuid::Uuid::new_v4().simple()),
            name: "Customer".to_string(),
            role: "User".to_string(),
            avatar_url: "https://cdn.combokart.app/avatars/placeholder.png".to_string(),
            quote: "Opinion...".to_string(),
            rating: 5,
        };
        self.entries.write().await.push(testimonial.clone());
        testimonial
    }

    /// Apply one edit to the named testimonial. Unknown id is a silent
    /// no-op (returns `false`).
    pub async fn apply(&self, id: &str, edit: TestimonialEdit) -> bool {
        let mut entries = self.entries.write().await;
        let Some(entry) = entries.iter_mut().find(|t| t.id == id) else {
            return false;
        };

        match edit {
            TestimonialEdit::SetName(name) => entry.name = name,
            TestimonialEdit::SetRole(role) => entry.role = role,
            TestimonialEdit::SetAvatarUrl(avatar_url) => entry.avatar_url = avatar_url,
            TestimonialEdit::SetQuote(quote) => entry.quote = quote,
            TestimonialEdit::SetRating(rating) => entry.rating = rating,
        }
        true
    }

    /// Delete a testimonial. Declined confirmation aborts with no state
    /// change. Returns `true` only when an entry was actually removed.
    pub async fn delete(&self, id: &str, confirmation: Confirmation) -> bool {
        if confirmation != Confirmation::Confirmed {
            return false;
        }

        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|t| t.id != id);
        entries.len() < before
    }
}
