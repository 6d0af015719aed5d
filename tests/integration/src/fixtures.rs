//! Test fixtures and data generators

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use photo_core::{Clock, Comment, Image, Reaction, RecordId, User, UserColor};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A user with a unique id
pub fn unique_user() -> User {
    let suffix = unique_suffix();
    User::new(
        format!("user-test-{suffix}"),
        format!("User{suffix}"),
        UserColor::default(),
    )
}

/// A user with a fixed id
pub fn user(id: &str) -> User {
    User::new(id, format!("name-{id}"), UserColor::default())
}

/// An image with a unique id
pub fn unique_image() -> Image {
    image(&format!("img-{}", unique_suffix()))
}

/// An image with a fixed id
pub fn image(id: &str) -> Image {
    Image::new(
        id,
        format!("https://images.test/{id}.jpg"),
        format!("https://images.test/{id}-thumb.jpg"),
        format!("photo {id}"),
    )
}

/// A reaction record built directly, bypassing the engine
pub fn reaction_at(id: &str, user: &User, image: &Image, emoji: &str, created_at: i64) -> Reaction {
    Reaction::new(RecordId::new(id), user, image, emoji, created_at)
}

/// A comment record built directly, bypassing the engine
pub fn comment_at(id: &str, user: &User, image: &Image, text: &str, created_at: i64) -> Comment {
    Comment::new(RecordId::new(id), user, image, text, created_at)
        .unwrap_or_else(|e| panic!("fixture comment {id}: {e}"))
}

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn at(millis: i64) -> Self {
        Self {
            now: AtomicI64::new(millis),
        }
    }

    pub fn set(&self, millis: i64) {
        self.now.store(millis, Ordering::SeqCst);
    }

    pub fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}
