//! Identity provider
//!
//! Resolves the per-device user from local storage, generating whatever is
//! missing and writing all three keys back.

use std::sync::Arc;

use photo_core::{Clock, LocalStorage, User, UserColor};
use rand::Rng;
use tracing::{debug, info, instrument, warn};

const KEY_ID: &str = "userId";
const KEY_NAME: &str = "userName";
const KEY_COLOR: &str = "userColor";

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 9;

/// Produces the stable identity of this device
pub struct IdentityProvider {
    storage: Arc<dyn LocalStorage>,
    clock: Arc<dyn Clock>,
}

impl IdentityProvider {
    pub fn new(storage: Arc<dyn LocalStorage>, clock: Arc<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    /// Load the stored identity, creating any missing part.
    ///
    /// Never fails: unreadable keys count as absent and a failed write is
    /// logged, so the returned user may not survive a restart.
    pub fn get_or_create_user(&self) -> User {
        self.get_or_create_user_with(&mut rand::thread_rng())
    }

    /// Same as [`get_or_create_user`](Self::get_or_create_user) with an explicit RNG
    #[instrument(skip_all)]
    pub fn get_or_create_user_with<R: Rng + ?Sized>(&self, rng: &mut R) -> User {
        let id = self
            .read(KEY_ID)
            .unwrap_or_else(|| generate_id(self.clock.now_millis(), rng));
        let name = self
            .read(KEY_NAME)
            .unwrap_or_else(|| format!("User{}", rng.gen_range(0..10_000)));
        let color = self
            .read(KEY_COLOR)
            .and_then(|raw| match UserColor::parse(&raw) {
                Ok(color) => Some(color),
                Err(e) => {
                    debug!(value = %raw, error = %e, "Ignoring stored color");
                    None
                }
            })
            .unwrap_or_else(|| UserColor::random(rng));

        let user = User::new(id, name, color);
        self.persist(&user);

        info!(user_id = %user.id, user_name = %user.name, "Identity resolved");
        user
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value.filter(|v| !v.trim().is_empty()),
            Err(e) => {
                warn!(key, error = %e, "Failed to read identity key");
                None
            }
        }
    }

    fn persist(&self, user: &User) {
        let pairs = [
            (KEY_ID, user.id.as_str()),
            (KEY_NAME, user.name.as_str()),
            (KEY_COLOR, user.color.as_str()),
        ];
        for (key, value) in pairs {
            if let Err(e) = self.storage.set(key, value) {
                warn!(key, error = %e, "Failed to persist identity key");
            }
        }
    }
}

impl std::fmt::Debug for IdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityProvider").finish_non_exhaustive()
    }
}

/// `user-<epoch ms>-<9 base36 chars>`
fn generate_id<R: Rng + ?Sized>(now_millis: i64, rng: &mut R) -> String {
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| char::from(BASE36[rng.gen_range(0..BASE36.len())]))
        .collect();
    format!("user-{now_millis}-{suffix}")
}
