//! Per-slot avatar loading.
//!
//! Each display slot owns an [`AvatarSlot`]. Asking the [`AvatarLoader`] for
//! an avatar either answers from the cache right away or starts a fetch and
//! stamps the slot with a fresh [`RequestToken`]. Fetch and decode run on the
//! runtime; the result comes back as an [`AvatarMessage`] that the owning
//! task passes to [`AvatarLoader::complete`], which caches the image and
//! hands out one [`AvatarDelivery`] per waiting slot. A slot only takes a
//! delivery whose token it still holds, so a slot that moved on to another
//! row never shows the old row's avatar.
//!
//! Requests for a resource that is already being fetched join that fetch
//! instead of starting another one.
//!
//! A slot that turns ready keeps a [`SWATCH_WIDTH`] x [`SWATCH_HEIGHT`]
//! downscale of the image, so redraws never touch the full-size pixels.

use std::collections::HashMap;
use std::sync::Arc;

use image::RgbImage;
use image::imageops::FilterType;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::cache::{AvatarImage, SharedAvatarCache};
use super::fetcher::{AvatarError, AvatarFetcher};
use crate::feed::AVATAR_ROWS;

/// Swatch pixels per avatar row: one column per cell
pub const SWATCH_WIDTH: u32 = 4;
/// Two pixels per cell, stacked with half blocks
pub const SWATCH_HEIGHT: u32 = AVATAR_ROWS as u32 * 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

#[derive(Debug, Clone, Default)]
enum SlotImage {
    #[default]
    Empty,
    Pending(RequestToken),
    Ready(RgbImage),
    /// The last fetch failed; the placeholder stays until the slot is reused.
    Failed,
}

/// Avatar state of one display slot.
#[derive(Debug, Clone)]
pub struct AvatarSlot {
    id: SlotId,
    resource: Option<String>,
    image: SlotImage,
}

impl AvatarSlot {
    pub fn new(id: SlotId) -> Self {
        Self {
            id,
            resource: None,
            image: SlotImage::Empty,
        }
    }

    #[cfg(test)]
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    /// The downscaled avatar, once it is ready
    pub fn swatch(&self) -> Option<&RgbImage> {
        match &self.image {
            SlotImage::Ready(swatch) => Some(swatch),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.image, SlotImage::Pending(_))
    }

    /// Forget the outstanding request, if any. A late result is discarded.
    pub fn cancel(&mut self) {
        if self.is_pending() {
            self.image = SlotImage::Empty;
        }
    }

    /// Detach the slot from whatever it showed.
    pub fn clear(&mut self) {
        self.resource = None;
        self.image = SlotImage::Empty;
    }

    /// Apply a finished fetch. Returns `false` if the delivery was meant for
    /// an earlier request of this slot, or for another slot.
    pub fn accept(&mut self, delivery: &AvatarDelivery) -> bool {
        if delivery.slot != self.id {
            return false;
        }
        match self.image {
            SlotImage::Pending(token) if token == delivery.token => {}
            _ => return false,
        }

        self.image = match &delivery.image {
            Some(image) => SlotImage::Ready(swatch(image)),
            None => SlotImage::Failed,
        };
        true
    }
}

#[derive(Debug, Clone, Copy)]
struct Waiter {
    slot: SlotId,
    token: RequestToken,
}

/// The outcome of a fetch addressed to one slot. `image` is `None` when the
/// fetch failed.
#[derive(Debug, Clone)]
pub struct AvatarDelivery {
    pub slot: SlotId,
    token: RequestToken,
    image: Option<AvatarImage>,
}

#[derive(Debug)]
pub struct AvatarMessage {
    resource: String,
    result: Result<AvatarImage, AvatarError>,
}

pub struct AvatarLoader {
    cache: SharedAvatarCache,
    fetcher: Arc<dyn AvatarFetcher>,
    /// Resource id -> slots waiting on its fetch
    in_flight: HashMap<String, Vec<Waiter>>,
    next_token: u64,
    completions: UnboundedSender<AvatarMessage>,
}

impl AvatarLoader {
    pub fn new(
        cache: SharedAvatarCache,
        fetcher: Arc<dyn AvatarFetcher>,
    ) -> (Self, UnboundedReceiver<AvatarMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let loader = Self {
            cache,
            fetcher,
            in_flight: HashMap::new(),
            next_token: 0,
            completions: tx,
        };
        (loader, rx)
    }

    pub fn cache(&self) -> &SharedAvatarCache {
        &self.cache
    }

    /// Number of resources with a fetch under way
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Point `slot` at `resource`. Returns `true` if the avatar can be shown
    /// right away; otherwise a fetch is pending and the slot keeps its
    /// placeholder.
    ///
    /// Asking again for the resource a slot already shows or waits for is a
    /// no-op, so this can be called on every frame.
    pub fn request(&mut self, resource: &str, slot: &mut AvatarSlot) -> bool {
        if resource.is_empty() {
            slot.clear();
            return false;
        }

        if slot.resource.as_deref() == Some(resource) {
            match &slot.image {
                SlotImage::Ready(_) => return true,
                SlotImage::Pending(_) | SlotImage::Failed => return false,
                SlotImage::Empty => {}
            }
        }

        slot.cancel();
        slot.resource = Some(resource.to_string());
        slot.image = SlotImage::Empty;

        if let Some(image) = self.cache.get(resource) {
            slot.image = SlotImage::Ready(swatch(&image));
            return true;
        }

        let token = RequestToken(self.next_token);
        self.next_token += 1;
        slot.image = SlotImage::Pending(token);

        let waiters = self.in_flight.entry(resource.to_string()).or_default();
        let start_fetch = waiters.is_empty();
        waiters.push(Waiter {
            slot: slot.id,
            token,
        });

        if start_fetch {
            self.spawn_fetch(resource);
        } else {
            log::trace!("Joining in-flight avatar fetch for {resource}");
        }
        false
    }

    /// Apply a finished fetch on the owning task. Successful images always
    /// land in the cache, even if no slot wants them any more.
    pub fn complete(&mut self, message: AvatarMessage) -> Vec<AvatarDelivery> {
        let waiters = self.in_flight.remove(&message.resource).unwrap_or_default();

        let image = match message.result {
            Ok(image) => {
                self.cache.insert(&message.resource, image.clone());
                Some(image)
            }
            Err(e) => {
                log::warn!("Avatar {} unavailable: {e}", message.resource);
                None
            }
        };

        waiters
            .into_iter()
            .map(|waiter| AvatarDelivery {
                slot: waiter.slot,
                token: waiter.token,
                image: image.clone(),
            })
            .collect()
    }

    fn spawn_fetch(&self, resource: &str) {
        log::debug!("Fetching avatar {resource}");
        let fetch = self.fetcher.fetch(resource);
        let completions = self.completions.clone();
        let resource = resource.to_string();

        tokio::spawn(async move {
            let result = match fetch.await {
                Ok(bytes) => decode(bytes).await,
                Err(e) => Err(e),
            };
            if completions.send(AvatarMessage { resource, result }).is_err() {
                log::debug!("Avatar result dropped, loader is gone");
            }
        });
    }
}

fn swatch(image: &AvatarImage) -> RgbImage {
    image
        .resize_exact(SWATCH_WIDTH, SWATCH_HEIGHT, FilterType::Triangle)
        .to_rgb8()
}

async fn decode(bytes: Vec<u8>) -> Result<AvatarImage, AvatarError> {
    let decoded = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes))
        .await
        .map_err(|e| AvatarError::Decode(e.to_string()))??;
    Ok(Arc::new(decoded))
}
