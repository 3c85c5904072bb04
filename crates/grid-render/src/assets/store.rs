//! Asset store: loads the six sprite images once and publishes them together.
//!
//! The store is single-threaded (`RefCell` behind `Rc`). The `loading` flag is
//! checked and set before the first suspension point of [`AssetStore::load`],
//! so interleaved calls on the same task queue issue exactly one set of fetches.
//! No `RefCell` borrow is ever held across an `.await`.

use std::cell::RefCell;
use std::rc::Rc;
use futures::channel::oneshot;
use futures::future::join_all;
use crate::api::config::LoadPolicy;
use crate::assets::manifest::{AssetManifest, ImageId};
use crate::error::LoadError;

/// Fetches and decodes a single image. Implemented per platform.
#[allow(async_fn_in_trait)]
pub trait ImageLoader {
    type Image;

    async fn fetch(&self, id: ImageId, path: &str) -> Result<Self::Image, LoadError>;
}

/// Load state of one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResourceStatus {
    #[default]
    Pending,
    Loaded,
    Failed,
}

/// Aggregate load state of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetStatus {
    /// No load has been issued yet.
    Idle,
    /// Fetches are in flight.
    Loading,
    /// All six images are published.
    Ready,
    /// The last load finished with at least one failed image; nothing is published.
    Failed,
}

impl AssetStatus {
    /// Whether a load has finished, successfully or not.
    pub fn is_settled(self) -> bool {
        matches!(self, AssetStatus::Ready | AssetStatus::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AssetStatus::Idle => "idle",
            AssetStatus::Loading => "loading",
            AssetStatus::Ready => "ready",
            AssetStatus::Failed => "failed",
        }
    }
}

/// A complete, published set of images.
#[derive(Debug)]
pub struct AssetSet<I> {
    images: [I; ImageId::COUNT],
}

impl<I> AssetSet<I> {
    pub fn get(&self, id: ImageId) -> &I {
        &self.images[id.index()]
    }
}

struct StoreState<I> {
    loading: bool,
    loaded: bool,
    failed: bool,
    resources: [ResourceStatus; ImageId::COUNT],
    set: Option<Rc<AssetSet<I>>>,
    waiters: Vec<oneshot::Sender<AssetStatus>>,
}

impl<I> StoreState<I> {
    fn status(&self) -> AssetStatus {
        if self.loaded {
            AssetStatus::Ready
        } else if self.loading {
            AssetStatus::Loading
        } else if self.failed {
            AssetStatus::Failed
        } else {
            AssetStatus::Idle
        }
    }
}

/// Cache of decoded sprite images, shared between the loader task and the compositor.
pub struct AssetStore<I> {
    state: RefCell<StoreState<I>>,
}

impl<I> AssetStore<I> {
    pub fn new() -> Self {
        Self {
            state: RefCell::new(StoreState {
                loading: false,
                loaded: false,
                failed: false,
                resources: [ResourceStatus::Pending; ImageId::COUNT],
                set: None,
                waiters: Vec::new(),
            }),
        }
    }

    pub fn status(&self) -> AssetStatus {
        self.state.borrow().status()
    }

    pub fn is_loaded(&self) -> bool {
        self.state.borrow().loaded
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn resource_status(&self, id: ImageId) -> ResourceStatus {
        self.state.borrow().resources[id.index()]
    }

    /// The published image set, or None until every image has loaded.
    pub fn assets(&self) -> Option<Rc<AssetSet<I>>> {
        self.state.borrow().set.clone()
    }

    /// Handle of a single image. None until every image has loaded.
    pub fn image(&self, id: ImageId) -> Option<I>
    where
        I: Clone,
    {
        self.state.borrow().set.as_ref().map(|set| set.get(id).clone())
    }

    /// Fetch all six images in parallel and publish them together.
    ///
    /// No-op while a load is in flight or after one has succeeded; returns the
    /// current status in that case. After a failed load a new call starts over.
    pub async fn load<L>(&self, loader: &L, manifest: &AssetManifest, policy: LoadPolicy) -> AssetStatus
    where
        L: ImageLoader<Image = I>,
    {
        {
            let mut state = self.state.borrow_mut();
            if state.loading || state.loaded {
                log::debug!("asset load skipped: store is {}", state.status().as_str());
                return state.status();
            }
            state.loading = true;
            state.failed = false;
            state.resources = [ResourceStatus::Pending; ImageId::COUNT];
        }

        let attempts = policy.max_attempts.max(1);
        log::info!("loading {} images (up to {} attempts each)", ImageId::COUNT, attempts);

        let fetches = ImageId::ALL.map(move |id| self.fetch_one(loader, id, manifest.path(id), attempts));
        let results = join_all(fetches).await;
        self.publish(results)
    }

    /// Resolve once the store has settled (`Ready` or `Failed`).
    /// Does not start a load; waits for whoever does.
    pub async fn ready(&self) -> AssetStatus {
        let rx = {
            let mut state = self.state.borrow_mut();
            let status = state.status();
            if status.is_settled() {
                return status;
            }
            let (tx, rx) = oneshot::channel();
            state.waiters.push(tx);
            rx
        };
        match rx.await {
            Ok(status) => status,
            Err(_) => self.status(),
        }
    }

    async fn fetch_one<L>(&self, loader: &L, id: ImageId, path: &str, attempts: u32) -> Result<I, LoadError>
    where
        L: ImageLoader<Image = I>,
    {
        let mut attempt = 1;
        loop {
            match loader.fetch(id, path).await {
                Ok(image) => {
                    self.state.borrow_mut().resources[id.index()] = ResourceStatus::Loaded;
                    return Ok(image);
                }
                Err(err) if attempt < attempts => {
                    log::warn!("{} (attempt {}/{}), retrying", err, attempt, attempts);
                    attempt += 1;
                }
                Err(err) => {
                    log::warn!("{} (attempt {}/{}), giving up", err, attempt, attempts);
                    self.state.borrow_mut().resources[id.index()] = ResourceStatus::Failed;
                    return Err(err);
                }
            }
        }
    }

    fn publish(&self, results: Vec<Result<I, LoadError>>) -> AssetStatus {
        let failed = results.iter().filter(|r| r.is_err()).count();
        let set = if failed == 0 {
            let images: Vec<I> = results.into_iter().filter_map(Result::ok).collect();
            <[I; ImageId::COUNT]>::try_from(images).ok().map(|images| Rc::new(AssetSet { images }))
        } else {
            None
        };

        let (status, waiters) = {
            let mut state = self.state.borrow_mut();
            state.loading = false;
            match set {
                Some(set) => {
                    state.set = Some(set);
                    state.loaded = true;
                    log::info!("all {} images loaded", ImageId::COUNT);
                }
                None => {
                    state.failed = true;
                    log::warn!("asset load failed: {} of {} images missing", failed, ImageId::COUNT);
                }
            }
            (state.status(), std::mem::take(&mut state.waiters))
        };

        for waiter in waiters {
            let _ = waiter.send(status);
        }
        status
    }
}

impl<I> Default for AssetStore<I> {
    fn default() -> Self {
        Self::new()
    }
}
