//! Badge and partner artwork loading.
//!
//! Images are fetched once per URL, decoded off the UI thread, and cached
//! as egui textures. A failed fetch or decode substitutes a placeholder;
//! image failures never propagate into core state.

use crate::prelude::HashMap;
use crossbeam_channel::{unbounded, Receiver, Sender};
use egui::{ColorImage, Context, TextureHandle, TextureOptions};

type FetchResult = (String, Option<([usize; 2], Vec<u8>)>);

enum ImageState {
    Loading,
    Ready(TextureHandle),
    Failed,
}

pub struct ImageCache {
    states: HashMap<String, ImageState>,
    tx: Sender<FetchResult>,
    rx: Receiver<FetchResult>,
    placeholder: Option<TextureHandle>,
    #[cfg(feature = "tokio-runtime")]
    runtime: Option<tokio::runtime::Handle>,
}

impl ImageCache {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self {
            states: HashMap::default(),
            tx,
            rx,
            placeholder: None,
            #[cfg(feature = "tokio-runtime")]
            runtime: tokio::runtime::Handle::try_current().ok(),
        }
    }

    /// Returns the texture for `url`, kicking off a fetch on first sight.
    /// Until the image arrives (or if it never does) the placeholder is
    /// returned instead.
    pub fn texture(&mut self, ctx: &Context, url: &str) -> TextureHandle {
        if url.is_empty() {
            return self.placeholder(ctx);
        }

        if !self.states.contains_key(url) {
            self.start_fetch(url);
        }

        match self.states.get(url) {
            Some(ImageState::Ready(texture)) => texture.clone(),
            _ => self.placeholder(ctx),
        }
    }

    /// Installs any images that finished decoding since the last frame.
    pub fn poll(&mut self, ctx: &Context) {
        for (url, decoded) in self.rx.try_iter() {
            let state = match decoded {
                Some((size, rgba)) => {
                    let image = ColorImage::from_rgba_unmultiplied(size, &rgba);
                    let texture = ctx.load_texture(url.clone(), image, TextureOptions::LINEAR);
                    ImageState::Ready(texture)
                }
                None => {
                    #[cfg(feature = "debug")]
                    log::debug!("Image fetch failed for {url}; using placeholder");
                    ImageState::Failed
                }
            };
            self.states.insert(url, state);
        }
    }

    /// Uses `handle` for image fetches instead of the runtime captured at
    /// construction, which may not exist on the UI thread.
    #[cfg(feature = "tokio-runtime")]
    pub fn set_runtime(&mut self, handle: tokio::runtime::Handle) {
        self.runtime = Some(handle);
    }

    /// True while any image is still in flight.
    pub fn has_pending(&self) -> bool {
        self.states
            .values()
            .any(|state| matches!(state, ImageState::Loading))
    }

    #[cfg(feature = "tokio-runtime")]
    fn start_fetch(&mut self, url: &str) {
        let Some(runtime) = &self.runtime else {
            // No runtime to fetch on: settle for the placeholder.
            self.states.insert(url.to_string(), ImageState::Failed);
            return;
        };

        let tx = self.tx.clone();
        let url = url.to_string();
        self.states.insert(url.clone(), ImageState::Loading);

        runtime.spawn(async move {
            let decoded = fetch_and_decode(&url).await;
            let _ = tx.send((url, decoded));
        });
    }

    #[cfg(not(feature = "tokio-runtime"))]
    fn start_fetch(&mut self, url: &str) {
        self.states.insert(url.to_string(), ImageState::Failed);
    }

    fn placeholder(&mut self, ctx: &Context) -> TextureHandle {
        if let Some(texture) = &self.placeholder {
            return texture.clone();
        }

        let size = 32;
        let light = [148, 163, 184, 255];
        let dark = [100, 116, 139, 255];
        let mut pixels = Vec::with_capacity(size * size * 4);
        for y in 0..size {
            for x in 0..size {
                let cell = ((x / 8) + (y / 8)) % 2 == 0;
                pixels.extend_from_slice(if cell { &light } else { &dark });
            }
        }

        let image = ColorImage::from_rgba_unmultiplied([size, size], &pixels);
        let texture = ctx.load_texture("image-placeholder", image, TextureOptions::NEAREST);
        self.placeholder = Some(texture.clone());
        texture
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "tokio-runtime")]
async fn fetch_and_decode(url: &str) -> Option<([usize; 2], Vec<u8>)> {
    let response = reqwest::get(url).await.ok()?;
    if !response.status().is_success() {
        return None;
    }
    let bytes = response.bytes().await.ok()?;

    let decoded = image::load_from_memory(&bytes).ok()?;
    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Some((size, rgba.into_raw()))
}
