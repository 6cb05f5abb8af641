use clap::Parser;
use iced::widget::{column, container, horizontal_space, image, row, scrollable, text};
use iced::{window, Alignment, Element, Length, Subscription, Task, Theme};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod assets;
mod config;
mod error;
mod gallery;
mod state;
mod ui;

use assets::thumbnail::{load_thumbnail, Thumbnail};
use assets::{http_client, Location};
use config::Config;
use gallery::Gallery;
use state::data::Catalog;
use state::selection::SelectionEngine;
use state::trigger::near_end;
use ui::surface::{GallerySurface, GroupId, RenderSurface, TileId, Visual};

/// Where the session is
enum Phase {
    /// Waiting for the metadata document
    Loading,
    /// Catalog loaded, gallery on screen
    Ready {
        gallery: Gallery<StdRng>,
        surface: GallerySurface,
    },
    /// Metadata could not be loaded; the page stays empty
    Failed,
}

/// Main application state
struct ArtistGallery {
    config: Config,
    /// Base for resolving relative asset references
    source: Location,
    /// One HTTP client for the whole session so fetches reuse connections
    client: reqwest::Client,
    phase: Phase,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// Metadata fetch finished
    CatalogLoaded(Result<Arc<Catalog>, String>),
    /// A tile's picture finished loading
    ThumbnailLoaded(TileId, Result<image::Handle, String>),
    /// The gallery was scrolled
    Scrolled(scrollable::Viewport),
    /// Answer to a visibility check: whether the group's row is on screen
    GroupVisibility(GroupId, bool),
    /// The window changed size, so different rows may be on screen
    WindowResized,
    /// User clicked a row's "show more" button
    ShowMore(GroupId),
    /// User clicked a picture
    RemoveImage(TileId),
    /// User clicked a caption
    CopyCaption(String),
    /// User clicked an image or grid link
    OpenLink(String),
}

impl ArtistGallery {
    /// Create the application and start fetching the metadata document
    fn new(config: Config) -> (Self, Task<Message>) {
        let source = config.metadata_location();
        let client = http_client();

        let load = Task::perform(
            assets::metadata::load_catalog(source.clone(), client.clone()),
            |result| Message::CatalogLoaded(result.map(Arc::new).map_err(|e| e.to_string())),
        );

        (
            ArtistGallery {
                config,
                source,
                client,
                phase: Phase::Loading,
            },
            load,
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::CatalogLoaded(Ok(catalog)) => {
                let rng = match self.config.seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                let engine = SelectionEngine::new(catalog, self.config.batch_size as usize, rng);
                let mut gallery = Gallery::new(engine);
                let mut surface = GallerySurface::new();

                if let Err(e) = gallery.start(&mut surface) {
                    tracing::error!("failed to mount initial artists: {e}");
                }

                // Pictures load once their row turns out to be on screen
                let checks = visibility_checks(&gallery, &surface);
                self.phase = Phase::Ready { gallery, surface };
                checks
            }
            Message::CatalogLoaded(Err(e)) => {
                tracing::error!(source = %self.source, "error loading the metadata document: {e}");
                self.phase = Phase::Failed;
                Task::none()
            }
            Message::ThumbnailLoaded(tile, result) => {
                let Phase::Ready { surface, .. } = &mut self.phase else {
                    return Task::none();
                };
                let visual = match result {
                    Ok(handle) => Visual::Ready(handle),
                    Err(e) => {
                        tracing::warn!(?tile, "image failed to load: {e}");
                        Visual::Failed
                    }
                };
                if !surface.set_visual(tile, visual) {
                    tracing::trace!(?tile, "picture arrived for a removed tile");
                }
                Task::none()
            }
            Message::Scrolled(viewport) => {
                let margin = self.config.trigger_margin;
                let Phase::Ready { gallery, surface } = &mut self.phase else {
                    return Task::none();
                };

                let near = near_end(
                    viewport.absolute_offset().y,
                    viewport.bounds().height,
                    viewport.content_bounds().height,
                    margin,
                );
                if let Err(e) = gallery.on_viewport(near, surface) {
                    tracing::error!("failed to load more artists: {e}");
                }
                visibility_checks(gallery, surface)
            }
            Message::GroupVisibility(group, visible) => {
                let Phase::Ready { gallery, surface } = &mut self.phase else {
                    return Task::none();
                };
                if !visible {
                    return Task::none();
                }

                let loads = thumbnail_tasks(&self.source, self.config.tile_size, &self.client, surface, group);
                match gallery.on_group_visible(group, surface) {
                    Ok(0) => loads,
                    Ok(_) => Task::batch([loads, visibility_checks(gallery, surface)]),
                    Err(e) => {
                        tracing::error!("failed to load more artists: {e}");
                        loads
                    }
                }
            }
            Message::WindowResized => match &self.phase {
                Phase::Ready { gallery, surface } => visibility_checks(gallery, surface),
                _ => Task::none(),
            },
            Message::ShowMore(group) => {
                let Phase::Ready { gallery, surface } = &mut self.phase else {
                    return Task::none();
                };
                // The row was just clicked, so it is on screen
                match gallery.show_more(group, surface) {
                    Ok(true) => thumbnail_tasks(&self.source, self.config.tile_size, &self.client, surface, group),
                    Ok(false) => Task::none(),
                    Err(e) => {
                        tracing::error!(?group, "show more failed: {e}");
                        Task::none()
                    }
                }
            }
            Message::RemoveImage(tile) => {
                if let Phase::Ready { surface, .. } = &mut self.phase {
                    surface.remove_image(tile);
                }
                Task::none()
            }
            Message::CopyCaption(caption) => {
                tracing::info!("caption copied to clipboard");
                iced::clipboard::write(caption)
            }
            Message::OpenLink(target) => {
                match self.source.resolve(&target) {
                    Ok(location) => {
                        if let Err(e) = open::that(location.to_string()) {
                            tracing::warn!(%location, "failed to open link: {e}");
                        }
                    }
                    Err(e) => tracing::warn!("cannot open link: {e}"),
                }
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let status = match &self.phase {
            Phase::Loading => "Loading…".to_string(),
            Phase::Ready { gallery, .. } if gallery.engine().is_exhausted() => {
                format!("all {} artists", gallery.artists_shown())
            }
            Phase::Ready { gallery, .. } => format!(
                "{} of {} artists",
                gallery.artists_shown(),
                gallery.engine().catalog().artist_count()
            ),
            Phase::Failed => String::new(),
        };

        let header = row![text("Artist Gallery").size(32), horizontal_space(), text(status).size(14)]
            .align_y(Alignment::Center)
            .padding(20);

        let body: Element<Message> = match &self.phase {
            Phase::Ready { surface, .. } => {
                scrollable(ui::view::gallery(surface, self.config.tile_size as f32))
                    .on_scroll(Message::Scrolled)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .into()
            }
            _ => container(column![]).height(Length::Fill).into(),
        };

        column![header, body].into()
    }

    /// Window resizes can bring rows into view without a scroll event
    fn subscription(&self) -> Subscription<Message> {
        window::resize_events().map(|_| Message::WindowResized)
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Ask the runtime which rows are on screen: every row still waiting for
/// pictures, plus the watched last row. A page that fits the window never
/// scrolls, so this is also what keeps batches coming in that case.
fn visibility_checks(gallery: &Gallery<StdRng>, surface: &GallerySurface) -> Task<Message> {
    let mut groups = surface.groups_awaiting_pictures();
    if let Some(watched) = gallery.watched_group() {
        if !groups.contains(&watched) {
            groups.push(watched);
        }
    }

    Task::batch(groups.into_iter().map(|group| {
        container::visible_bounds(group.container_id())
            .map(move |bounds| Message::GroupVisibility(group, bounds.is_some()))
    }))
}

/// Start loading pictures for the tiles of `group` not yet requested
fn thumbnail_tasks(
    source: &Location,
    size: u32,
    client: &reqwest::Client,
    surface: &mut GallerySurface,
    group: GroupId,
) -> Task<Message> {
    let mut tasks = Vec::new();

    for (tile, record) in surface.take_pending_loads(group) {
        match source.resolve(&record.webp_file) {
            Ok(location) => tasks.push(Task::perform(
                load_thumbnail(location, size, client.clone()),
                move |result| {
                    Message::ThumbnailLoaded(tile, result.map(into_handle).map_err(|e| e.to_string()))
                },
            )),
            Err(e) => {
                tracing::warn!(?tile, "bad image reference: {e}");
                surface.set_visual(tile, Visual::Failed);
            }
        }
    }

    Task::batch(tasks)
}

fn into_handle(thumbnail: Thumbnail) -> image::Handle {
    image::Handle::from_rgba(thumbnail.width, thumbnail.height, thumbnail.pixels)
}

fn main() -> iced::Result {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "artist_gallery=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse();
    tracing::info!(
        metadata = %config.metadata,
        batch_size = config.batch_size,
        seed = ?config.seed,
        "starting artist gallery"
    );

    iced::application("Artist Gallery", ArtistGallery::update, ArtistGallery::view)
        .subscription(ArtistGallery::subscription)
        .theme(ArtistGallery::theme)
        .centered()
        .run_with(move || ArtistGallery::new(config))
}
