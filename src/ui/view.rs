/// Widgets for the gallery page: one row per artist, one tile per image
use iced::widget::{button, column, container, image, mouse_area, row, svg, text, tooltip};
use iced::{Alignment, Color, ContentFit, Element, Length};
use iced_aw::Wrap;

use super::icons;
use super::surface::{ArtistGroup, GallerySurface, Tile, Visual};
use crate::Message;

/// Space between tiles and between rows
const SPACING: f32 = 12.0;
const ICON_SIZE: f32 = 18.0;

/// The whole page, top to bottom
pub fn gallery(surface: &GallerySurface, tile_size: f32) -> Element<'_, Message> {
    let groups = surface
        .groups()
        .iter()
        .map(|group| artist_row(group, tile_size));

    column(groups)
        .spacing(SPACING * 2.0)
        .padding(20)
        .width(Length::Fill)
        .into()
}

/// Artist name followed by a wrapping row of tiles and the "show more" button
fn artist_row(group: &ArtistGroup, tile_size: f32) -> Element<'_, Message> {
    let mut tiles: Vec<Element<'_, Message>> = group
        .tiles
        .iter()
        .map(|tile| image_tile(tile, tile_size))
        .collect();

    if group.show_more {
        let plus = svg(svg::Handle::from_memory(icons::SHOW_MORE.as_bytes()))
            .width(30)
            .height(30);
        tiles.push(
            container(
                button(plus)
                    .style(button::text)
                    .on_press(Message::ShowMore(group.id)),
            )
            .center_x(tile_size / 2.0)
            .center_y(tile_size)
            .into(),
        );
    }

    let row = column![
        text(&group.artist).size(20),
        Wrap::with_elements(tiles)
            .spacing(SPACING)
            .line_spacing(SPACING),
    ]
    .spacing(8);

    // Named so the app can ask whether the row is on screen
    container(row).id(group.id.container_id()).into()
}

fn image_tile(tile: &Tile, tile_size: f32) -> Element<'_, Message> {
    let picture: Element<'_, Message> = match &tile.visual {
        Visual::Ready(handle) => image(handle.clone())
            .width(tile_size)
            .height(tile_size)
            .content_fit(ContentFit::Cover)
            .into(),
        Visual::Pending => placeholder("loading…", tile_size),
        Visual::Failed => placeholder("unavailable", tile_size),
    };

    // Clicking the picture removes the tile; hovering shows the prompt
    let picture = tooltip(
        mouse_area(picture).on_press(Message::RemoveImage(tile.id)),
        container(text(&tile.image.prompt).size(12))
            .padding(8)
            .max_width(tile_size * 2.0),
        tooltip::Position::Bottom,
    )
    .style(container::rounded_box);

    let links = row![
        link_icon(icons::IMAGE_LINK, &tile.image.image_url),
        link_icon(icons::GRID_LINK, &tile.image.grid_url),
    ]
    .spacing(6)
    .align_y(Alignment::Center);

    let caption = button(text(&tile.image.caption).size(13))
        .style(button::text)
        .padding(0)
        .on_press(Message::CopyCaption(tile.image.caption.clone()));

    column![picture, links, caption]
        .spacing(4)
        .width(tile_size)
        .into()
}

fn link_icon<'a>(glyph: &'static str, target: &str) -> Element<'a, Message> {
    let icon = svg(svg::Handle::from_memory(glyph.as_bytes()))
        .width(ICON_SIZE)
        .height(ICON_SIZE)
        .style(|_theme, _status| svg::Style {
            color: Some(Color::WHITE),
        });

    button(icon)
        .style(button::text)
        .padding(2)
        .on_press(Message::OpenLink(target.to_string()))
        .into()
}

fn placeholder<'a>(label: &'a str, tile_size: f32) -> Element<'a, Message> {
    container(text(label).size(12))
        .center_x(tile_size)
        .center_y(tile_size)
        .style(container::rounded_box)
        .into()
}
