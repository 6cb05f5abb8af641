//! Embedded SVG glyphs for tile links and the "show more" button

/// Picture frame, links to the full-resolution image
pub const IMAGE_LINK: &str = r#"<svg width="800" height="800" viewBox="0 0 24 24" version="1.2" baseProfile="tiny" xmlns="http://www.w3.org/2000/svg"><circle cx="8.5" cy="8.5" r="2.5"/><path d="M16 10c-2 0-3 3-4.5 3s-1.499-1-3.5-1c-2 0-3.001 4-3.001 4H19s-1-6-3-6zm4-7H4c-1.103 0-2 .897-2 2v12c0 1.103.897 2 2 2h16c1.103 0 2-.897 2-2V5c0-1.103-.897-2-2-2zm0 14H4V5h16v12z"/></svg>"#;

/// Four squares, links to the grid / contact sheet
pub const GRID_LINK: &str = r#"<svg width="800" height="800" viewBox="-32 0 512 512" xmlns="http://www.w3.org/2000/svg"><path d="M64 96h136v136H64V96Zm184 0h136v136H248V96ZM64 280h136v136H64V280Zm184 0h136v136H248V280Z"/></svg>"#;

/// Circled plus
pub const SHOW_MORE: &str = r#"<svg width="30" height="30" viewBox="0 0 48 48" fill="white" xmlns="http://www.w3.org/2000/svg"><path d="M24 0C10.745 0 0 10.745 0 24s10.745 24 24 24 24-10.745 24-24S37.255 0 24 0zm0 44C13.511 44 4 34.489 4 24S13.511 4 24 4s20 9.511 20 20-9.511 20-20 20zm10-22H26V14a2 2 0 10-4 0v8h-8a2 2 0 100 4h8v8a2 2 0 104 0v-8h8a2 2 0 100-4z"/></svg>"#;
