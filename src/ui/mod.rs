/// User interface module
///
/// - The render surface model and its command trait (surface.rs)
/// - Page, row and tile widgets (view.rs)
/// - Embedded SVG icons (icons.rs)

pub mod icons;
pub mod surface;
pub mod view;
